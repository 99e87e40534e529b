//! Transcript acquisition pipeline.
//!
//! Providers are tried in priority order by the [`TranscriptFetcher`];
//! the first one to return a raw caption payload wins, and the payload
//! is normalized into one canonical segment list.
//!
//! # Providers
//!
//! - **Direct API** ([`DirectApiProvider`]): reads the caption track
//!   listing from the watch page and downloads a json3 event stream.
//! - **yt-dlp** ([`YtDlpProvider`]): resolves an authenticated caption
//!   track URL via yt-dlp, for networks where the direct route is
//!   IP-blocked.

mod direct;
mod fetcher;
mod models;
mod normalize;
mod render;
mod ytdlp;

pub use direct::DirectApiProvider;
pub use fetcher::TranscriptFetcher;
pub use models::{
    CaptionSegment, ProviderAttempt, ProviderPayload, RawCaptionPayload, TranscriptResult,
};
pub use normalize::normalize;
pub use render::{format_timestamp, render_plain, render_timestamped};
pub use ytdlp::YtDlpProvider;

use crate::error::Result;
use crate::video_id::VideoId;
use async_trait::async_trait;
use std::time::Duration;

/// Browser identification sent with caption downloads; some backends
/// reject unidentified clients.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Timeout for caption content downloads.
pub const FETCH_TIMEOUT_SECS: u64 = 15;

/// Trait for caption retrieval backends.
#[async_trait]
pub trait CaptionProvider: Send + Sync {
    /// Short name used in logs and failure diagnostics.
    fn name(&self) -> &str;

    /// Fetch raw caption data for a video, honoring the preferred
    /// language order where the backend supports it.
    async fn fetch(
        &self,
        video_id: &VideoId,
        preferred_languages: &[String],
    ) -> Result<ProviderPayload>;
}

/// Build the shared HTTP client used by caption providers.
///
/// Constructed once and passed in explicitly rather than hidden behind
/// a global.
pub fn build_http_client(user_agent: &str) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
        .build()?;
    Ok(client)
}
