//! Pipeline orchestrator for Tekst.
//!
//! Coordinates a run: resolve the video ID, fetch metadata, acquire a
//! transcript through the provider fallback chain, render text, and
//! optionally generate a summary.

use crate::config::{ProviderKind, Settings};
use crate::error::{Result, TekstError};
use crate::metadata::{self, VideoMetadata};
use crate::summary::Summarizer;
use crate::transcript::{
    build_http_client, render_plain, render_timestamped, CaptionProvider, DirectApiProvider,
    TranscriptFetcher, TranscriptResult, YtDlpProvider,
};
use crate::video_id::{self, VideoId};
use tracing::{info, warn};

/// Everything a single run produces. Consumed by the CLI output paths
/// and the report writer.
#[derive(Debug, Clone)]
pub struct TranscribeOutcome {
    pub video_id: VideoId,
    pub metadata: VideoMetadata,
    pub language_code: String,
    pub is_generated: bool,
    pub plain_text: String,
    pub timestamped_text: String,
    pub segment_count: usize,
    pub word_count: usize,
    pub summary: Option<String>,
}

/// The main orchestrator for the Tekst pipeline.
pub struct Orchestrator {
    settings: Settings,
    fetcher: TranscriptFetcher,
}

impl Orchestrator {
    /// Create an orchestrator with providers wired from settings.
    pub fn new(settings: Settings) -> Result<Self> {
        if settings.youtube.providers.is_empty() {
            return Err(TekstError::Config(
                "At least one caption provider must be configured".to_string(),
            ));
        }

        let client = build_http_client(&settings.youtube.user_agent)?;

        let mut providers: Vec<Box<dyn CaptionProvider>> = Vec::new();
        for kind in &settings.youtube.providers {
            match kind {
                ProviderKind::DirectApi => {
                    providers.push(Box::new(DirectApiProvider::new(client.clone())));
                }
                ProviderKind::YtDlp => {
                    providers.push(Box::new(YtDlpProvider::new(client.clone())));
                }
            }
        }

        Ok(Self {
            settings,
            fetcher: TranscriptFetcher::new(providers),
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Acquire a normalized transcript through the provider chain.
    pub async fn fetch_transcript(&self, video_id: &VideoId) -> Result<TranscriptResult> {
        self.fetcher
            .acquire(video_id, &self.settings.youtube.preferred_languages)
            .await
    }

    /// Run the full pipeline for one video.
    pub async fn run(
        &self,
        input: &str,
        summarize: bool,
        api_key: Option<&str>,
    ) -> Result<TranscribeOutcome> {
        let video_id = video_id::resolve(input)?;
        info!("Processing video {}", video_id);

        let metadata = metadata::fetch_metadata(&video_id).await;
        let transcript = self.fetch_transcript(&video_id).await?;

        let plain_text = render_plain(&transcript.segments);
        let timestamped_text = render_timestamped(&transcript.segments);
        let word_count = plain_text.split_whitespace().count();

        let summary = if summarize && self.settings.summary.enabled {
            let summarizer = Summarizer::new(
                &self.settings.summary,
                self.settings.prompts.clone(),
                api_key,
            );
            match summarizer.summarize(&plain_text, &metadata).await {
                Ok(text) => Some(text),
                Err(e) => {
                    // A failed summary degrades to an error note in the
                    // report; the transcript itself is still delivered.
                    warn!("Summary generation failed: {}", e);
                    Some(format!("Error generating summary: {}", e))
                }
            }
        } else {
            None
        };

        Ok(TranscribeOutcome {
            video_id,
            metadata,
            language_code: transcript.language_code,
            is_generated: transcript.is_generated,
            segment_count: transcript.segments.len(),
            word_count,
            plain_text,
            timestamped_text,
            summary,
        })
    }
}
