//! Direct caption API provider.
//!
//! Reads the caption track listing embedded in the watch page's player
//! response and downloads the selected track as a json3 event stream.
//! Track selection honors manual tracks over auto-generated ones, and
//! preferred languages over anything else.

use super::models::{ProviderPayload, RawCaptionPayload};
use super::CaptionProvider;
use crate::error::{Result, TekstError};
use crate::video_id::VideoId;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

const PROVIDER_NAME: &str = "direct-api";

/// Caption provider backed by the public watch page.
pub struct DirectApiProvider {
    client: reqwest::Client,
}

impl DirectApiProvider {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct CaptionTrack {
    #[serde(rename = "baseUrl")]
    base_url: String,
    #[serde(rename = "languageCode")]
    language_code: String,
    /// `"asr"` marks auto-generated tracks.
    #[serde(default)]
    kind: Option<String>,
}

impl CaptionTrack {
    fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }

    fn matches_language(&self, lang: &str) -> bool {
        self.language_code == lang
            || self
                .language_code
                .strip_prefix(lang)
                .is_some_and(|rest| rest.starts_with('-'))
    }
}

#[async_trait]
impl CaptionProvider for DirectApiProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn fetch(
        &self,
        video_id: &VideoId,
        preferred_languages: &[String],
    ) -> Result<ProviderPayload> {
        let html = self
            .client
            .get(video_id.watch_url())
            .send()
            .await
            .map_err(provider_err)?
            .error_for_status()
            .map_err(provider_err)?
            .text()
            .await
            .map_err(provider_err)?;

        let raw_tracks = extract_caption_tracks(&html).ok_or_else(|| {
            provider_err("no caption track listing in player response")
        })?;
        let tracks: Vec<CaptionTrack> =
            serde_json::from_str(raw_tracks).map_err(provider_err)?;

        let track = select_track(&tracks, preferred_languages)
            .ok_or(TekstError::NoCaptionsFound)?;
        debug!(
            "Selected caption track {} ({})",
            track.language_code,
            if track.is_generated() { "asr" } else { "manual" },
        );

        let separator = if track.base_url.contains('?') { '&' } else { '?' };
        let url = format!("{}{}fmt=json3", track.base_url, separator);

        let body = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(provider_err)?
            .error_for_status()
            .map_err(provider_err)?
            .text()
            .await
            .map_err(provider_err)?;

        if body.is_empty() {
            return Err(TekstError::EmptyContent);
        }

        Ok(ProviderPayload {
            payload: RawCaptionPayload::JsonEvents(body),
            language_code: track.language_code.clone(),
            is_generated: track.is_generated(),
        })
    }
}

fn provider_err(e: impl std::fmt::Display) -> TekstError {
    TekstError::Provider {
        provider: PROVIDER_NAME.to_string(),
        reason: e.to_string(),
    }
}

/// Pick a track by tier: manual in a preferred language, then
/// auto-generated in a preferred language, then the first of any kind.
/// Each tier falls through independently.
fn select_track<'a>(
    tracks: &'a [CaptionTrack],
    preferred_languages: &[String],
) -> Option<&'a CaptionTrack> {
    for lang in preferred_languages {
        if let Some(track) = tracks
            .iter()
            .find(|t| !t.is_generated() && t.matches_language(lang))
        {
            return Some(track);
        }
    }

    for lang in preferred_languages {
        if let Some(track) = tracks
            .iter()
            .find(|t| t.is_generated() && t.matches_language(lang))
        {
            return Some(track);
        }
    }

    tracks.first()
}

/// Extract the balanced JSON array following `"captionTracks":` from
/// the watch page HTML. A plain bracket scan that tracks string
/// context, since the listing sits inside a much larger script blob.
fn extract_caption_tracks(html: &str) -> Option<&str> {
    let key = "\"captionTracks\":";
    let mut i = html.find(key)? + key.len();
    let bytes = html.as_bytes();

    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    if bytes.get(i) != Some(&b'[') {
        return None;
    }

    let array_start = i;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    while i < bytes.len() {
        let b = bytes[i];
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
        } else {
            match b {
                b'"' => in_string = true,
                b'[' => depth += 1,
                b']' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(&html[array_start..=i]);
                    }
                }
                _ => {}
            }
        }
        i += 1;
    }

    None
}
