//! Authenticated caption URL provider backed by yt-dlp.
//!
//! Some network environments are IP-blocked by the direct caption API;
//! yt-dlp's video-info extraction still resolves downloadable caption
//! track URLs there. The actual content fetch is a separate bounded
//! HTTP call carrying a browser User-Agent.

use super::models::{ProviderPayload, RawCaptionPayload};
use super::{CaptionProvider, FETCH_TIMEOUT_SECS};
use crate::error::{Result, TekstError};
use crate::video_id::VideoId;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

const PROVIDER_NAME: &str = "yt-dlp";

/// Caption provider that resolves track URLs via yt-dlp.
pub struct YtDlpProvider {
    client: reqwest::Client,
}

impl YtDlpProvider {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn dump_video_info(&self, video_id: &VideoId) -> Result<serde_json::Value> {
        let url = video_id.watch_url();

        let output = tokio::process::Command::new("yt-dlp")
            .args(["--dump-json", "--no-download", "--no-warnings", &url])
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    TekstError::ToolNotFound("yt-dlp".to_string())
                } else {
                    provider_err(format!("Failed to run yt-dlp: {}", e))
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(provider_err(format!(
                "yt-dlp failed for {}: {}",
                video_id,
                stderr.trim()
            )));
        }

        let json_str = String::from_utf8_lossy(&output.stdout);
        serde_json::from_str(&json_str)
            .map_err(|e| provider_err(format!("Failed to parse yt-dlp output: {}", e)))
    }
}

#[async_trait]
impl CaptionProvider for YtDlpProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn fetch(
        &self,
        video_id: &VideoId,
        preferred_languages: &[String],
    ) -> Result<ProviderPayload> {
        let info = self.dump_video_info(video_id).await?;
        let track = select_caption_track(&info, preferred_languages)?;
        debug!(
            "Resolved {} caption track {} ({})",
            track.format.ext(),
            track.language_code,
            if track.is_generated { "auto" } else { "manual" },
        );

        let body = self
            .client
            .get(&track.url)
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
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

        let payload = match track.format {
            CaptionFormat::Json3 => RawCaptionPayload::JsonEvents(body),
            CaptionFormat::Srv1 => RawCaptionPayload::SubtitleXml(body),
        };

        Ok(ProviderPayload {
            payload,
            language_code: track.language_code,
            is_generated: track.is_generated,
        })
    }
}

fn provider_err(e: impl std::fmt::Display) -> TekstError {
    TekstError::Provider {
        provider: PROVIDER_NAME.to_string(),
        reason: e.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum CaptionFormat {
    Json3,
    Srv1,
}

impl CaptionFormat {
    fn ext(self) -> &'static str {
        match self {
            CaptionFormat::Json3 => "json3",
            CaptionFormat::Srv1 => "srv1",
        }
    }
}

#[derive(Debug)]
struct SelectedTrack {
    url: String,
    format: CaptionFormat,
    language_code: String,
    is_generated: bool,
}

/// Find a caption track URL in the yt-dlp dump.
///
/// Human-authored `subtitles` win over `automatic_captions`; within a
/// track the structured json3 format wins over srv1 subtitle XML.
fn select_caption_track(
    info: &serde_json::Value,
    preferred_languages: &[String],
) -> Result<SelectedTrack> {
    for (map_key, is_generated) in [("subtitles", false), ("automatic_captions", true)] {
        let Some(map) = info[map_key].as_object() else {
            continue;
        };

        for lang in preferred_languages {
            for (track_lang, entries) in map {
                if !language_matches(track_lang, lang) {
                    continue;
                }
                if let Some((url, format)) = pick_format(entries) {
                    return Ok(SelectedTrack {
                        url,
                        format,
                        language_code: track_lang.clone(),
                        is_generated,
                    });
                }
            }
        }
    }

    Err(TekstError::NoCaptionsFound)
}

fn language_matches(track_lang: &str, preferred: &str) -> bool {
    track_lang == preferred
        || track_lang
            .strip_prefix(preferred)
            .is_some_and(|rest| rest.starts_with('-'))
}

fn pick_format(entries: &serde_json::Value) -> Option<(String, CaptionFormat)> {
    let list = entries.as_array()?;

    for format in [CaptionFormat::Json3, CaptionFormat::Srv1] {
        if let Some(url) = list
            .iter()
            .find(|e| e["ext"].as_str() == Some(format.ext()))
            .and_then(|e| e["url"].as_str())
        {
            return Some((url.to_string(), format));
        }
    }

    None
}
