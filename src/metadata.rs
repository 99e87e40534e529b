//! Video metadata retrieval via yt-dlp.
//!
//! Metadata is cosmetic relative to the transcript itself, so failures
//! degrade to placeholder values instead of aborting the run.

use crate::video_id::VideoId;
use serde::Serialize;
use tracing::warn;

/// Metadata for a video, fetched independently of captions.
#[derive(Debug, Clone, Serialize)]
pub struct VideoMetadata {
    pub title: String,
    pub channel: String,
    pub duration_seconds: u64,
    /// Upload date as YYYYMMDD, empty when unknown.
    pub upload_date: String,
    pub view_count: u64,
    pub description: String,
    pub language: String,
    pub url: String,
}

impl VideoMetadata {
    /// Placeholder record used when the fetch fails.
    fn degraded(video_id: &VideoId) -> Self {
        Self {
            title: "Unknown".to_string(),
            channel: "Unknown".to_string(),
            duration_seconds: 0,
            upload_date: String::new(),
            view_count: 0,
            description: String::new(),
            language: String::new(),
            url: video_id.watch_url(),
        }
    }
}

/// Fetch metadata for a video using yt-dlp.
///
/// Never fails: any error is logged and replaced by a degraded record.
pub async fn fetch_metadata(video_id: &VideoId) -> VideoMetadata {
    match fetch_metadata_ytdlp(video_id).await {
        Ok(metadata) => metadata,
        Err(e) => {
            warn!("Metadata fetch failed for {}: {}", video_id, e);
            VideoMetadata::degraded(video_id)
        }
    }
}

async fn fetch_metadata_ytdlp(video_id: &VideoId) -> crate::error::Result<VideoMetadata> {
    let url = video_id.watch_url();

    let output = tokio::process::Command::new("yt-dlp")
        .args(["--dump-json", "--no-download", "--no-warnings", &url])
        .output()
        .await
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                crate::error::TekstError::ToolNotFound("yt-dlp".to_string())
            } else {
                crate::error::TekstError::Metadata(format!("Failed to run yt-dlp: {}", e))
            }
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(crate::error::TekstError::Metadata(format!(
            "Video {} not found or unavailable: {}",
            video_id,
            stderr.trim()
        )));
    }

    let json_str = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&json_str).map_err(|e| {
        crate::error::TekstError::Metadata(format!("Failed to parse yt-dlp output: {}", e))
    })?;

    Ok(VideoMetadata {
        title: json["title"].as_str().unwrap_or("Unknown").to_string(),
        channel: json["channel"]
            .as_str()
            .or_else(|| json["uploader"].as_str())
            .unwrap_or("Unknown")
            .to_string(),
        duration_seconds: json["duration"].as_f64().unwrap_or(0.0) as u64,
        upload_date: json["upload_date"].as_str().unwrap_or_default().to_string(),
        view_count: json["view_count"].as_u64().unwrap_or(0),
        description: json["description"].as_str().unwrap_or_default().to_string(),
        language: json["language"].as_str().unwrap_or_default().to_string(),
        url,
    })
}
