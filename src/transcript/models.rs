//! Core data types for the transcript pipeline.

use serde::{Deserialize, Serialize};

/// One timed unit of caption text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionSegment {
    pub text: String,
    /// Start offset in seconds.
    pub start: f64,
    /// Duration in seconds.
    pub duration: f64,
}

/// A fetched and normalized transcript. Immutable once produced.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptResult {
    pub segments: Vec<CaptionSegment>,
    pub language_code: String,
    /// Whether the captions were auto-generated by speech recognition.
    pub is_generated: bool,
}

/// Record of one failed provider invocation, kept for diagnostics
/// when every provider is exhausted.
#[derive(Debug, Clone)]
pub struct ProviderAttempt {
    pub provider: String,
    pub error: String,
    /// The provider found the video but it carries no usable caption track.
    /// Drives the 404 response shape in the HTTP layer.
    pub no_captions: bool,
}

/// Raw caption data as returned by a provider, before normalization.
///
/// Modeled as a tagged union so each format gets exactly one
/// normalization path instead of scattered format sniffing.
#[derive(Debug, Clone)]
pub enum RawCaptionPayload {
    /// Segments that already carry text/start/duration.
    Snippets(Vec<CaptionSegment>),
    /// A json3 event stream (`events[]` with `tStartMs`/`dDurationMs`/`segs`).
    JsonEvents(String),
    /// A subtitle-track XML document (`<text start=".." dur="..">`).
    SubtitleXml(String),
}

/// What a provider hands to the orchestrator on success.
#[derive(Debug, Clone)]
pub struct ProviderPayload {
    pub payload: RawCaptionPayload,
    pub language_code: String,
    pub is_generated: bool,
}
