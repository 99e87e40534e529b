//! Error types for Tekst.

use crate::transcript::ProviderAttempt;
use thiserror::Error;

/// Library-level error type for Tekst operations.
#[derive(Error, Debug)]
pub enum TekstError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Provider '{provider}' failed: {reason}")]
    Provider { provider: String, reason: String },

    #[error("No English captions found")]
    NoCaptionsFound,

    #[error("Caption track download returned an empty body")]
    EmptyContent,

    #[error("No transcript available: {}", format_attempts(.0))]
    NoTranscriptAvailable(Vec<ProviderAttempt>),

    #[error("Summary generation failed: {0}")]
    Summary(String),

    #[error("Metadata fetch failed: {0}")]
    Metadata(String),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

fn format_attempts(attempts: &[ProviderAttempt]) -> String {
    attempts
        .iter()
        .map(|a| format!("{}: {}", a.provider, a.error))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for Tekst operations.
pub type Result<T> = std::result::Result<T, TekstError>;
