//! Configuration settings for Tekst.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub youtube: YoutubeSettings,
    pub summary: SummarySettings,
    pub prompts: super::Prompts,
}


/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Default directory for report artifacts when --output-dir is not given.
    pub output_dir: Option<String>,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            output_dir: None,
        }
    }
}

/// Caption provider type.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderKind {
    /// Caption listing scraped from the watch page (default first tier).
    #[default]
    DirectApi,
    /// Caption URL resolved via yt-dlp for IP-blocked environments.
    YtDlp,
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "direct-api" | "direct" => Ok(ProviderKind::DirectApi),
            "yt-dlp" | "ytdlp" => Ok(ProviderKind::YtDlp),
            _ => Err(format!("Unknown caption provider: {}", s)),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::DirectApi => write!(f, "direct-api"),
            ProviderKind::YtDlp => write!(f, "yt-dlp"),
        }
    }
}

/// YouTube caption acquisition settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeSettings {
    /// Caption providers in priority order. A single entry pins the
    /// deployment to one backend.
    pub providers: Vec<ProviderKind>,
    /// Preferred caption languages in priority order.
    pub preferred_languages: Vec<String>,
    /// User-Agent header for caption downloads.
    pub user_agent: String,
}

impl Default for YoutubeSettings {
    fn default() -> Self {
        Self {
            providers: vec![ProviderKind::DirectApi, ProviderKind::YtDlp],
            preferred_languages: vec!["en".to_string()],
            user_agent: crate::transcript::BROWSER_USER_AGENT.to_string(),
        }
    }
}

/// AI summary settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarySettings {
    /// Enable summary generation.
    pub enabled: bool,
    /// LLM model for summary generation.
    pub model: String,
    /// Maximum response tokens.
    pub max_tokens: u32,
    /// Transcript length cap (in characters) sent to the LLM.
    pub max_transcript_chars: usize,
}

impl Default for SummarySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            model: "gpt-4o-mini".to_string(),
            max_tokens: 4096,
            max_transcript_chars: 50_000,
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tekst")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded default output directory, if configured.
    pub fn output_dir(&self) -> Option<PathBuf> {
        self.general.output_dir.as_deref().map(Self::expand_path)
    }

    /// Log level for the tracing filter. `-v` flags override the
    /// configured level.
    pub fn log_level(&self, verbose: u8) -> &str {
        match verbose {
            0 => &self.general.log_level,
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
