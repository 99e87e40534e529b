//! Configuration module for Tekst.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{Prompts, SummaryPrompts};
pub use settings::{GeneralSettings, ProviderKind, Settings, SummarySettings, YoutubeSettings};
