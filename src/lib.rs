//! Tekst - YouTube Transcript Fetcher and Summarizer
//!
//! Fetches a YouTube video's caption track, normalizes it into one
//! canonical segment representation, and exposes the result through a
//! CLI and a small HTTP API, optionally with an AI-generated summary.
//!
//! The name "Tekst" comes from the Norwegian/Scandinavian word for "text."
//!
//! # Overview
//!
//! Tekst allows you to:
//! - Fetch captions for a video despite a rate-limited, anti-bot source,
//!   by trying providers in priority order until one succeeds
//! - Render plain and timestamped transcript text
//! - Generate an organized AI summary and a markdown report
//! - Serve transcripts over HTTP for browser frontends
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `video_id` - Video ID resolution from URLs and bare IDs
//! - `transcript` - Caption providers, fallback orchestration,
//!   normalization, and rendering
//! - `metadata` - Video metadata retrieval
//! - `summary` - AI summary generation
//! - `report` - Markdown report and artifact writing
//! - `orchestrator` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use tekst::config::Settings;
//! use tekst::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::new(settings)?;
//!
//!     let outcome = orchestrator.run("dQw4w9WgXcQ", false, None).await?;
//!     println!("{} words", outcome.word_count);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod metadata;
pub mod openai;
pub mod orchestrator;
pub mod report;
pub mod summary;
pub mod transcript;
pub mod video_id;

pub use error::{Result, TekstError};
