//! CLI module for Tekst.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Tekst - YouTube Transcript Fetcher and Summarizer
///
/// Fetches a video's caption track, renders plain and timestamped text,
/// and optionally generates an AI summary.
/// The name "Tekst" comes from the Norwegian/Scandinavian word for "text."
#[derive(Parser, Debug)]
#[command(name = "tekst")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a video transcript and optionally summarize it
    Transcribe {
        /// YouTube video URL or ID
        input: String,

        /// Omit timestamps from the transcript
        #[arg(long)]
        no_timestamps: bool,

        /// Skip AI summary generation
        #[arg(long)]
        no_summary: bool,

        /// OpenAI API key (or set OPENAI_API_KEY env var)
        #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Output directory for report, transcript, and data files
        #[arg(short, long)]
        output_dir: Option<String>,

        /// Output result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the HTTP API server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
}
