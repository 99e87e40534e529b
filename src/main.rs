//! Tekst CLI entry point.

use anyhow::Result;
use clap::Parser;
use tekst::cli::{commands, Cli, Commands};
use tekst::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Initialize logging
    let log_level = settings.log_level(cli.verbose);

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("tekst={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Execute command
    match &cli.command {
        Commands::Transcribe {
            input,
            no_timestamps,
            no_summary,
            api_key,
            output_dir,
            json,
        } => {
            commands::run_transcribe(
                input,
                *no_timestamps,
                *no_summary,
                api_key.clone(),
                output_dir.clone(),
                *json,
                settings,
            )
            .await?;
        }

        Commands::Serve { host, port } => {
            commands::run_serve(host, *port, settings).await?;
        }
    }

    Ok(())
}
