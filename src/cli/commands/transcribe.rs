//! Transcribe command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use crate::report;
use anyhow::Result;
use std::path::PathBuf;

/// Run the transcribe command.
#[allow(clippy::too_many_arguments)]
pub async fn run_transcribe(
    input: &str,
    no_timestamps: bool,
    no_summary: bool,
    api_key: Option<String>,
    output_dir: Option<String>,
    json: bool,
    settings: Settings,
) -> Result<()> {
    let orchestrator = Orchestrator::new(settings)?;

    Output::info(&format!("Processing: {}", input));
    let spinner = Output::spinner("Fetching transcript...");

    let outcome = match orchestrator
        .run(input, !no_summary, api_key.as_deref())
        .await
    {
        Ok(outcome) => {
            spinner.finish_and_clear();
            outcome
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Failed to process: {}", e));
            return Err(e.into());
        }
    };

    let kind = if outcome.is_generated {
        "auto-generated"
    } else {
        "manual"
    };
    Output::kv("Title", &outcome.metadata.title);
    Output::kv("Channel", &outcome.metadata.channel);
    Output::kv(
        "Duration",
        &report::format_duration(outcome.metadata.duration_seconds),
    );
    Output::kv(
        "Language",
        &format!("{} ({})", outcome.language_code, kind),
    );
    Output::kv("Segments", &outcome.segment_count.to_string());
    Output::kv("Words", &outcome.word_count.to_string());

    let with_timestamps = !no_timestamps;

    // Explicit flag wins over the configured default directory.
    let target_dir = output_dir
        .map(|d| Settings::expand_path(&d))
        .or_else(|| orchestrator.settings().output_dir());

    let mut report_path: Option<PathBuf> = None;
    if let Some(dir) = &target_dir {
        let paths = report::write_artifacts(&outcome, dir, with_timestamps)?;
        Output::success(&format!("Report saved: {}", paths.report.display()));
        report_path = Some(paths.report);
    }

    if json {
        // Minimal JSON without the full transcript text.
        let output = serde_json::json!({
            "video_id": outcome.video_id.as_str(),
            "title": outcome.metadata.title,
            "channel": outcome.metadata.channel,
            "duration": outcome.metadata.duration_seconds,
            "language": outcome.language_code,
            "word_count": outcome.word_count,
            "summary": outcome.summary.clone().unwrap_or_default(),
            "report_path": report_path
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if target_dir.is_none() {
        // No artifacts requested: print the report to stdout.
        println!("\n{}", report::build_report(&outcome, with_timestamps));
    }

    Ok(())
}
