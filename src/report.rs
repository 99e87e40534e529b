//! Markdown report rendering and artifact writing.

use crate::error::Result;
use crate::orchestrator::TranscribeOutcome;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Format a duration in seconds as `MM:SS` or `HH:MM:SS`.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

fn punctuation_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s-]").expect("Invalid regex"))
}

fn whitespace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("Invalid regex"))
}

/// Derive a filesystem-safe name from a video title: punctuation
/// stripped, capped at 60 characters, whitespace collapsed to `_`.
pub fn sanitize_title(title: &str) -> String {
    let cleaned = punctuation_regex().replace_all(title, "");
    let truncated: String = cleaned.chars().take(60).collect();

    let sanitized = whitespace_regex()
        .replace_all(truncated.trim(), "_")
        .to_string();

    if sanitized.is_empty() {
        "untitled".to_string()
    } else {
        sanitized
    }
}

/// Build the formatted markdown report.
pub fn build_report(outcome: &TranscribeOutcome, with_timestamps: bool) -> String {
    let meta = &outcome.metadata;
    let kind = if outcome.is_generated {
        "auto-generated"
    } else {
        "manual"
    };

    let mut report = format!(
        r#"# {title}

| Info | Detail |
|------|--------|
| **Channel** | {channel} |
| **Duration** | {duration} |
| **Language** | {language} ({kind}) |
| **Words** | {words} |
| **Link** | {url} |
| **Processed at** | {processed} |

---

"#,
        title = meta.title,
        channel = meta.channel,
        duration = format_duration(meta.duration_seconds),
        language = outcome.language_code,
        kind = kind,
        words = outcome.word_count,
        url = meta.url,
        processed = chrono::Local::now().format("%d/%m/%Y %H:%M"),
    );

    if let Some(summary) = &outcome.summary {
        report.push_str(summary);
        report.push_str("\n\n---\n\n");
    }

    report.push_str("## Full Transcript\n\n");
    if with_timestamps {
        report.push_str("```\n");
        report.push_str(&outcome.timestamped_text);
        report.push_str("\n```\n");
    } else {
        report.push_str(&outcome.plain_text);
        report.push('\n');
    }

    report
}

/// Paths of the three artifacts written per run.
#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub report: PathBuf,
    pub transcript: PathBuf,
    pub data: PathBuf,
}

/// Write the markdown report, raw transcript, and JSON metadata file
/// into `dir`, named from the sanitized video title.
pub fn write_artifacts(
    outcome: &TranscribeOutcome,
    dir: &Path,
    with_timestamps: bool,
) -> Result<ReportPaths> {
    std::fs::create_dir_all(dir)?;
    let safe_title = sanitize_title(&outcome.metadata.title);

    let report_path = dir.join(format!("{}_report.md", safe_title));
    std::fs::write(&report_path, build_report(outcome, with_timestamps))?;

    let transcript_path = dir.join(format!("{}_transcript.txt", safe_title));
    let transcript_text = if with_timestamps {
        &outcome.timestamped_text
    } else {
        &outcome.plain_text
    };
    std::fs::write(&transcript_path, transcript_text)?;

    let data_path = dir.join(format!("{}_data.json", safe_title));
    let data = serde_json::json!({
        "video_id": outcome.video_id.as_str(),
        "metadata": outcome.metadata,
        "transcript_stats": {
            "language": outcome.language_code,
            "is_generated": outcome.is_generated,
            "segment_count": outcome.segment_count,
            "word_count": outcome.word_count,
        },
        "processed_at": chrono::Utc::now().to_rfc3339(),
    });
    std::fs::write(&data_path, serde_json::to_string_pretty(&data)?)?;

    Ok(ReportPaths {
        report: report_path,
        transcript: transcript_path,
        data: data_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::VideoMetadata;

    fn outcome() -> TranscribeOutcome {
        TranscribeOutcome {
            video_id: crate::video_id::resolve("dQw4w9WgXcQ").unwrap(),
            metadata: VideoMetadata {
                title: "A Test: Video! (part 2)".to_string(),
                channel: "Test Channel".to_string(),
                duration_seconds: 3725,
                upload_date: "20260101".to_string(),
                view_count: 42,
                description: String::new(),
                language: "en".to_string(),
                url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
            },
            language_code: "en".to_string(),
            is_generated: false,
            plain_text: "a b".to_string(),
            timestamped_text: "[00:00] a\n[01:01] b".to_string(),
            segment_count: 2,
            word_count: 2,
            summary: Some("## Executive Summary\nShort.".to_string()),
        }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(65), "01:05");
        assert_eq!(format_duration(3725), "01:02:05");
        assert_eq!(format_duration(0), "00:00");
    }

    #[test]
    fn test_sanitize_title() {
        assert_eq!(sanitize_title("A Test: Video! (part 2)"), "A_Test_Video_part_2");
        assert_eq!(sanitize_title("!!!"), "untitled");
        assert_eq!(sanitize_title("  spaced   out  "), "spaced_out");
    }

    #[test]
    fn test_sanitize_title_caps_length() {
        let long = "word ".repeat(40);
        assert!(sanitize_title(&long).chars().count() <= 60);
    }

    #[test]
    fn test_report_contains_summary_and_transcript() {
        let report = build_report(&outcome(), true);
        assert!(report.contains("# A Test: Video! (part 2)"));
        assert!(report.contains("Executive Summary"));
        assert!(report.contains("[01:01] b"));
        assert!(report.contains("01:02:05"));
    }

    #[test]
    fn test_report_without_timestamps_uses_plain_text() {
        let mut o = outcome();
        o.summary = None;
        let report = build_report(&o, false);
        assert!(report.contains("a b"));
        assert!(!report.contains("[00:00]"));
    }

    #[test]
    fn test_write_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_artifacts(&outcome(), dir.path(), true).unwrap();

        assert!(paths.report.exists());
        assert!(paths.transcript.exists());
        assert!(paths.data.exists());
        assert!(paths
            .report
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("A_Test_Video"));

        let data: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&paths.data).unwrap()).unwrap();
        assert_eq!(data["video_id"], "dQw4w9WgXcQ");
        assert_eq!(data["transcript_stats"]["word_count"], 2);
    }
}
