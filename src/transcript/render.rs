//! Plain and timestamped text rendering from canonical segments.

use super::models::CaptionSegment;

/// Join trimmed, non-empty segment texts with single spaces.
pub fn render_plain(segments: &[CaptionSegment]) -> String {
    segments
        .iter()
        .map(|s| s.text.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// One line per non-empty segment: `[MM:SS] text`, or `[HH:MM:SS] text`
/// once the start offset reaches an hour.
pub fn render_timestamped(segments: &[CaptionSegment]) -> String {
    segments
        .iter()
        .filter_map(|s| {
            let text = s.text.trim();
            if text.is_empty() {
                None
            } else {
                Some(format!("{} {}", format_timestamp(s.start), text))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a start offset as `[MM:SS]` or `[HH:MM:SS]`.
///
/// Truncates to whole seconds (floor, not round), so `125.9` renders
/// as `[02:05]`.
pub fn format_timestamp(seconds: f64) -> String {
    let total = seconds as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("[{:02}:{:02}:{:02}]", hours, minutes, secs)
    } else {
        format!("[{:02}:{:02}]", minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(text: &str, start: f64) -> CaptionSegment {
        CaptionSegment {
            text: text.to_string(),
            start,
            duration: 1.0,
        }
    }

    #[test]
    fn test_plain_skips_empty_segments() {
        let segments = vec![seg("  a  ", 0.0), seg("   ", 1.0), seg("b", 2.0)];
        assert_eq!(render_plain(&segments), "a b");
    }

    #[test]
    fn test_timestamp_floors_fractional_seconds() {
        assert_eq!(format_timestamp(125.9), "[02:05]");
    }

    #[test]
    fn test_timestamp_switches_to_hours() {
        assert_eq!(format_timestamp(3725.0), "[01:02:05]");
        assert_eq!(format_timestamp(3599.9), "[59:59]");
    }

    #[test]
    fn test_timestamped_lines() {
        let segments = vec![seg("a", 0.0), seg("b", 61.0)];
        assert_eq!(render_timestamped(&segments), "[00:00] a\n[01:01] b");
    }

    #[test]
    fn test_timestamped_skips_empty_segments() {
        let segments = vec![seg("a", 0.0), seg("  ", 30.0), seg("b", 61.0)];
        assert_eq!(render_timestamped(&segments), "[00:00] a\n[01:01] b");
    }
}
