//! Normalization of provider-specific caption payloads.
//!
//! Converts structured snippet lists, json3 event streams, and
//! subtitle-track XML into one canonical segment list. Input order is
//! preserved; no sorting or deduplication happens here.

use super::models::{CaptionSegment, RawCaptionPayload};
use crate::error::Result;
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

/// Normalize a raw caption payload into canonical segments.
pub fn normalize(payload: RawCaptionPayload) -> Result<Vec<CaptionSegment>> {
    match payload {
        RawCaptionPayload::Snippets(segments) => Ok(segments),
        RawCaptionPayload::JsonEvents(raw) => normalize_json_events(&raw),
        RawCaptionPayload::SubtitleXml(raw) => Ok(normalize_subtitle_xml(&raw)),
    }
}

#[derive(Debug, Deserialize)]
struct EventStream {
    #[serde(default)]
    events: Vec<Event>,
}

#[derive(Debug, Deserialize)]
struct Event {
    #[serde(rename = "tStartMs")]
    start_ms: Option<f64>,
    #[serde(rename = "dDurationMs")]
    duration_ms: Option<f64>,
    #[serde(default)]
    segs: Vec<EventSeg>,
}

#[derive(Debug, Deserialize)]
struct EventSeg {
    utf8: Option<String>,
}

/// Parse a json3 event stream.
///
/// Text fragments within an event are trimmed and joined with single
/// spaces; bare-newline fragments and events with no resulting text
/// are dropped. Millisecond offsets become seconds.
fn normalize_json_events(raw: &str) -> Result<Vec<CaptionSegment>> {
    let stream: EventStream = serde_json::from_str(raw)?;

    let mut segments = Vec::new();
    for event in stream.events {
        let text = event
            .segs
            .iter()
            .filter_map(|s| s.utf8.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if text.is_empty() {
            continue;
        }

        segments.push(CaptionSegment {
            text,
            start: event.start_ms.unwrap_or(0.0) / 1000.0,
            duration: event.duration_ms.unwrap_or(0.0) / 1000.0,
        });
    }

    Ok(segments)
}

struct XmlPatterns {
    element: Regex,
    start_attr: Regex,
    dur_attr: Regex,
    inner_tag: Regex,
}

fn xml_patterns() -> &'static XmlPatterns {
    static PATTERNS: OnceLock<XmlPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| XmlPatterns {
        element: Regex::new(r#"(?s)<text\s+([^>]*)>(.*?)</text>"#).expect("Invalid regex"),
        start_attr: Regex::new(r#"start="([0-9.]+)""#).expect("Invalid regex"),
        dur_attr: Regex::new(r#"dur="([0-9.]+)""#).expect("Invalid regex"),
        inner_tag: Regex::new(r"<[^>]+>").expect("Invalid regex"),
    })
}

/// Best-effort parse of subtitle-track XML (`<text start=".." dur="..">`).
///
/// The format varies between backends, so elements with unparsable
/// attributes are skipped rather than failing the whole payload.
fn normalize_subtitle_xml(raw: &str) -> Vec<CaptionSegment> {
    let XmlPatterns {
        element,
        start_attr,
        dur_attr,
        inner_tag,
    } = xml_patterns();

    let mut segments = Vec::new();
    for caps in element.captures_iter(raw) {
        let attrs = &caps[1];

        let start = match start_attr
            .captures(attrs)
            .and_then(|c| c[1].parse::<f64>().ok())
        {
            Some(s) => s,
            None => continue,
        };
        let duration = dur_attr
            .captures(attrs)
            .and_then(|c| c[1].parse::<f64>().ok())
            .unwrap_or(0.0);

        let body = inner_tag.replace_all(&caps[2], "");
        let text = unescape_entities(body.trim());
        if text.is_empty() {
            continue;
        }

        segments.push(CaptionSegment {
            text,
            start,
            duration,
        });
    }

    segments
}

fn unescape_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
}
