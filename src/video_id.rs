//! YouTube video ID resolution.
//!
//! Accepts a bare 11-character ID or any of the common URL shapes
//! (`watch?v=`, `/v/`, `youtu.be/`, `/embed/`) and extracts the ID.
//! No network access; validation happens once at ingress.

use crate::error::{Result, TekstError};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// The fixed YouTube ID alphabet and length.
fn id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z0-9_-]{11}$").expect("Invalid regex"))
}

/// URL patterns tried in priority order; first match wins.
fn url_regexes() -> &'static [Regex; 4] {
    static RES: OnceLock<[Regex; 4]> = OnceLock::new();
    RES.get_or_init(|| {
        [
            r"v=([a-zA-Z0-9_-]{11})",
            r"/v/([a-zA-Z0-9_-]{11})",
            r"youtu\.be/([a-zA-Z0-9_-]{11})",
            r"/embed/([a-zA-Z0-9_-]{11})",
        ]
        .map(|p| Regex::new(p).expect("Invalid regex"))
    })
}

/// A validated 11-character YouTube video identifier.
///
/// Constructed only through [`resolve`], so downstream code never
/// re-validates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch URL for this video.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Check whether a string is a well-formed bare video ID.
pub fn is_valid_id(input: &str) -> bool {
    id_regex().is_match(input)
}

/// Extract a video ID from a URL or bare ID.
pub fn resolve(input: &str) -> Result<VideoId> {
    let input = input.trim();

    for re in url_regexes() {
        if let Some(caps) = re.captures(input) {
            return Ok(VideoId(caps[1].to_string()));
        }
    }

    if is_valid_id(input) {
        return Ok(VideoId(input.to_string()));
    }

    Err(TekstError::InvalidInput(format!(
        "Could not extract video ID from: {}",
        input
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_url() {
        assert_eq!(
            resolve("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap().as_str(),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_watch_url_with_extra_params() {
        assert_eq!(
            resolve("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=120").unwrap().as_str(),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_short_url() {
        assert_eq!(
            resolve("https://youtu.be/dQw4w9WgXcQ").unwrap().as_str(),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_embed_url() {
        assert_eq!(
            resolve("https://youtube.com/embed/dQw4w9WgXcQ").unwrap().as_str(),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_legacy_v_path() {
        assert_eq!(
            resolve("https://www.youtube.com/v/dQw4w9WgXcQ").unwrap().as_str(),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_bare_id() {
        assert_eq!(resolve("dQw4w9WgXcQ").unwrap().as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_invalid_input() {
        assert!(resolve("not-a-video-id").is_err());
        assert!(resolve("").is_err());
        assert!(resolve("https://example.com/video").is_err());
    }

    #[test]
    fn test_is_valid_id() {
        assert!(is_valid_id("dQw4w9WgXcQ"));
        assert!(is_valid_id("a_b-c_d-e_f"));
        assert!(!is_valid_id("too-short"));
        assert!(!is_valid_id("way-too-long-to-be-an-id"));
        assert!(!is_valid_id("bad!chars!!"));
    }
}
