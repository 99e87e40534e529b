//! Prompt templates for Tekst.
//!
//! Templates can be overridden in the configuration file under
//! `[prompts.summary]`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub summary: SummaryPrompts,
}


/// Prompts for transcript summarization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryPrompts {
    pub system: String,
    pub user: String,
}

impl Default for SummaryPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are a video content analyst. You summarize YouTube video transcripts into organized, readable briefings.

Always detect the language of the transcript and write the summary IN THE SAME LANGUAGE as the video."#
                .to_string(),

            user: r#"Analyze the transcript below and create an organized summary.

VIDEO INFORMATION:
- Title: {{title}}
- Channel: {{channel}}
- Duration: {{duration}}

Use the following format:

## Executive Summary
(2-3 sentences capturing the essence of the video)

## Key Points
(List of the most important points covered)

## Detailed Summary
(Summary organized by the video's topics/sections, with timestamps where relevant)

## Insights and Highlights
(Notable quotes, important data, or unique insights)

## Conclusion / Next Steps
(If applicable, what the viewer should do after watching)

TRANSCRIPT:
{{transcript}}"#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Render a template, substituting `{{variable}}` placeholders.
    pub fn render(template: &str, variables: &HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in variables {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_variables() {
        let mut vars = HashMap::new();
        vars.insert("title".to_string(), "Test Video".to_string());

        let out = Prompts::render("Title: {{title}}", &vars);
        assert_eq!(out, "Title: Test Video");
    }

    #[test]
    fn test_render_leaves_unknown_placeholders() {
        let out = Prompts::render("{{missing}}", &HashMap::new());
        assert_eq!(out, "{{missing}}");
    }
}
