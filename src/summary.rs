//! AI summary generation for transcripts.
//!
//! A failed summary never aborts a run; callers substitute the error
//! message into the report instead.

use crate::config::{Prompts, SummarySettings};
use crate::error::{Result, TekstError};
use crate::metadata::VideoMetadata;
use crate::openai::create_client;
use crate::report::format_duration;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use std::collections::HashMap;
use tracing::{info, instrument};

/// LLM-backed transcript summarizer.
pub struct Summarizer {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    max_tokens: u32,
    max_transcript_chars: usize,
    prompts: Prompts,
}

impl Summarizer {
    pub fn new(settings: &SummarySettings, prompts: Prompts, api_key: Option<&str>) -> Self {
        Self {
            client: create_client(api_key),
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
            max_transcript_chars: settings.max_transcript_chars,
            prompts,
        }
    }

    /// Generate an organized summary of a transcript.
    #[instrument(skip(self, text, metadata), fields(model = %self.model))]
    pub async fn summarize(&self, text: &str, metadata: &VideoMetadata) -> Result<String> {
        info!("Generating summary for '{}'", metadata.title);

        let mut vars = HashMap::new();
        vars.insert("title".to_string(), metadata.title.clone());
        vars.insert("channel".to_string(), metadata.channel.clone());
        vars.insert(
            "duration".to_string(),
            format_duration(metadata.duration_seconds),
        );
        vars.insert(
            "transcript".to_string(),
            truncate_chars(text, self.max_transcript_chars),
        );

        let user_prompt = Prompts::render(&self.prompts.summary.user, &vars);

        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.prompts.summary.system.clone())
                .build()
                .map_err(|e| TekstError::Summary(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_prompt)
                .build()
                .map_err(|e| TekstError::Summary(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .max_tokens(self.max_tokens)
            .build()
            .map_err(|e| TekstError::Summary(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| TekstError::Summary(e.to_string()))?;

        response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| TekstError::Summary("Empty response from model".to_string()))
    }
}

/// Cap a string at `max` characters, respecting char boundaries.
fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_untouched() {
        assert_eq!(truncate_chars("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let text = "ábç".repeat(10);
        let out = truncate_chars(&text, 5);
        assert_eq!(out.chars().count(), 5);
    }
}
