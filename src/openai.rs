//! OpenAI client configuration with sensible defaults.

use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Default timeout for OpenAI API requests (5 minutes).
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Create an OpenAI client with configured timeout.
///
/// An explicit API key overrides the `OPENAI_API_KEY` environment
/// variable. Uses a 5-minute timeout to prevent hung API calls.
pub fn create_client(api_key: Option<&str>) -> Client<OpenAIConfig> {
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        .build()
        .expect("Failed to create HTTP client");

    let config = match api_key {
        Some(key) => OpenAIConfig::new().with_api_key(key),
        None => OpenAIConfig::default(),
    };

    Client::with_config(config).with_http_client(http_client)
}
