//! Fallback orchestration across caption providers.

use super::models::{ProviderAttempt, TranscriptResult};
use super::normalize::normalize;
use super::CaptionProvider;
use crate::error::{Result, TekstError};
use crate::video_id::VideoId;
use tracing::{debug, info, warn};

/// Tries configured providers in priority order until one yields a
/// caption payload. First success wins; there is no quality comparison
/// across providers and no retry of a failed provider.
pub struct TranscriptFetcher {
    providers: Vec<Box<dyn CaptionProvider>>,
}

impl TranscriptFetcher {
    pub fn new(providers: Vec<Box<dyn CaptionProvider>>) -> Self {
        Self { providers }
    }

    /// Acquire a normalized transcript for a video.
    ///
    /// On exhaustion the error carries one [`ProviderAttempt`] per
    /// provider, in invocation order.
    pub async fn acquire(
        &self,
        video_id: &VideoId,
        preferred_languages: &[String],
    ) -> Result<TranscriptResult> {
        let mut attempts = Vec::with_capacity(self.providers.len());

        for provider in &self.providers {
            debug!("Trying caption provider '{}'", provider.name());

            match provider.fetch(video_id, preferred_languages).await {
                // A payload that fails normalization counts as that
                // provider's failure, not the pipeline's: an anti-bot
                // page served with HTTP 200 must still fall through.
                Ok(payload) => match normalize(payload.payload) {
                    Ok(segments) => {
                        info!(
                            "Provider '{}' returned {} segments ({}, {})",
                            provider.name(),
                            segments.len(),
                            payload.language_code,
                            if payload.is_generated { "auto-generated" } else { "manual" },
                        );
                        return Ok(TranscriptResult {
                            segments,
                            language_code: payload.language_code,
                            is_generated: payload.is_generated,
                        });
                    }
                    Err(e) => {
                        warn!(
                            "Provider '{}' returned an unusable payload: {}",
                            provider.name(),
                            e
                        );
                        attempts.push(ProviderAttempt {
                            provider: provider.name().to_string(),
                            error: e.to_string(),
                            no_captions: false,
                        });
                    }
                },
                Err(e) => {
                    warn!("Provider '{}' failed: {}", provider.name(), e);
                    attempts.push(ProviderAttempt {
                        provider: provider.name().to_string(),
                        error: e.to_string(),
                        no_captions: matches!(e, TekstError::NoCaptionsFound),
                    });
                }
            }
        }

        Err(TekstError::NoTranscriptAvailable(attempts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::{CaptionSegment, ProviderPayload, RawCaptionPayload};
    use async_trait::async_trait;

    struct FailingProvider {
        name: &'static str,
        no_captions: bool,
    }

    #[async_trait]
    impl CaptionProvider for FailingProvider {
        fn name(&self) -> &str {
            self.name
        }

        async fn fetch(&self, _: &VideoId, _: &[String]) -> Result<ProviderPayload> {
            if self.no_captions {
                Err(TekstError::NoCaptionsFound)
            } else {
                Err(TekstError::Provider {
                    provider: self.name.to_string(),
                    reason: "boom".to_string(),
                })
            }
        }
    }

    /// Succeeds at the transport level but hands back a body that is
    /// not a caption payload, like a consent page served with 200.
    struct GarbageProvider;

    #[async_trait]
    impl CaptionProvider for GarbageProvider {
        fn name(&self) -> &str {
            "garbage"
        }

        async fn fetch(&self, _: &VideoId, _: &[String]) -> Result<ProviderPayload> {
            Ok(ProviderPayload {
                payload: RawCaptionPayload::JsonEvents("<html>consent required</html>".to_string()),
                language_code: "en".to_string(),
                is_generated: false,
            })
        }
    }

    struct SnippetProvider;

    #[async_trait]
    impl CaptionProvider for SnippetProvider {
        fn name(&self) -> &str {
            "snippets"
        }

        async fn fetch(&self, _: &VideoId, _: &[String]) -> Result<ProviderPayload> {
            Ok(ProviderPayload {
                payload: RawCaptionPayload::Snippets(vec![CaptionSegment {
                    text: "hello".to_string(),
                    start: 0.0,
                    duration: 1.0,
                }]),
                language_code: "en".to_string(),
                is_generated: false,
            })
        }
    }

    fn video_id() -> VideoId {
        crate::video_id::resolve("dQw4w9WgXcQ").unwrap()
    }

    #[tokio::test]
    async fn test_first_success_wins_after_failure() {
        let fetcher = TranscriptFetcher::new(vec![
            Box::new(FailingProvider { name: "a", no_captions: false }),
            Box::new(SnippetProvider),
        ]);

        let result = fetcher.acquire(&video_id(), &["en".to_string()]).await.unwrap();
        assert_eq!(result.segments.len(), 1);
        assert_eq!(result.segments[0].text, "hello");
        assert_eq!(result.language_code, "en");
        assert!(!result.is_generated);
    }

    #[tokio::test]
    async fn test_exhaustion_records_attempts_in_order() {
        let fetcher = TranscriptFetcher::new(vec![
            Box::new(FailingProvider { name: "a", no_captions: false }),
            Box::new(FailingProvider { name: "b", no_captions: true }),
        ]);

        let err = fetcher
            .acquire(&video_id(), &["en".to_string()])
            .await
            .unwrap_err();

        match err {
            TekstError::NoTranscriptAvailable(attempts) => {
                assert_eq!(attempts.len(), 2);
                assert_eq!(attempts[0].provider, "a");
                assert_eq!(attempts[1].provider, "b");
                assert!(!attempts[0].no_captions);
                assert!(attempts[1].no_captions);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_unusable_payload_falls_through_to_next_provider() {
        let fetcher = TranscriptFetcher::new(vec![
            Box::new(GarbageProvider),
            Box::new(SnippetProvider),
        ]);

        let result = fetcher.acquire(&video_id(), &["en".to_string()]).await.unwrap();
        assert_eq!(result.segments.len(), 1);
        assert_eq!(result.segments[0].text, "hello");
    }

    #[tokio::test]
    async fn test_unusable_payload_recorded_on_exhaustion() {
        let fetcher = TranscriptFetcher::new(vec![Box::new(GarbageProvider)]);

        let err = fetcher
            .acquire(&video_id(), &["en".to_string()])
            .await
            .unwrap_err();

        match err {
            TekstError::NoTranscriptAvailable(attempts) => {
                assert_eq!(attempts.len(), 1);
                assert_eq!(attempts[0].provider, "garbage");
                assert!(!attempts[0].no_captions);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_single_provider_deployment() {
        let fetcher = TranscriptFetcher::new(vec![Box::new(SnippetProvider)]);

        let result = fetcher.acquire(&video_id(), &[]).await.unwrap();
        assert_eq!(result.segments[0].text, "hello");
    }
}
