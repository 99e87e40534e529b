//! HTTP API server exposing transcript extraction.
//!
//! Provides `GET /api/transcript?v=<videoId>` with JSON responses and
//! permissive CORS, suitable for serving browser frontends.

use crate::cli::Output;
use crate::config::Settings;
use crate::error::TekstError;
use crate::metadata::{self, VideoMetadata};
use crate::orchestrator::Orchestrator;
use crate::transcript::{render_plain, render_timestamped, TranscriptResult};
use crate::video_id::{self, VideoId};
use axum::{
    extract::{Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

/// Shared application state.
struct AppState {
    orchestrator: Orchestrator,
}

fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Transcripts are immutable per video; a short shared cache keeps
    // repeat lookups off the upstream services.
    let cache_control = SetResponseHeaderLayer::overriding(
        header::CACHE_CONTROL,
        HeaderValue::from_static("public, max-age=300"),
    );

    Router::new()
        .route("/health", get(health))
        .route("/api/transcript", get(get_transcript))
        .layer(cors)
        .layer(cache_control)
        .with_state(state)
}

/// Run the HTTP API server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    let orchestrator = Orchestrator::new(settings)?;
    let app = build_router(Arc::new(AppState { orchestrator }));

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Tekst API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET /health");
    Output::kv("Transcript", "GET /api/transcript?v=<videoId>");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Response Types ===

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TranscriptResponse {
    video_id: String,
    title: String,
    channel: String,
    text: String,
    timestamped: String,
    language: String,
    word_count: usize,
    segment_count: usize,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Serialize)]
struct NotFoundResponse {
    error: String,
    title: String,
    channel: String,
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn get_transcript(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let Some(raw_id) = params.get("v") else {
        return bad_request("Missing v parameter");
    };

    // Rejected before any network call is attempted.
    if !video_id::is_valid_id(raw_id) {
        return bad_request("Invalid video ID format");
    }
    let video_id = match video_id::resolve(raw_id) {
        Ok(id) => id,
        Err(_) => return bad_request("Invalid video ID format"),
    };

    let metadata = metadata::fetch_metadata(&video_id).await;

    match state.orchestrator.fetch_transcript(&video_id).await {
        Ok(transcript) => {
            Json(transcript_response(&video_id, &metadata, &transcript)).into_response()
        }
        Err(e) => failure_response(e, metadata),
    }
}

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// Map a transcript acquisition failure onto an HTTP response.
///
/// A chain that failed because the video has no usable captions is a
/// 404 carrying the video's title and channel; anything else is a 500.
fn failure_response(error: TekstError, metadata: VideoMetadata) -> Response {
    match error {
        TekstError::NoTranscriptAvailable(attempts)
            if attempts.iter().any(|a| a.no_captions) =>
        {
            (
                StatusCode::NOT_FOUND,
                Json(NotFoundResponse {
                    error: "No English captions found".to_string(),
                    title: metadata.title,
                    channel: metadata.channel,
                }),
            )
                .into_response()
        }
        e => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Transcript extraction failed: {}", e),
            }),
        )
            .into_response(),
    }
}

fn transcript_response(
    video_id: &VideoId,
    metadata: &VideoMetadata,
    transcript: &TranscriptResult,
) -> TranscriptResponse {
    let text = render_plain(&transcript.segments);
    let timestamped = render_timestamped(&transcript.segments);
    let word_count = text.split_whitespace().count();

    TranscriptResponse {
        video_id: video_id.to_string(),
        title: metadata.title.clone(),
        channel: metadata.channel.clone(),
        language: transcript.language_code.clone(),
        word_count,
        segment_count: transcript.segments.len(),
        text,
        timestamped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::{CaptionSegment, ProviderAttempt};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_router() -> Router {
        let orchestrator = Orchestrator::new(Settings::default()).unwrap();
        build_router(Arc::new(AppState { orchestrator }))
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn stub_metadata(video_id: &VideoId) -> VideoMetadata {
        VideoMetadata {
            title: "Stub Title".to_string(),
            channel: "Stub Channel".to_string(),
            duration_seconds: 0,
            upload_date: String::new(),
            view_count: 0,
            description: String::new(),
            language: String::new(),
            url: video_id.watch_url(),
        }
    }

    #[test]
    fn test_transcript_response_shape() {
        let video_id = video_id::resolve("dQw4w9WgXcQ").unwrap();
        let transcript = TranscriptResult {
            segments: vec![
                CaptionSegment {
                    text: "a".to_string(),
                    start: 0.0,
                    duration: 1.0,
                },
                CaptionSegment {
                    text: "b".to_string(),
                    start: 61.0,
                    duration: 1.0,
                },
            ],
            language_code: "en".to_string(),
            is_generated: true,
        };

        let response = transcript_response(&video_id, &stub_metadata(&video_id), &transcript);

        assert_eq!(response.text, "a b");
        assert_eq!(response.timestamped, "[00:00] a\n[01:01] b");
        assert_eq!(response.word_count, 2);
        assert_eq!(response.segment_count, 2);
        assert_eq!(response.language, "en");
        assert_eq!(response.title, "Stub Title");
    }

    #[test]
    fn test_response_serializes_camel_case() {
        let video_id = video_id::resolve("dQw4w9WgXcQ").unwrap();
        let transcript = TranscriptResult {
            segments: vec![],
            language_code: "en".to_string(),
            is_generated: false,
        };

        let value = serde_json::to_value(transcript_response(
            &video_id,
            &stub_metadata(&video_id),
            &transcript,
        ))
        .unwrap();

        assert_eq!(value["videoId"], "dQw4w9WgXcQ");
        assert!(value.get("wordCount").is_some());
        assert!(value.get("segmentCount").is_some());
    }

    #[tokio::test]
    async fn test_missing_v_is_bad_request() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/transcript")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Missing v parameter");
    }

    #[tokio::test]
    async fn test_malformed_id_is_bad_request() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/transcript?v=not-an-id!")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Invalid video ID format");
    }

    #[tokio::test]
    async fn test_responses_carry_cache_control() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "public, max-age=300"
        );
    }

    #[tokio::test]
    async fn test_no_captions_maps_to_not_found() {
        let video_id = video_id::resolve("dQw4w9WgXcQ").unwrap();
        let error = TekstError::NoTranscriptAvailable(vec![ProviderAttempt {
            provider: "direct-api".to_string(),
            error: "No caption tracks in watch page".to_string(),
            no_captions: true,
        }]);

        let response = failure_response(error, stub_metadata(&video_id));

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"], "No English captions found");
        assert_eq!(body["title"], "Stub Title");
        assert_eq!(body["channel"], "Stub Channel");
    }

    #[tokio::test]
    async fn test_transport_failure_maps_to_internal_error() {
        let video_id = video_id::resolve("dQw4w9WgXcQ").unwrap();
        let error = TekstError::NoTranscriptAvailable(vec![ProviderAttempt {
            provider: "direct-api".to_string(),
            error: "connection reset".to_string(),
            no_captions: false,
        }]);

        let response = failure_response(error, stub_metadata(&video_id));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        let message = body["error"].as_str().unwrap();
        assert!(message.starts_with("Transcript extraction failed:"));
    }
}
