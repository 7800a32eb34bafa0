use std::time::Duration;

use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use voxanswer::application::ports::{TranscriptionEngine, TranscriptionError};
use voxanswer::infrastructure::audio::AzureWhisperEngine;

use crate::support::start_mock_server;

fn azure_router(status: StatusCode, body: &'static str) -> Router {
    Router::new().route(
        "/openai/deployments/my-deployment/audio/transcriptions",
        post(move |headers: HeaderMap| async move {
            if headers.get("api-key").and_then(|v| v.to_str().ok()) != Some("test-key") {
                return (StatusCode::UNAUTHORIZED, "missing api-key").into_response();
            }
            (status, body).into_response()
        }),
    )
}

fn engine(base_url: &str) -> AzureWhisperEngine {
    AzureWhisperEngine::new(
        base_url,
        "my-deployment",
        "test-key",
        "2024-06-01",
        Some("vi-VN"),
        Duration::from_secs(5),
    )
}

#[tokio::test]
async fn given_valid_audio_bytes_when_azure_transcribes_then_returns_text() {
    let (base_url, shutdown_tx) =
        start_mock_server(azure_router(StatusCode::OK, r#"{"text": "Xin chào"}"#)).await;

    let result = engine(&base_url).transcribe(b"fake audio bytes").await;

    assert_eq!(result.unwrap(), "Xin chào");
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_azure_api_returns_error_status_when_transcribing_then_returns_api_error() {
    let (base_url, shutdown_tx) = start_mock_server(azure_router(
        StatusCode::BAD_REQUEST,
        r#"{"error": {"code": "InvalidRequest", "message": "bad audio"}}"#,
    ))
    .await;

    let result = engine(&base_url).transcribe(b"bad audio").await;

    assert!(matches!(result, Err(TranscriptionError::ApiRequestFailed(_))));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_azure_api_returns_empty_text_when_transcribing_then_returns_no_speech() {
    let (base_url, shutdown_tx) =
        start_mock_server(azure_router(StatusCode::OK, r#"{"text": ""}"#)).await;

    let result = engine(&base_url).transcribe(b"silent audio").await;

    assert!(matches!(result, Err(TranscriptionError::NoSpeechRecognized)));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_malformed_json_when_transcribing_then_returns_invalid_response() {
    let (base_url, shutdown_tx) =
        start_mock_server(azure_router(StatusCode::OK, "not json")).await;

    let result = engine(&base_url).transcribe(b"audio").await;

    assert!(matches!(result, Err(TranscriptionError::InvalidResponse(_))));
    shutdown_tx.send(()).ok();
}
