use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use voxanswer::application::ports::{SpeechSynthesizer, SynthesisError};
use voxanswer::domain::AudioFormat;
use voxanswer::infrastructure::speech::OpenAiSpeechSynthesizer;

use crate::support::start_mock_server;

type Captured = Arc<Mutex<Option<(Option<String>, Value)>>>;

fn speech_router(status: StatusCode, body: &'static [u8], captured: Captured) -> Router {
    Router::new().route(
        "/audio/speech",
        post(move |headers: HeaderMap, Json(payload): Json<Value>| {
            let captured = captured.clone();
            async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                *captured.lock().unwrap() = Some((auth, payload));
                (status, body).into_response()
            }
        }),
    )
}

fn synthesizer(base_url: String) -> OpenAiSpeechSynthesizer {
    OpenAiSpeechSynthesizer::new(
        "sk-test".to_string(),
        Some(base_url),
        None,
        Some("nova".to_string()),
        Duration::from_secs(5),
    )
}

#[tokio::test]
async fn given_text_when_synthesizing_then_returns_audio_and_sends_mp3_request() {
    let captured: Captured = Arc::default();
    let (base_url, shutdown_tx) =
        start_mock_server(speech_router(StatusCode::OK, b"ID3-mp3-bytes", captured.clone())).await;
    let synthesizer = synthesizer(base_url);

    let audio = synthesizer.synthesize("Team X won").await.unwrap();

    assert_eq!(audio, b"ID3-mp3-bytes".to_vec());
    assert_eq!(synthesizer.output_format(), AudioFormat::Mp3);
    let (auth, payload) = captured.lock().unwrap().take().unwrap();
    assert_eq!(auth.as_deref(), Some("Bearer sk-test"));
    assert_eq!(
        payload,
        json!({"model": "tts-1", "input": "Team X won", "voice": "nova", "response_format": "mp3"})
    );
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_empty_audio_body_when_synthesizing_then_returns_empty_audio() {
    let (base_url, shutdown_tx) =
        start_mock_server(speech_router(StatusCode::OK, b"", Arc::default())).await;

    let result = synthesizer(base_url).synthesize("hello").await;

    assert!(matches!(result, Err(SynthesisError::EmptyAudio)));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_error_status_when_synthesizing_then_returns_api_request_failed() {
    let (base_url, shutdown_tx) = start_mock_server(speech_router(
        StatusCode::INTERNAL_SERVER_ERROR,
        b"boom",
        Arc::default(),
    ))
    .await;

    let result = synthesizer(base_url).synthesize("hello").await;

    assert!(matches!(result, Err(SynthesisError::ApiRequestFailed(_))));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_blank_text_when_synthesizing_then_returns_empty_text() {
    let result = synthesizer("http://127.0.0.1:9".to_string())
        .synthesize("  ")
        .await;

    assert!(matches!(result, Err(SynthesisError::EmptyText)));
}
