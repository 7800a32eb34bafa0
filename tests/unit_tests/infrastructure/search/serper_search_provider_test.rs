use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use voxanswer::application::ports::{SearchProvider, SearchProviderError};
use voxanswer::infrastructure::search::SerperSearchProvider;
use voxanswer::presentation::config::SearchSettings;

use crate::support::start_mock_server;

type Captured = Arc<Mutex<Option<(Option<String>, Value)>>>;

fn serper_router(status: StatusCode, body: &'static str, captured: Captured) -> Router {
    Router::new().route(
        "/search",
        post(move |headers: HeaderMap, Json(payload): Json<Value>| {
            let captured = captured.clone();
            async move {
                let key = headers
                    .get("x-api-key")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                *captured.lock().unwrap() = Some((key, payload));
                (status, body)
            }
        }),
    )
}

fn provider(base_url: String) -> SerperSearchProvider {
    SerperSearchProvider::new(
        "serper-key".to_string(),
        Some(base_url),
        "vn".to_string(),
        "vi".to_string(),
        "google".to_string(),
        Duration::from_secs(5),
    )
}

#[tokio::test]
async fn given_query_when_searching_then_sends_locale_language_engine_and_api_key() {
    let captured: Captured = Arc::default();
    let (base_url, shutdown_tx) =
        start_mock_server(serper_router(StatusCode::OK, "{}", captured.clone())).await;

    provider(base_url).search("thời tiết Hà Nội").await.unwrap();

    let (key, payload) = captured.lock().unwrap().take().unwrap();
    assert_eq!(key.as_deref(), Some("serper-key"));
    assert_eq!(
        payload,
        json!({"q": "thời tiết Hà Nội", "gl": "vn", "hl": "vi", "engine": "google"})
    );
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_results_with_answer_box_when_searching_then_parses_result_set() {
    let body = r#"{
        "answerBox": {"answer": "Team X", "title": "Final"},
        "organic": [{"title": "a", "link": "https://a", "snippet": "Team X won"}],
        "relatedSearches": []
    }"#;
    let (base_url, shutdown_tx) =
        start_mock_server(serper_router(StatusCode::OK, body, Arc::default())).await;

    let results = provider(base_url).search("who won").await.unwrap();

    assert_eq!(
        results.answer_box.and_then(|b| b.answer).as_deref(),
        Some("Team X")
    );
    assert_eq!(results.organic.len(), 1);
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_error_status_when_searching_then_returns_api_request_failed() {
    let (base_url, shutdown_tx) = start_mock_server(serper_router(
        StatusCode::FORBIDDEN,
        r#"{"message":"Unauthorized."}"#,
        Arc::default(),
    ))
    .await;

    let result = provider(base_url).search("q").await;

    assert!(matches!(result, Err(SearchProviderError::ApiRequestFailed(_))));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_non_json_body_when_searching_then_returns_invalid_response() {
    let (base_url, shutdown_tx) = start_mock_server(serper_router(
        StatusCode::OK,
        "<html>oops</html>",
        Arc::default(),
    ))
    .await;

    let result = provider(base_url).search("q").await;

    assert!(matches!(result, Err(SearchProviderError::InvalidResponse(_))));
    shutdown_tx.send(()).ok();
}

#[test]
fn given_settings_without_api_key_when_building_provider_then_returns_missing_configuration() {
    let result = SerperSearchProvider::from_settings(&SearchSettings::default(), Duration::from_secs(1));

    assert!(matches!(
        result,
        Err(SearchProviderError::MissingConfiguration(_))
    ));
}
