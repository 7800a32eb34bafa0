use std::io;

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use futures::StreamExt;
use futures::stream::{self, BoxStream};
use serde::{Deserialize, Serialize};

use crate::application::ports::AudioStoreError;
use crate::application::services::VoiceQueryError;
use crate::domain::{AudioFormat, SessionId, VoiceAnswer};
use crate::infrastructure::observability::sanitize_text;
use crate::presentation::state::AppState;

use super::error::error_response;

const FILE_FIELD: &str = "file";
const DEFAULT_JSON_FILENAME: &str = "upload.bin";

#[derive(Serialize)]
pub struct UploadResponse {
    pub session_id: String,
    pub audio_url: String,
    pub content: String,
    pub transcript: Option<String>,
    pub fallback: Option<&'static str>,
}

/// JSON alternative to multipart: base64 audio, optionally as a data URL.
#[derive(Deserialize)]
pub struct Base64Upload {
    pub audio: String,
    #[serde(default)]
    pub filename: Option<String>,
}

#[tracing::instrument(skip(state, request))]
pub async fn upload_handler(State(state): State<AppState>, request: Request) -> Response {
    let headers = request.headers().clone();
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if content_type.starts_with("multipart/form-data") {
        let multipart = match Multipart::from_request(request, &state).await {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!(error = %e, "Invalid multipart request");
                return error_response(e.status(), e.body_text());
            }
        };
        upload_from_multipart(&state, &headers, multipart).await
    } else if content_type.starts_with("application/json") {
        let Json(body) = match Json::<Base64Upload>::from_request(request, &state).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, "Invalid JSON upload");
                let status = match e.status() {
                    StatusCode::UNPROCESSABLE_ENTITY => StatusCode::BAD_REQUEST,
                    status => status,
                };
                return error_response(status, e.body_text());
            }
        };
        upload_from_base64(&state, &headers, body).await
    } else {
        tracing::warn!(content_type = %content_type, "Upload without a file");
        error_response(StatusCode::BAD_REQUEST, "No file part")
    }
}

async fn upload_from_multipart(
    state: &AppState,
    headers: &HeaderMap,
    mut multipart: Multipart,
) -> Response {
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some(FILE_FIELD) => {
                let filename = field.file_name().unwrap_or_default().to_string();
                if filename.is_empty() {
                    tracing::warn!("Upload with empty file name");
                    return error_response(StatusCode::BAD_REQUEST, "No selected file");
                }

                tracing::debug!(
                    filename = %filename,
                    content_type = field.content_type().unwrap_or("unknown"),
                    "Receiving audio upload"
                );

                let upload = field.map(|chunk| chunk.map_err(io::Error::other)).boxed();
                return answer_upload(state, headers, &filename, upload, None).await;
            }
            Ok(Some(_)) => continue,
            Ok(None) => {
                tracing::warn!("Multipart upload without a file field");
                return error_response(StatusCode::BAD_REQUEST, "No file part");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart");
                return error_response(
                    e.status(),
                    format!("Failed to read multipart: {}", e),
                );
            }
        }
    }
}

async fn upload_from_base64(state: &AppState, headers: &HeaderMap, body: Base64Upload) -> Response {
    let data = match STANDARD.decode(strip_data_url(&body.audio)) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!(error = %e, "Invalid base64 audio");
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("Invalid base64 audio: {}", e),
            );
        }
    };

    let filename = body
        .filename
        .filter(|f| !f.is_empty())
        .unwrap_or_else(|| DEFAULT_JSON_FILENAME.to_string());
    let length = data.len() as u64;
    let payload = Bytes::from(data);
    let upload = stream::once(async move { Ok(payload) }).boxed();

    answer_upload(state, headers, &filename, upload, Some(length)).await
}

async fn answer_upload(
    state: &AppState,
    headers: &HeaderMap,
    filename: &str,
    upload: BoxStream<'_, Result<Bytes, io::Error>>,
    content_length: Option<u64>,
) -> Response {
    let session_id = SessionId::new();

    match state
        .voice_query_service
        .answer(session_id, filename, upload, content_length)
        .await
    {
        Ok(answer) => {
            tracing::info!(
                session_id = %answer.session_id,
                transcript = %answer.transcript.as_deref().map(sanitize_text).unwrap_or_default(),
                answer = %sanitize_text(&answer.answer),
                fallback = answer.is_fallback(),
                "Voice query answered"
            );

            if accepts_audio(headers) {
                audio_response(answer)
            } else {
                let audio_url = audio_url(state, headers, answer.audio_path.file_name());
                (
                    StatusCode::OK,
                    Json(UploadResponse {
                        session_id: answer.session_id.to_string(),
                        audio_url,
                        content: answer.answer,
                        transcript: answer.transcript,
                        fallback: answer.fallback_reason.map(|r| r.as_str()),
                    }),
                )
                    .into_response()
            }
        }
        Err(VoiceQueryError::EmptyUpload) => {
            tracing::warn!(session_id = %session_id, "Empty upload");
            error_response(StatusCode::BAD_REQUEST, "Uploaded file is empty")
        }
        Err(VoiceQueryError::Storage(AudioStoreError::Io(e))) => {
            tracing::warn!(session_id = %session_id, error = %e, "Upload stream failed");
            error_response(upload_error_status(&e), format!("Failed to read file: {}", e))
        }
        Err(e) => {
            tracing::error!(session_id = %session_id, error = %e, "Voice query failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to process audio: {}", e),
            )
        }
    }
}

/// Body-limit overruns surface inside the multipart stream; keep their 413.
fn upload_error_status(error: &io::Error) -> StatusCode {
    error
        .get_ref()
        .and_then(|inner| inner.downcast_ref::<MultipartError>())
        .map(MultipartError::status)
        .unwrap_or(StatusCode::BAD_REQUEST)
}

fn audio_response(answer: VoiceAnswer) -> Response {
    let mime = answer
        .audio_path
        .extension()
        .and_then(AudioFormat::from_extension)
        .unwrap_or(AudioFormat::Mp3)
        .as_mime();
    (StatusCode::OK, [(header::CONTENT_TYPE, mime)], answer.audio).into_response()
}

fn accepts_audio(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|accept| {
            accept
                .split(',')
                .any(|part| part.trim().to_ascii_lowercase().starts_with("audio/"))
        })
        .unwrap_or(false)
}

fn audio_url(state: &AppState, headers: &HeaderMap, file_name: &str) -> String {
    if let Some(base) = &state.public_base_url {
        return format!("{}/uploads/{}", base.trim_end_matches('/'), file_name);
    }

    match headers.get(header::HOST).and_then(|v| v.to_str().ok()) {
        Some(host) => format!("http://{}/uploads/{}", host, file_name),
        None => format!("/uploads/{}", file_name),
    }
}

fn strip_data_url(encoded: &str) -> &str {
    let trimmed = encoded.trim();
    match trimmed.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => trimmed,
    }
}
