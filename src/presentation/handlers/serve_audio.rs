use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::application::ports::AudioStoreError;
use crate::domain::{AudioFormat, StoragePath};
use crate::presentation::state::AppState;

use super::error::error_response;

#[tracing::instrument(skip(state))]
pub async fn serve_audio_handler(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Response {
    let Some(path) = StoragePath::from_file_name(&filename) else {
        tracing::warn!(filename = %filename, "Rejected audio file name");
        return error_response(StatusCode::NOT_FOUND, "File not found");
    };

    match state.audio_store.fetch(&path).await {
        Ok(data) => {
            let mime = path
                .extension()
                .and_then(AudioFormat::from_extension)
                .map(|f| f.as_mime())
                .unwrap_or("application/octet-stream");

            tracing::debug!(path = %path, bytes = data.len(), "Serving audio file");
            ([(header::CONTENT_TYPE, mime)], data).into_response()
        }
        Err(AudioStoreError::NotFound(_)) => {
            tracing::debug!(path = %path, "Audio file not found");
            error_response(StatusCode::NOT_FOUND, "File not found")
        }
        Err(e) => {
            tracing::error!(error = %e, path = %path, "Failed to read audio file");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to serve file: {}", e),
            )
        }
    }
}
