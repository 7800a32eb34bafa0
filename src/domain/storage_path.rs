use std::fmt;

use super::audio_format::AudioFormat;
use super::session_id::SessionId;

const STAGING_PREFIX: &str = "staging";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePath(String);

impl StoragePath {
    /// Staged upload: `staging/{session_id}_{filename}`. Never servable by name.
    pub fn for_upload(session_id: &SessionId, filename: &str) -> Self {
        let name = sanitize_file_name(filename);
        Self(format!("{}/{}_{}", STAGING_PREFIX, session_id.as_uuid(), name))
    }

    /// Synthesized response, stored flat so it can be fetched by file name.
    pub fn for_response(session_id: &SessionId, format: AudioFormat) -> Self {
        Self(format!("{}.{}", session_id.as_uuid(), format.extension()))
    }

    /// Accepts only a single, non-hidden path segment.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let valid = !name.is_empty()
            && !name.starts_with('.')
            && !name.contains(['/', '\\'])
            && !name.contains("..");
        valid.then(|| Self(name.to_string()))
    }

    pub fn from_raw(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name();
        name.rsplit_once('.').map(|(_, ext)| ext)
    }
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn sanitize_file_name(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}
