use async_trait::async_trait;

#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    /// Transcribes normalized WAV audio. An empty recognition result is
    /// reported as [`TranscriptionError::NoSpeechRecognized`].
    async fn transcribe(&self, audio_data: &[u8]) -> Result<String, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("no speech recognized")]
    NoSpeechRecognized,
    #[error("missing configuration: {0}")]
    MissingConfiguration(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
