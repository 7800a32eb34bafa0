use async_trait::async_trait;

use crate::domain::AudioFormat;

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SynthesisError>;

    fn output_format(&self) -> AudioFormat {
        AudioFormat::Mp3
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("nothing to synthesize")]
    EmptyText,
    #[error("missing configuration: {0}")]
    MissingConfiguration(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("empty audio response")]
    EmptyAudio,
}
