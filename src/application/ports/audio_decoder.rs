/// Normalizes arbitrary uploaded audio into the container the
/// transcription engines accept.
pub trait AudioDecoder: Send + Sync {
    /// Returns 16 kHz mono 16-bit PCM WAV bytes.
    fn decode(&self, data: &[u8]) -> Result<Vec<u8>, AudioDecodeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AudioDecodeError {
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
    #[error("wav encoding failed: {0}")]
    EncodingFailed(String),
}
