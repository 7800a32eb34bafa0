use std::fmt;

use super::session_id::SessionId;
use super::storage_path::StoragePath;

/// Outcome of one voice query pipeline run.
#[derive(Debug, Clone)]
pub struct VoiceAnswer {
    pub session_id: SessionId,
    pub transcript: Option<String>,
    pub answer: String,
    pub audio: Vec<u8>,
    pub audio_path: StoragePath,
    pub fallback_reason: Option<FallbackReason>,
}

impl VoiceAnswer {
    pub fn is_fallback(&self) -> bool {
        self.fallback_reason.is_some()
    }
}

/// Why the pipeline answered with the fallback message instead of a search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    AudioUndecodable,
    NoSpeechRecognized,
    TranscriptionUnavailable,
    SearchUnavailable,
    NoSearchMatch,
}

impl FallbackReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AudioUndecodable => "audio_undecodable",
            Self::NoSpeechRecognized => "no_speech_recognized",
            Self::TranscriptionUnavailable => "transcription_unavailable",
            Self::SearchUnavailable => "search_unavailable",
            Self::NoSearchMatch => "no_search_match",
        }
    }
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
