use std::fmt;
use std::future::Future;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use futures::StreamExt;
use futures::stream::{self, BoxStream};

use crate::application::ports::{
    AudioDecodeError, AudioDecoder, AudioStore, AudioStoreError, SearchProvider,
    SearchProviderError, SpeechSynthesizer, SynthesisError, TranscriptionEngine,
    TranscriptionError,
};
use crate::domain::{FallbackReason, SessionId, StoragePath, VoiceAnswer};

use super::answer_ranker::rank_answers;
use super::snippet_extractor::{DEFAULT_MAX_CANDIDATES, extract_snippets};

pub const DEFAULT_FALLBACK_MESSAGE: &str = "Content not found, please try again";
pub const DEFAULT_NO_SPEECH_MESSAGE: &str = "Could not recognize the audio, please try again";
pub const DEFAULT_ADAPTER_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub max_candidates: usize,
    pub adapter_timeout: Duration,
    pub fallback_message: String,
    /// Spoken instead of `fallback_message` when the recording holds no recognizable speech.
    pub no_speech_message: String,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            max_candidates: DEFAULT_MAX_CANDIDATES,
            adapter_timeout: DEFAULT_ADAPTER_TIMEOUT,
            fallback_message: DEFAULT_FALLBACK_MESSAGE.to_string(),
            no_speech_message: DEFAULT_NO_SPEECH_MESSAGE.to_string(),
        }
    }
}

/// Runs one voice query end to end: stage upload, decode, transcribe,
/// search, pick the best snippet, synthesize and store the spoken answer.
///
/// Failures before synthesis degrade to the fallback message. The staged
/// upload is removed on every exit path.
pub struct VoiceQueryService {
    audio_decoder: Arc<dyn AudioDecoder>,
    transcription_engine: Arc<dyn TranscriptionEngine>,
    search_provider: Arc<dyn SearchProvider>,
    speech_synthesizer: Arc<dyn SpeechSynthesizer>,
    audio_store: Arc<dyn AudioStore>,
    options: PipelineOptions,
}

struct Resolution {
    transcript: Option<String>,
    answer: String,
    fallback_reason: Option<FallbackReason>,
}

impl VoiceQueryService {
    pub fn new(
        audio_decoder: Arc<dyn AudioDecoder>,
        transcription_engine: Arc<dyn TranscriptionEngine>,
        search_provider: Arc<dyn SearchProvider>,
        speech_synthesizer: Arc<dyn SpeechSynthesizer>,
        audio_store: Arc<dyn AudioStore>,
        options: PipelineOptions,
    ) -> Self {
        Self {
            audio_decoder,
            transcription_engine,
            search_provider,
            speech_synthesizer,
            audio_store,
            options,
        }
    }

    #[tracing::instrument(skip(self, session_id, upload, content_length), fields(session_id = %session_id))]
    pub async fn answer(
        &self,
        session_id: SessionId,
        filename: &str,
        upload: BoxStream<'_, Result<Bytes, io::Error>>,
        content_length: Option<u64>,
    ) -> Result<VoiceAnswer, VoiceQueryError> {
        let upload_path = StoragePath::for_upload(&session_id, filename);

        let outcome = match self
            .audio_store
            .store(&upload_path, upload, content_length)
            .await
        {
            Ok(0) => Err(VoiceQueryError::EmptyUpload),
            Ok(bytes) => {
                tracing::debug!(bytes, path = %upload_path, "Upload staged");
                self.process(session_id, &upload_path).await
            }
            Err(e) => Err(VoiceQueryError::Storage(e)),
        };

        self.discard_staged(&upload_path).await;
        outcome
    }

    async fn process(
        &self,
        session_id: SessionId,
        upload_path: &StoragePath,
    ) -> Result<VoiceAnswer, VoiceQueryError> {
        let audio = self.audio_store.fetch(upload_path).await?;
        let resolution = self.resolve_answer(audio).await;

        let speech = self
            .bounded(
                PipelineStage::Synthesis,
                self.speech_synthesizer.synthesize(&resolution.answer),
            )
            .await?;

        let audio_path =
            StoragePath::for_response(&session_id, self.speech_synthesizer.output_format());
        let payload = Bytes::from(speech.clone());
        let length = payload.len() as u64;
        self.audio_store
            .store(
                &audio_path,
                stream::once(async move { Ok(payload) }).boxed(),
                Some(length),
            )
            .await?;

        tracing::info!(
            path = %audio_path,
            bytes = length,
            fallback = resolution.fallback_reason.map(|r| r.as_str()),
            "Spoken answer stored"
        );

        Ok(VoiceAnswer {
            session_id,
            transcript: resolution.transcript,
            answer: resolution.answer,
            audio: speech,
            audio_path,
            fallback_reason: resolution.fallback_reason,
        })
    }

    async fn resolve_answer(&self, audio: Vec<u8>) -> Resolution {
        let decoder = Arc::clone(&self.audio_decoder);
        let decoded = self
            .bounded(PipelineStage::Decode, async move {
                match tokio::task::spawn_blocking(move || decoder.decode(&audio)).await {
                    Ok(result) => result,
                    Err(e) => Err(AudioDecodeError::DecodingFailed(format!(
                        "decoder task: {}",
                        e
                    ))),
                }
            })
            .await;

        let wav = match decoded {
            Ok(wav) => wav,
            Err(e) => return self.fallback(None, FallbackReason::AudioUndecodable, &e),
        };

        let transcript = match self
            .bounded(
                PipelineStage::Transcription,
                self.transcription_engine.transcribe(&wav),
            )
            .await
        {
            Ok(text) => text,
            Err(e @ AdapterFailure::Transcription(TranscriptionError::NoSpeechRecognized)) => {
                return self.fallback(None, FallbackReason::NoSpeechRecognized, &e);
            }
            Err(e) => return self.fallback(None, FallbackReason::TranscriptionUnavailable, &e),
        };

        tracing::debug!(chars = transcript.chars().count(), "Query transcribed");

        let results = match self
            .bounded(PipelineStage::Search, self.search_provider.search(&transcript))
            .await
        {
            Ok(results) => results,
            Err(e) => {
                return self.fallback(Some(transcript), FallbackReason::SearchUnavailable, &e);
            }
        };

        let candidates = extract_snippets(&results, self.options.max_candidates);
        tracing::debug!(candidates = candidates.len(), "Answer candidates extracted");

        match rank_answers(&transcript, &candidates) {
            Ok(answer) if !answer.trim().is_empty() => Resolution {
                transcript: Some(transcript),
                answer,
                fallback_reason: None,
            },
            Ok(_) => self.fallback(
                Some(transcript),
                FallbackReason::NoSearchMatch,
                &"selected answer is blank",
            ),
            Err(e) => self.fallback(Some(transcript), FallbackReason::NoSearchMatch, &e),
        }
    }

    fn fallback(
        &self,
        transcript: Option<String>,
        reason: FallbackReason,
        cause: &dyn fmt::Display,
    ) -> Resolution {
        tracing::warn!(reason = %reason, cause = %cause, "Answering with fallback message");
        let message = match reason {
            FallbackReason::NoSpeechRecognized => &self.options.no_speech_message,
            _ => &self.options.fallback_message,
        };
        Resolution {
            transcript,
            answer: message.clone(),
            fallback_reason: Some(reason),
        }
    }

    async fn bounded<T, E, F>(&self, stage: PipelineStage, future: F) -> Result<T, AdapterFailure>
    where
        F: Future<Output = Result<T, E>>,
        AdapterFailure: From<E>,
    {
        match tokio::time::timeout(self.options.adapter_timeout, future).await {
            Ok(result) => result.map_err(AdapterFailure::from),
            Err(_) => Err(AdapterFailure::Timeout {
                stage,
                timeout: self.options.adapter_timeout,
            }),
        }
    }

    async fn discard_staged(&self, path: &StoragePath) {
        match self.audio_store.delete(path).await {
            Ok(()) => tracing::debug!(path = %path, "Staged upload removed"),
            Err(AudioStoreError::NotFound(_)) => {}
            Err(e) => tracing::warn!(path = %path, error = %e, "Failed to remove staged upload"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Decode,
    Transcription,
    Search,
    Synthesis,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Decode => "decode",
            Self::Transcription => "transcription",
            Self::Search => "search",
            Self::Synthesis => "synthesis",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AdapterFailure {
    #[error("decode: {0}")]
    Decode(#[from] AudioDecodeError),
    #[error("transcription: {0}")]
    Transcription(#[from] TranscriptionError),
    #[error("search: {0}")]
    Search(#[from] SearchProviderError),
    #[error("synthesis: {0}")]
    Synthesis(#[from] SynthesisError),
    #[error("{stage} timed out after {timeout:?}")]
    Timeout {
        stage: PipelineStage,
        timeout: Duration,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum VoiceQueryError {
    #[error("uploaded audio is empty")]
    EmptyUpload,
    #[error("storage: {0}")]
    Storage(#[from] AudioStoreError),
    #[error("{0}")]
    Adapter(#[from] AdapterFailure),
}
