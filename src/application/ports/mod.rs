mod audio_decoder;
mod audio_store;
mod search_provider;
mod speech_synthesizer;
mod transcription_engine;

pub use audio_decoder::{AudioDecodeError, AudioDecoder};
pub use audio_store::{AudioStore, AudioStoreError};
pub use search_provider::{SearchProvider, SearchProviderError};
pub use speech_synthesizer::{SpeechSynthesizer, SynthesisError};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
