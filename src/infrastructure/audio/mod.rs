mod audio_decoder;
mod azure_whisper_engine;
mod openai_whisper_engine;
mod transcription_engine_factory;

pub use audio_decoder::{
    SymphoniaAudioDecoder, TARGET_SAMPLE_RATE, decode_audio_to_pcm, encode_wav,
};
pub use azure_whisper_engine::AzureWhisperEngine;
pub use openai_whisper_engine::OpenAiWhisperEngine;
pub use transcription_engine_factory::TranscriptionEngineFactory;
