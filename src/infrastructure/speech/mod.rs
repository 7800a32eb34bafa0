mod google_translate_synthesizer;
mod openai_speech_synthesizer;
mod speech_synthesizer_factory;

pub use google_translate_synthesizer::{GoogleTranslateSynthesizer, MAX_SEGMENT_CHARS, split_text};
pub use openai_speech_synthesizer::OpenAiSpeechSynthesizer;
pub use speech_synthesizer_factory::SpeechSynthesizerFactory;
