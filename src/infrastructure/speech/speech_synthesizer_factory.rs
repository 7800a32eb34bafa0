use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{SpeechSynthesizer, SynthesisError};
use crate::presentation::config::{SynthesisProviderSetting, SynthesisSettings};

use super::google_translate_synthesizer::GoogleTranslateSynthesizer;
use super::openai_speech_synthesizer::OpenAiSpeechSynthesizer;

pub struct SpeechSynthesizerFactory;

impl SpeechSynthesizerFactory {
    pub fn create(
        settings: &SynthesisSettings,
        timeout: Duration,
    ) -> Result<Arc<dyn SpeechSynthesizer>, SynthesisError> {
        match settings.provider {
            SynthesisProviderSetting::Google => Ok(Arc::new(GoogleTranslateSynthesizer::new(
                settings.base_url.clone(),
                settings.language.clone(),
                timeout,
            ))),
            SynthesisProviderSetting::OpenAi => {
                let key = settings
                    .api_key
                    .clone()
                    .filter(|k| !k.is_empty())
                    .ok_or_else(|| {
                        SynthesisError::MissingConfiguration(
                            "synthesis.api_key is required for openai".to_string(),
                        )
                    })?;
                Ok(Arc::new(OpenAiSpeechSynthesizer::new(
                    key,
                    settings.base_url.clone(),
                    Some(settings.model.clone()),
                    Some(settings.voice.clone()),
                    timeout,
                )))
            }
        }
    }
}
