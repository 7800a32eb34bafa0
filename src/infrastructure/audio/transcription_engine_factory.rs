use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::presentation::config::{TranscriptionProviderSetting, TranscriptionSettings};

use super::azure_whisper_engine::AzureWhisperEngine;
use super::openai_whisper_engine::OpenAiWhisperEngine;

pub struct TranscriptionEngineFactory;

impl TranscriptionEngineFactory {
    pub fn create(
        settings: &TranscriptionSettings,
        timeout: Duration,
    ) -> Result<Arc<dyn TranscriptionEngine>, TranscriptionError> {
        let api_key = settings
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                TranscriptionError::MissingConfiguration(
                    "transcription.api_key is required".to_string(),
                )
            })?;

        match settings.provider {
            TranscriptionProviderSetting::OpenAi => {
                let engine = OpenAiWhisperEngine::new(
                    api_key.to_string(),
                    settings.base_url.clone(),
                    Some(settings.model.clone()),
                    Some(settings.language.clone()),
                    timeout,
                );
                Ok(Arc::new(engine))
            }
            TranscriptionProviderSetting::Azure => {
                let base_url = settings.base_url.as_deref().ok_or_else(|| {
                    TranscriptionError::MissingConfiguration(
                        "transcription.base_url is required for azure".to_string(),
                    )
                })?;
                let deployment = settings.azure_deployment.as_deref().ok_or_else(|| {
                    TranscriptionError::MissingConfiguration(
                        "transcription.azure_deployment is required for azure".to_string(),
                    )
                })?;
                let engine = AzureWhisperEngine::new(
                    base_url,
                    deployment,
                    api_key,
                    &settings.azure_api_version,
                    Some(&settings.language),
                    timeout,
                );
                Ok(Arc::new(engine))
            }
        }
    }
}
