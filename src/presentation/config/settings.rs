use std::path::Path;
use std::time::Duration;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::application::services::{
    DEFAULT_FALLBACK_MESSAGE, DEFAULT_NO_SPEECH_MESSAGE, PipelineOptions,
};

use super::Environment;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub search: SearchSettings,
    pub transcription: TranscriptionSettings,
    pub synthesis: SynthesisSettings,
    pub storage: StorageSettings,
    pub pipeline: PipelineSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Loads settings from the working directory and `APP_*` variables.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Self::load_from(environment, Path::new("."))
    }

    /// Layers `appsettings.toml`, `appsettings.{environment}.toml` and then
    /// environment variables such as `APP_SEARCH__API_KEY`.
    pub fn load_from(environment: Environment, dir: &Path) -> Result<Self, ConfigError> {
        let base = dir.join("appsettings");
        let per_environment = dir.join(format!(
            "appsettings.{}",
            environment.as_str().to_lowercase()
        ));

        Config::builder()
            .add_source(File::with_name(&base.to_string_lossy()).required(false))
            .add_source(File::with_name(&per_environment.to_string_lossy()).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Base for returned audio URLs; derived from the request `Host` when unset.
    pub public_base_url: Option<String>,
    pub max_upload_size_mb: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            public_base_url: None,
            max_upload_size_mb: 25,
        }
    }
}

impl ServerSettings {
    pub fn max_upload_bytes(&self) -> Result<usize, ConfigError> {
        self.max_upload_size_mb
            .checked_mul(1024 * 1024)
            .ok_or_else(|| ConfigError::Message("server.max_upload_size_mb is too large".into()))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub api_key: String,
    pub base_url: Option<String>,
    pub locale: String,
    pub language: String,
    pub engine: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: None,
            locale: "vn".to_string(),
            language: "vi".to_string(),
            engine: "google".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptionProviderSetting {
    #[serde(rename = "openai")]
    OpenAi,
    Azure,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranscriptionSettings {
    pub provider: TranscriptionProviderSetting,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: String,
    pub language: String,
    pub azure_deployment: Option<String>,
    pub azure_api_version: String,
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            provider: TranscriptionProviderSetting::OpenAi,
            api_key: None,
            base_url: None,
            model: "whisper-1".to_string(),
            language: "vi-VN".to_string(),
            azure_deployment: None,
            azure_api_version: "2024-06-01".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SynthesisProviderSetting {
    Google,
    #[serde(rename = "openai")]
    OpenAi,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SynthesisSettings {
    pub provider: SynthesisProviderSetting,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: String,
    pub voice: String,
    pub language: String,
}

impl Default for SynthesisSettings {
    fn default() -> Self {
        Self {
            provider: SynthesisProviderSetting::Google,
            api_key: None,
            base_url: None,
            model: "tts-1".to_string(),
            voice: "alloy".to_string(),
            language: "vi".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub local_path: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            local_path: "./uploads".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    pub max_candidates: usize,
    pub adapter_timeout_secs: u64,
    pub fallback_message: String,
    pub no_speech_message: String,
}

impl PipelineSettings {
    pub fn adapter_timeout(&self) -> Duration {
        Duration::from_secs(self.adapter_timeout_secs)
    }

    pub fn to_options(&self) -> PipelineOptions {
        PipelineOptions {
            max_candidates: self.max_candidates,
            adapter_timeout: self.adapter_timeout(),
            fallback_message: self.fallback_message.clone(),
            no_speech_message: self.no_speech_message.clone(),
        }
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        let options = PipelineOptions::default();
        Self {
            max_candidates: options.max_candidates,
            adapter_timeout_secs: options.adapter_timeout.as_secs(),
            fallback_message: DEFAULT_FALLBACK_MESSAGE.to_string(),
            no_speech_message: DEFAULT_NO_SPEECH_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            enable_json: false,
        }
    }
}
