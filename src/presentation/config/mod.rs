mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    LoggingSettings, PipelineSettings, SearchSettings, ServerSettings, Settings,
    StorageSettings, SynthesisProviderSetting, SynthesisSettings, TranscriptionProviderSetting,
    TranscriptionSettings,
};
