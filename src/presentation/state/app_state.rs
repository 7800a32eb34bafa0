use std::sync::Arc;

use crate::application::ports::AudioStore;
use crate::application::services::VoiceQueryService;

#[derive(Clone)]
pub struct AppState {
    pub voice_query_service: Arc<VoiceQueryService>,
    pub audio_store: Arc<dyn AudioStore>,
    pub public_base_url: Option<String>,
    pub max_upload_bytes: usize,
}
