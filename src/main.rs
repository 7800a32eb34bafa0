use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use voxanswer::application::ports::{AudioDecoder, AudioStore, SearchProvider};
use voxanswer::application::services::VoiceQueryService;
use voxanswer::infrastructure::audio::{SymphoniaAudioDecoder, TranscriptionEngineFactory};
use voxanswer::infrastructure::observability::{TracingConfig, init_tracing};
use voxanswer::infrastructure::search::SerperSearchProvider;
use voxanswer::infrastructure::speech::SpeechSynthesizerFactory;
use voxanswer::infrastructure::storage::LocalAudioStore;
use voxanswer::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("failed to load settings")?;

    init_tracing(&TracingConfig::from_settings(environment, &settings.logging));

    let adapter_timeout = settings.pipeline.adapter_timeout();

    let audio_decoder: Arc<dyn AudioDecoder> = Arc::new(SymphoniaAudioDecoder);
    let transcription_engine =
        TranscriptionEngineFactory::create(&settings.transcription, adapter_timeout)
            .context("failed to configure transcription")?;
    let search_provider: Arc<dyn SearchProvider> = Arc::new(
        SerperSearchProvider::from_settings(&settings.search, adapter_timeout)
            .context("failed to configure search")?,
    );
    let speech_synthesizer = SpeechSynthesizerFactory::create(&settings.synthesis, adapter_timeout)
        .context("failed to configure speech synthesis")?;
    let audio_store: Arc<dyn AudioStore> = Arc::new(
        LocalAudioStore::new(PathBuf::from(&settings.storage.local_path))
            .context("failed to open audio storage")?,
    );

    tracing::info!(
        transcription = ?settings.transcription.provider,
        synthesis = ?settings.synthesis.provider,
        storage = %settings.storage.local_path,
        max_candidates = settings.pipeline.max_candidates,
        adapter_timeout_secs = settings.pipeline.adapter_timeout_secs,
        "Adapters configured"
    );

    let voice_query_service = Arc::new(VoiceQueryService::new(
        audio_decoder,
        transcription_engine,
        search_provider,
        speech_synthesizer,
        Arc::clone(&audio_store),
        settings.pipeline.to_options(),
    ));

    let state = AppState {
        voice_query_service,
        audio_store,
        public_base_url: settings.server.public_base_url.clone(),
        max_upload_bytes: settings
            .server
            .max_upload_bytes()
            .context("Invalid upload size limit")?,
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("invalid server address")?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
