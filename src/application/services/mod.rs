mod answer_ranker;
mod snippet_extractor;
mod voice_query_service;

pub use answer_ranker::{RankingError, rank_answers, score_candidates};
pub use snippet_extractor::{DEFAULT_MAX_CANDIDATES, TRUNCATION_MARKER, extract_snippets};
pub use voice_query_service::{
    AdapterFailure, DEFAULT_ADAPTER_TIMEOUT, DEFAULT_FALLBACK_MESSAGE, DEFAULT_NO_SPEECH_MESSAGE,
    PipelineOptions, PipelineStage, VoiceQueryError, VoiceQueryService,
};
