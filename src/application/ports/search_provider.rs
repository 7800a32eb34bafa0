use async_trait::async_trait;

use crate::domain::SearchResultSet;

#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<SearchResultSet, SearchProviderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SearchProviderError {
    #[error("missing configuration: {0}")]
    MissingConfiguration(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
