use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::application::ports::{SearchProvider, SearchProviderError};
use crate::domain::SearchResultSet;
use crate::presentation::config::SearchSettings;

const DEFAULT_BASE_URL: &str = "https://google.serper.dev";
const API_KEY_HEADER: &str = "X-API-KEY";

/// Web search through a Serper-compatible API.
pub struct SerperSearchProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    locale: String,
    language: String,
    engine: String,
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    q: &'a str,
    gl: &'a str,
    hl: &'a str,
    engine: &'a str,
}

impl SerperSearchProvider {
    pub fn new(
        api_key: String,
        base_url: Option<String>,
        locale: String,
        language: String,
        engine: String,
        timeout: Duration,
    ) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            api_key,
            locale,
            language,
            engine,
        }
    }

    pub fn from_settings(
        settings: &SearchSettings,
        timeout: Duration,
    ) -> Result<Self, SearchProviderError> {
        if settings.api_key.is_empty() {
            return Err(SearchProviderError::MissingConfiguration(
                "search.api_key is required".to_string(),
            ));
        }
        Ok(Self::new(
            settings.api_key.clone(),
            settings.base_url.clone(),
            settings.locale.clone(),
            settings.language.clone(),
            settings.engine.clone(),
            timeout,
        ))
    }
}

#[async_trait]
impl SearchProvider for SerperSearchProvider {
    async fn search(&self, query: &str) -> Result<SearchResultSet, SearchProviderError> {
        let url = format!("{}/search", self.base_url);
        let payload = SearchRequest {
            q: query,
            gl: &self.locale,
            hl: &self.language,
            engine: &self.engine,
        };

        tracing::debug!(locale = %self.locale, language = %self.language, "Sending web search request");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| SearchProviderError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(SearchProviderError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let results: SearchResultSet = response
            .json()
            .await
            .map_err(|e| SearchProviderError::InvalidResponse(format!("parse response: {}", e)))?;

        tracing::info!(
            answer_box = results.answer_box.is_some(),
            organic = results.organic.len(),
            "Web search completed"
        );

        Ok(results)
    }
}
