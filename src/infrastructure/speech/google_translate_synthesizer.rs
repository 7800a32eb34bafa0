use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{SpeechSynthesizer, SynthesisError};

const DEFAULT_BASE_URL: &str = "https://translate.google.com";

/// The endpoint rejects longer inputs.
pub const MAX_SEGMENT_CHARS: usize = 200;

/// Speech through the public Google Translate TTS endpoint.
///
/// Long text is split on whitespace into segments the endpoint accepts;
/// the returned MP3 segments are concatenated in order.
pub struct GoogleTranslateSynthesizer {
    client: reqwest::Client,
    base_url: String,
    language: String,
}

impl GoogleTranslateSynthesizer {
    pub fn new(base_url: Option<String>, language: String, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            language,
        }
    }

    async fn fetch_segment(
        &self,
        segment: &str,
        index: usize,
        total: usize,
    ) -> Result<bytes::Bytes, SynthesisError> {
        let url = format!("{}/translate_tts", self.base_url);
        let index = index.to_string();
        let total = total.to_string();
        let text_len = segment.chars().count().to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", self.language.as_str()),
                ("q", segment),
                ("idx", index.as_str()),
                ("total", total.as_str()),
                ("textlen", text_len.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SynthesisError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(SynthesisError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        response
            .bytes()
            .await
            .map_err(|e| SynthesisError::ApiRequestFailed(format!("body: {}", e)))
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTranslateSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SynthesisError> {
        let segments = split_text(text, MAX_SEGMENT_CHARS);
        if segments.is_empty() {
            return Err(SynthesisError::EmptyText);
        }

        tracing::debug!(
            language = %self.language,
            segments = segments.len(),
            "Sending text to Google Translate TTS"
        );

        let mut audio = Vec::new();
        for (index, segment) in segments.iter().enumerate() {
            let bytes = self.fetch_segment(segment, index, segments.len()).await?;
            audio.extend_from_slice(&bytes);
        }

        if audio.is_empty() {
            return Err(SynthesisError::EmptyAudio);
        }

        tracing::info!(bytes = audio.len(), "Google Translate speech synthesis completed");

        Ok(audio)
    }
}

/// Splits `text` on whitespace into segments of at most `max_chars`
/// characters. Words longer than the limit are cut.
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            segments.extend(chars.chunks(max_chars).map(|c| c.iter().collect::<String>()));
            continue;
        }

        let needed = if current.is_empty() {
            word_len
        } else {
            current_len + 1 + word_len
        };

        if needed > max_chars {
            segments.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_len = needed;
        }
    }

    if !current.is_empty() {
        segments.push(current);
    }

    segments
}
