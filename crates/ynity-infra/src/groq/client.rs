//! GroqCompletionClient -- [`CompletionClient`] over `POST {base}/chat/completions`.
//!
//! The API key is held as a [`SecretString`] and only exposed when the
//! bearer header is built.

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};

use ynity_core::summarize::completion::CompletionClient;
use ynity_types::config::SummarizerConfig;
use ynity_types::error::CompletionError;

use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

/// Marker the backend puts in the error body when a quota is exhausted.
const RATE_LIMIT_MARKER: &str = "rate_limit_exceeded";

// No Debug derive: keeps the key out of logs entirely.
pub struct GroqCompletionClient {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    base_url: String,
    model: String,
    temperature: f64,
    max_tokens: u32,
}

impl GroqCompletionClient {
    /// A missing key is allowed at startup; every call then fails upstream.
    pub fn new(
        client: reqwest::Client,
        api_key: Option<SecretString>,
        config: &SummarizerConfig,
    ) -> Self {
        Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}

impl CompletionClient for GroqCompletionClient {
    #[tracing::instrument(name = "chat_completion", skip_all, fields(model = %self.model))]
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, CompletionError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| CompletionError::Upstream("GROQ_API_KEY is not set".to_string()))?;

        let body = ChatCompletionRequest {
            model: &self.model,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Upstream(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| CompletionError::Upstream(format!("failed to read response: {e}")))?;

        if !status.is_success() {
            if status == StatusCode::TOO_MANY_REQUESTS || text.contains(RATE_LIMIT_MARKER) {
                return Err(CompletionError::RateLimited { detail: text });
            }
            return Err(CompletionError::Upstream(text));
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&text)
            .map_err(|e| CompletionError::Upstream(format!("failed to parse response: {e}")))?;
        Ok(parsed.first_content())
    }
}
