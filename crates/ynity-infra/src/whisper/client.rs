//! WhisperTranscriptionClient -- [`TranscriptionClient`] over a multipart
//! `POST {base}/audio/transcriptions`.

use reqwest::multipart::{Form, Part};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use ynity_core::transcribe::client::{AudioUpload, TranscriptionClient};
use ynity_types::config::TranscriptionConfig;
use ynity_types::error::TranscriptionError;

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    #[serde(default)]
    text: String,
}

// No Debug derive: keeps the key out of logs entirely.
pub struct WhisperTranscriptionClient {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    base_url: String,
    model: String,
}

impl WhisperTranscriptionClient {
    /// A missing key is allowed at startup; every call then fails upstream.
    pub fn new(
        client: reqwest::Client,
        api_key: Option<SecretString>,
        config: &TranscriptionConfig,
    ) -> Self {
        Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        }
    }
}

impl TranscriptionClient for WhisperTranscriptionClient {
    #[tracing::instrument(name = "whisper_transcribe", skip_all, fields(model = %self.model))]
    async fn transcribe(&self, audio: AudioUpload) -> Result<String, TranscriptionError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| TranscriptionError::Upstream("OPENAI_API_KEY is not set".to_string()))?;

        let mut file = Part::bytes(audio.bytes).file_name(audio.file_name);
        if let Some(mime) = audio.content_type.as_deref() {
            file = file
                .mime_str(mime)
                .map_err(|e| TranscriptionError::Validation(format!("invalid content type: {e}")))?;
        }
        let form = Form::new()
            .part("file", file)
            .text("model", self.model.clone());

        let response = self
            .client
            .post(format!("{}/audio/transcriptions", self.base_url))
            .bearer_auth(api_key.expose_secret())
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::Upstream(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranscriptionError::Upstream(format!("HTTP {status}: {body}")));
        }

        let parsed: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::Upstream(format!("failed to parse response: {e}")))?;
        Ok(parsed.text.trim().to_string())
    }
}
