//! ElevenLabs-style text-to-speech client.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use ynity_types::config::VoiceConfig;
use ynity_types::error::ArtifactError;

#[derive(Serialize)]
struct SpeechRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

/// `POST {base}/v1/text-to-speech/{voice_id}` returning encoded audio.
pub struct SpeechSynthesizer {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    base_url: String,
    voice_id: String,
    model_id: String,
}

impl SpeechSynthesizer {
    /// A missing key is allowed at startup; every synthesis call then fails.
    pub fn new(client: reqwest::Client, api_key: Option<SecretString>, config: &VoiceConfig) -> Self {
        Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            voice_id: config.voice_id.clone(),
            model_id: config.model_id.clone(),
        }
    }

    #[tracing::instrument(name = "synthesize_speech", skip_all, fields(voice_id = %self.voice_id, chars = text.chars().count()))]
    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>, ArtifactError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| ArtifactError::Voice("ELEVENLABS_API_KEY is not set".to_string()))?;

        let response = self
            .client
            .post(format!("{}/v1/text-to-speech/{}", self.base_url, self.voice_id))
            .header("xi-api-key", api_key.expose_secret())
            .header("accept", "audio/mpeg")
            .json(&SpeechRequest {
                text,
                model_id: &self.model_id,
            })
            .send()
            .await
            .map_err(|e| ArtifactError::Voice(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ArtifactError::Voice(format!("HTTP {status}: {body}")));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ArtifactError::Voice(format!("failed to read audio: {e}")))?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn synthesizer(server: &MockServer, key: Option<&str>) -> SpeechSynthesizer {
        let config = VoiceConfig {
            base_url: server.uri(),
            voice_id: "voice-1".to_string(),
            model_id: "model-1".to_string(),
        };
        SpeechSynthesizer::new(reqwest::Client::new(), key.map(SecretString::from), &config)
    }

    #[tokio::test]
    async fn test_synthesize_returns_audio_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/text-to-speech/voice-1"))
            .and(header("xi-api-key", "k"))
            .and(body_json(json!({"text": "Hello", "model_id": "model-1"})))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ID3audio".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let audio = synthesizer(&server, Some("k")).synthesize("Hello").await.unwrap();
        assert_eq!(audio, b"ID3audio");
    }

    #[tokio::test]
    async fn test_non_success_is_voice_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("quota_exceeded"))
            .mount(&server)
            .await;

        match synthesizer(&server, Some("k")).synthesize("Hello").await {
            Err(ArtifactError::Voice(msg)) => assert!(msg.contains("quota_exceeded")),
            other => panic!("expected voice error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_calling() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        assert!(matches!(
            synthesizer(&server, None).synthesize("Hello").await,
            Err(ArtifactError::Voice(_))
        ));
    }
}
