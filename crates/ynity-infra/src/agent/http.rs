//! HttpAgentClient: one base URL, JSON in and out.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use ynity_core::agent::client::{AgentClient, ChapterAgent};
use ynity_types::error::AgentError;

use super::types::{ChapterRequest, ImageResponse, PromptRequest, ReplyResponse};

/// Client for one agent service (`coach`, `assistant`, `image`, `chapter`).
#[derive(Clone)]
pub struct HttpAgentClient {
    client: reqwest::Client,
    name: String,
    base_url: String,
}

impl HttpAgentClient {
    pub fn new(client: reqwest::Client, name: impl Into<String>, base_url: &str) -> Self {
        Self {
            client,
            name: name.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, AgentError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| AgentError::Transport(format!("{} agent unreachable: {e}", self.name)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AgentError::Deserialization(format!("{} agent reply: {e}", self.name)))
    }

    /// `POST /agent/image`. Any failure, or a reply without a URL, is `None`.
    #[tracing::instrument(name = "agent_image", skip(self, prompt), fields(agent = %self.name))]
    pub async fn generate_image(&self, prompt: &str) -> Option<String> {
        match self
            .post_json::<_, ImageResponse>("/agent/image", &PromptRequest { prompt })
            .await
        {
            Ok(resp) => {
                if resp.url.is_none() {
                    tracing::warn!("Image agent reply carried no url");
                }
                resp.url.filter(|u| !u.is_empty())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Image agent call failed");
                None
            }
        }
    }
}

impl AgentClient for HttpAgentClient {
    fn name(&self) -> &str {
        &self.name
    }

    #[tracing::instrument(name = "agent_chat", skip(self, prompt), fields(agent = %self.name))]
    async fn chat(&self, prompt: &str) -> Result<Option<String>, AgentError> {
        let resp: ReplyResponse = self.post_json("/agent/chat", &PromptRequest { prompt }).await?;
        let reply = resp.into_reply();
        debug!(has_reply = reply.is_some(), "Agent replied");
        Ok(reply)
    }
}

impl ChapterAgent for HttpAgentClient {
    #[tracing::instrument(name = "agent_generate_chapter", skip(self, description), fields(agent = %self.name))]
    async fn generate_chapter(&self, description: &str) -> Result<Option<String>, AgentError> {
        let resp: ReplyResponse = self
            .post_json("/agent/generate-chapter", &ChapterRequest { description })
            .await?;
        Ok(resp.into_reply())
    }
}
