//! Wire types for the agent services.

use serde::{Deserialize, Serialize};

/// Body of `POST /agent/chat` and `POST /agent/image`.
#[derive(Debug, Serialize)]
pub struct PromptRequest<'a> {
    pub prompt: &'a str,
}

/// Body of `POST /agent/generate-chapter`.
#[derive(Debug, Serialize)]
pub struct ChapterRequest<'a> {
    pub description: &'a str,
}

/// Reply from the chat and chapter endpoints. Agents sometimes omit the
/// field or send an empty string; both mean "no reply".
#[derive(Debug, Default, Deserialize)]
pub struct ReplyResponse {
    #[serde(default)]
    pub reply: Option<String>,
}

impl ReplyResponse {
    pub fn into_reply(self) -> Option<String> {
        self.reply.filter(|r| !r.is_empty())
    }
}

/// Reply from the image endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ImageResponse {
    #[serde(default)]
    pub url: Option<String>,
}
