//! Conversation and message types for Ynity.
//!
//! A conversation is an ordered list of messages exchanged between a user
//! and one of the assistant agents. Insertion order is semantic: it is the
//! order in which the history is replayed to the question-answering agent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Maximum number of messages a conversation may hold before the next
/// turn rotates to a fresh conversation.
pub const MAX_CONVERSATION_MESSAGES: usize = 50;

/// Title given to conversations created without one.
pub const DEFAULT_CONVERSATION_TITLE: &str = "New conversation";

/// Author of a message within a conversation.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (role IN ('user', 'bot', 'coach'))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Bot,
    Coach,
}

impl MessageRole {
    /// Speaker label used when the history is rendered into a prompt.
    ///
    /// Both agent roles are replayed as `Assistant`.
    pub fn prompt_label(&self) -> &'static str {
        match self {
            MessageRole::User => "User",
            MessageRole::Bot | MessageRole::Coach => "Assistant",
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Bot => write!(f, "bot"),
            MessageRole::Coach => write!(f, "coach"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "bot" => Ok(MessageRole::Bot),
            "coach" => Ok(MessageRole::Coach),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single message within a conversation.
///
/// Artifact references are independent of each other; any subset may be
/// present. Absent references are omitted from serialized output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_link: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// A plain text message with no artifacts.
    pub fn text(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            audio_url: None,
            image_url: None,
            file_link: None,
            created_at: Utc::now(),
        }
    }

    /// Attach the artifact references produced for a reply.
    pub fn with_artifacts(mut self, artifacts: &ArtifactRefs) -> Self {
        self.audio_url = artifacts.audio_url.clone();
        self.image_url = artifacts.image_url.clone();
        self.file_link = artifacts.file_url.clone();
        self
    }
}

/// Secondary outputs attached to a bot reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactRefs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ArtifactRefs {
    pub fn is_empty(&self) -> bool {
        self.audio_url.is_none() && self.file_url.is_none() && self.image_url.is_none()
    }
}

/// A conversation between one user and the assistant agents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: Uuid,
    pub owner_id: String,
    pub title: Option<String>,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    /// Optimistic concurrency token, bumped on every persisted append.
    #[serde(default)]
    pub version: u64,
}

impl Conversation {
    /// Start an empty, not-yet-persisted conversation for `owner_id`.
    pub fn new(owner_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            owner_id: owner_id.into(),
            title: None,
            messages: Vec::new(),
            created_at: Utc::now(),
            version: 0,
        }
    }

    /// Whether the next turn must rotate to a fresh conversation, given
    /// the configured message ceiling.
    pub fn is_full(&self, max_messages: usize) -> bool {
        self.messages.len() > max_messages
    }
}

/// Lightweight listing entry for a conversation (no message bodies).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    pub id: Uuid,
    pub title: Option<String>,
    pub message_count: u32,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_role_roundtrip() {
        for role in [MessageRole::User, MessageRole::Bot, MessageRole::Coach] {
            let s = role.to_string();
            let parsed: MessageRole = s.parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_message_role_serde() {
        let json = serde_json::to_string(&MessageRole::Coach).unwrap();
        assert_eq!(json, "\"coach\"");
    }

    #[test]
    fn test_prompt_label() {
        assert_eq!(MessageRole::User.prompt_label(), "User");
        assert_eq!(MessageRole::Bot.prompt_label(), "Assistant");
        assert_eq!(MessageRole::Coach.prompt_label(), "Assistant");
    }

    #[test]
    fn test_absent_artifacts_are_omitted() {
        let msg = Message::text(MessageRole::Bot, "Hello");
        let json = serde_json::to_value(&msg).unwrap();
        assert!(json.get("audioUrl").is_none());
        assert!(json.get("imageUrl").is_none());
        assert!(json.get("fileLink").is_none());
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_message_artifacts_use_camel_case_keys() {
        let refs = ArtifactRefs {
            audio_url: Some("/audio/resp-1.mp3".to_string()),
            file_url: Some("/files/reply-1.txt".to_string()),
            image_url: Some("https://img/x.png".to_string()),
        };
        let json = serde_json::to_value(Message::text(MessageRole::Bot, "Here").with_artifacts(&refs)).unwrap();
        assert_eq!(json["audioUrl"], "/audio/resp-1.mp3");
        assert_eq!(json["fileLink"], "/files/reply-1.txt");
        assert_eq!(json["imageUrl"], "https://img/x.png");
    }

    #[test]
    fn test_with_artifacts_maps_file_url_to_file_link() {
        let refs = ArtifactRefs {
            audio_url: None,
            file_url: Some("/files/a.txt".to_string()),
            image_url: Some("https://img/x.png".to_string()),
        };
        let msg = Message::text(MessageRole::Bot, "Here").with_artifacts(&refs);
        assert_eq!(msg.file_link.as_deref(), Some("/files/a.txt"));
        assert_eq!(msg.image_url.as_deref(), Some("https://img/x.png"));
        assert!(msg.audio_url.is_none());
    }

    #[test]
    fn test_is_full_boundary() {
        let mut conv = Conversation::new("user-1");
        for i in 0..MAX_CONVERSATION_MESSAGES {
            conv.messages.push(Message::text(MessageRole::User, format!("m{i}")));
        }
        assert!(!conv.is_full(MAX_CONVERSATION_MESSAGES));
        conv.messages.push(Message::text(MessageRole::Bot, "one more"));
        assert!(conv.is_full(MAX_CONVERSATION_MESSAGES));
    }
}
