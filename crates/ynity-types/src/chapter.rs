//! Generated study chapters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum length (in characters, after trimming) of an accepted chapter.
pub const MIN_CHAPTER_CHARS: usize = 50;

/// A chapter generated by the chapter agent and saved for a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: Uuid,
    pub owner_id: String,
    pub description: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Chapter {
    pub fn new(owner_id: impl Into<String>, description: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            owner_id: owner_id.into(),
            description: description.into(),
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}
