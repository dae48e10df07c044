//! SQLite conversation repository implementation.
//!
//! Implements `ConversationRepository` from `ynity-core`. Messages live in
//! `conversation_messages` keyed by `(conversation_id, position)`, so the
//! replay order is the insertion order. Appends are guarded by the
//! conversation's `version` column.

use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use uuid::Uuid;

use ynity_core::chat::repository::ConversationRepository;
use ynity_types::conversation::{Conversation, ConversationSummary, Message, MessageRole};
use ynity_types::error::RepositoryError;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime, query_error};

/// SQLite-backed implementation of `ConversationRepository`.
#[derive(Clone)]
pub struct SqliteConversationRepository {
    pool: DatabasePool,
}

impl SqliteConversationRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    async fn load_messages(&self, conversation_id: &str) -> Result<Vec<Message>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM conversation_messages WHERE conversation_id = ? ORDER BY position ASC",
        )
        .bind(conversation_id)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_error)?;

        rows.iter()
            .map(|row| MessageRow::from_row(row).map_err(query_error)?.into_message())
            .collect()
    }

    async fn hydrate(&self, row: Option<SqliteRow>) -> Result<Option<Conversation>, RepositoryError> {
        let Some(row) = row else {
            return Ok(None);
        };
        let conversation_row = ConversationRow::from_row(&row).map_err(query_error)?;
        let messages = self.load_messages(&conversation_row.id).await?;
        Ok(Some(conversation_row.into_conversation(messages)?))
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct ConversationRow {
    id: String,
    owner_id: String,
    title: Option<String>,
    created_at: String,
    version: i64,
}

impl ConversationRow {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            owner_id: row.try_get("owner_id")?,
            title: row.try_get("title")?,
            created_at: row.try_get("created_at")?,
            version: row.try_get("version")?,
        })
    }

    fn into_conversation(self, messages: Vec<Message>) -> Result<Conversation, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid conversation id: {e}")))?;

        Ok(Conversation {
            id,
            owner_id: self.owner_id,
            title: self.title,
            messages,
            created_at: parse_datetime(&self.created_at)?,
            version: self.version as u64,
        })
    }
}

struct MessageRow {
    role: String,
    content: String,
    audio_url: Option<String>,
    image_url: Option<String>,
    file_link: Option<String>,
    created_at: String,
}

impl MessageRow {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            role: row.try_get("role")?,
            content: row.try_get("content")?,
            audio_url: row.try_get("audio_url")?,
            image_url: row.try_get("image_url")?,
            file_link: row.try_get("file_link")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_message(self) -> Result<Message, RepositoryError> {
        let role: MessageRole = self
            .role
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;

        Ok(Message {
            role,
            content: self.content,
            audio_url: self.audio_url,
            image_url: self.image_url,
            file_link: self.file_link,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

async fn insert_messages(
    tx: &mut sqlx::SqliteConnection,
    conversation_id: &str,
    first_position: i64,
    messages: &[Message],
) -> Result<(), RepositoryError> {
    for (offset, message) in messages.iter().enumerate() {
        sqlx::query(
            r#"INSERT INTO conversation_messages (conversation_id, position, role, content, audio_url, image_url, file_link, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(conversation_id)
        .bind(first_position + offset as i64)
        .bind(message.role.to_string())
        .bind(&message.content)
        .bind(&message.audio_url)
        .bind(&message.image_url)
        .bind(&message.file_link)
        .bind(format_datetime(&message.created_at))
        .execute(&mut *tx)
        .await
        .map_err(query_error)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// ConversationRepository implementation
// ---------------------------------------------------------------------------

impl ConversationRepository for SqliteConversationRepository {
    async fn create(&self, conversation: &Conversation) -> Result<(), RepositoryError> {
        let id = conversation.id.to_string();
        let mut tx = self.pool.writer.begin().await.map_err(query_error)?;

        sqlx::query(
            "INSERT INTO conversations (id, owner_id, title, created_at, version) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&conversation.owner_id)
        .bind(&conversation.title)
        .bind(format_datetime(&conversation.created_at))
        .bind(conversation.version as i64)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.message().contains("UNIQUE") {
                    return RepositoryError::Conflict(format!(
                        "conversation {} already exists",
                        conversation.id
                    ));
                }
            }
            query_error(e)
        })?;

        insert_messages(&mut *tx, &id, 0, &conversation.messages).await?;

        tx.commit().await.map_err(query_error)?;
        Ok(())
    }

    async fn find_by_id_and_owner(
        &self,
        id: &Uuid,
        owner_id: &str,
    ) -> Result<Option<Conversation>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM conversations WHERE id = ? AND owner_id = ?")
            .bind(id.to_string())
            .bind(owner_id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        self.hydrate(row).await
    }

    async fn latest_for_owner(&self, owner_id: &str) -> Result<Option<Conversation>, RepositoryError> {
        let row = sqlx::query(
            "SELECT * FROM conversations WHERE owner_id = ? ORDER BY created_at DESC, id DESC LIMIT 1",
        )
        .bind(owner_id)
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(query_error)?;

        self.hydrate(row).await
    }

    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<ConversationSummary>, RepositoryError> {
        let rows = sqlx::query(
            r#"SELECT c.id, c.title, c.created_at,
                      (SELECT COUNT(*) FROM conversation_messages m WHERE m.conversation_id = c.id) AS message_count
               FROM conversations c
               WHERE c.owner_id = ?
               ORDER BY c.created_at DESC, c.id DESC"#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_error)?;

        let mut summaries = Vec::with_capacity(rows.len());
        for row in &rows {
            let id: String = row.try_get("id").map_err(query_error)?;
            let created_at: String = row.try_get("created_at").map_err(query_error)?;
            let message_count: i64 = row.try_get("message_count").map_err(query_error)?;
            summaries.push(ConversationSummary {
                id: Uuid::parse_str(&id)
                    .map_err(|e| RepositoryError::Query(format!("invalid conversation id: {e}")))?,
                title: row.try_get("title").map_err(query_error)?,
                message_count: message_count as u32,
                created_at: parse_datetime(&created_at)?,
            });
        }

        Ok(summaries)
    }

    async fn append_messages(
        &self,
        id: &Uuid,
        expected_version: u64,
        messages: &[Message],
    ) -> Result<u64, RepositoryError> {
        let id = id.to_string();
        let mut tx = self.pool.writer.begin().await.map_err(query_error)?;

        let bumped = sqlx::query(
            "UPDATE conversations SET version = version + 1 WHERE id = ? AND version = ?",
        )
        .bind(&id)
        .bind(expected_version as i64)
        .execute(&mut *tx)
        .await
        .map_err(query_error)?;

        if bumped.rows_affected() == 0 {
            let current: Option<(i64,)> =
                sqlx::query_as("SELECT version FROM conversations WHERE id = ?")
                    .bind(&id)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(query_error)?;

            return Err(match current {
                None => RepositoryError::NotFound,
                Some((version,)) => RepositoryError::Conflict(format!(
                    "conversation {id} is at version {version}, expected {expected_version}"
                )),
            });
        }

        let (next_position,): (i64,) = sqlx::query_as(
            "SELECT COALESCE(MAX(position) + 1, 0) FROM conversation_messages WHERE conversation_id = ?",
        )
        .bind(&id)
        .fetch_one(&mut *tx)
        .await
        .map_err(query_error)?;

        insert_messages(&mut *tx, &id, next_position, messages).await?;

        tx.commit().await.map_err(query_error)?;
        Ok(expected_version + 1)
    }

    async fn update_title(&self, id: &Uuid, owner_id: &str, title: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query("UPDATE conversations SET title = ? WHERE id = ? AND owner_id = ?")
            .bind(title)
            .bind(id.to_string())
            .bind(owner_id)
            .execute(&self.pool.writer)
            .await
            .map_err(query_error)?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete(&self, id: &Uuid, owner_id: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM conversations WHERE id = ? AND owner_id = ?")
            .bind(id.to_string())
            .bind(owner_id)
            .execute(&self.pool.writer)
            .await
            .map_err(query_error)?;

        Ok(result.rows_affected() == 1)
    }
}
