//! SQLite chapter repository implementation.

use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use uuid::Uuid;

use ynity_core::chapter::repository::ChapterRepository;
use ynity_types::chapter::Chapter;
use ynity_types::error::RepositoryError;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime, query_error};

/// SQLite-backed implementation of `ChapterRepository`.
#[derive(Clone)]
pub struct SqliteChapterRepository {
    pool: DatabasePool,
}

impl SqliteChapterRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct ChapterRow {
    id: String,
    owner_id: String,
    description: String,
    content: String,
    created_at: String,
}

impl ChapterRow {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            owner_id: row.try_get("owner_id")?,
            description: row.try_get("description")?,
            content: row.try_get("content")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_chapter(self) -> Result<Chapter, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid chapter id: {e}")))?;

        Ok(Chapter {
            id,
            owner_id: self.owner_id,
            description: self.description,
            content: self.content,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

impl ChapterRepository for SqliteChapterRepository {
    async fn save(&self, chapter: &Chapter) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO chapters (id, owner_id, description, content, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(chapter.id.to_string())
        .bind(&chapter.owner_id)
        .bind(&chapter.description)
        .bind(&chapter.content)
        .bind(format_datetime(&chapter.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;

        Ok(())
    }

    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<Chapter>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM chapters WHERE owner_id = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_error)?;

        let mut chapters = Vec::with_capacity(rows.len());
        for row in &rows {
            chapters.push(ChapterRow::from_row(row).map_err(query_error)?.into_chapter()?);
        }
        Ok(chapters)
    }

    async fn delete(&self, id: &Uuid, owner_id: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM chapters WHERE id = ? AND owner_id = ?")
            .bind(id.to_string())
            .bind(owner_id)
            .execute(&self.pool.writer)
            .await
            .map_err(query_error)?;

        Ok(result.rows_affected() == 1)
    }
}
