//! Chapter service: generate a chapter through the chapter agent and keep
//! it for the requesting user.

use tracing::{info, warn};
use uuid::Uuid;

use ynity_types::chapter::{Chapter, MIN_CHAPTER_CHARS};
use ynity_types::error::ChapterError;

use crate::agent::client::ChapterAgent;
use crate::chapter::repository::ChapterRepository;

pub struct ChapterService<R: ChapterRepository, G: ChapterAgent> {
    repo: R,
    agent: G,
}

impl<R: ChapterRepository, G: ChapterAgent> ChapterService<R, G> {
    pub fn new(repo: R, agent: G) -> Self {
        Self { repo, agent }
    }

    /// Generate and save a chapter for `description`.
    ///
    /// Replies shorter than [`MIN_CHAPTER_CHARS`] after trimming are
    /// rejected and nothing is saved.
    #[tracing::instrument(name = "generate_chapter", skip(self, description))]
    pub async fn generate(&self, owner_id: &str, description: &str) -> Result<Chapter, ChapterError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(ChapterError::Validation("Description required".to_string()));
        }

        let reply = self.agent.generate_chapter(description).await?;
        let content = reply.as_deref().map(str::trim).unwrap_or_default();
        if content.chars().count() < MIN_CHAPTER_CHARS {
            warn!(chars = content.chars().count(), "Chapter agent returned empty or invalid content");
            return Err(ChapterError::InvalidContent);
        }

        let chapter = Chapter::new(owner_id, description, content);
        self.repo.save(&chapter).await?;
        info!(chapter_id = %chapter.id, "Chapter generated and saved");
        Ok(chapter)
    }

    pub async fn list(&self, owner_id: &str) -> Result<Vec<Chapter>, ChapterError> {
        Ok(self.repo.list_for_owner(owner_id).await?)
    }

    /// Delete a chapter owned by `owner_id`.
    pub async fn delete(&self, id: &Uuid, owner_id: &str) -> Result<(), ChapterError> {
        if self.repo.delete(id, owner_id).await? {
            Ok(())
        } else {
            Err(ChapterError::NotFound)
        }
    }
}
