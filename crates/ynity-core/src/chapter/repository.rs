//! ChapterRepository trait definition.

use uuid::Uuid;

use ynity_types::chapter::Chapter;
use ynity_types::error::RepositoryError;

/// Repository trait for chapter persistence.
///
/// Implementations live in ynity-infra (e.g., `SqliteChapterRepository`).
pub trait ChapterRepository: Send + Sync {
    fn save(
        &self,
        chapter: &Chapter,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// The owner's chapters, newest first.
    fn list_for_owner(
        &self,
        owner_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Chapter>, RepositoryError>> + Send;

    /// Delete one chapter. Returns `false` if it is missing or foreign.
    fn delete(
        &self,
        id: &Uuid,
        owner_id: &str,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;
}
