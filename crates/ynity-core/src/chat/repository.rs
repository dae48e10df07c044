//! ConversationRepository trait definition.
//!
//! Every lookup is scoped by owner: a conversation that belongs to someone
//! else behaves exactly like a missing one.

use uuid::Uuid;

use ynity_types::conversation::{Conversation, ConversationSummary, Message};
use ynity_types::error::RepositoryError;

/// Repository trait for conversation persistence.
///
/// Implementations live in ynity-infra (e.g., `SqliteConversationRepository`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait ConversationRepository: Send + Sync {
    /// Persist a new conversation together with its initial messages.
    fn create(
        &self,
        conversation: &Conversation,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Load a conversation with all its messages in insertion order.
    fn find_by_id_and_owner(
        &self,
        id: &Uuid,
        owner_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Conversation>, RepositoryError>> + Send;

    /// The owner's most recently created conversation, if any.
    fn latest_for_owner(
        &self,
        owner_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Conversation>, RepositoryError>> + Send;

    /// All of the owner's conversations, newest first.
    fn list_for_owner(
        &self,
        owner_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<ConversationSummary>, RepositoryError>> + Send;

    /// Append messages to an existing conversation.
    ///
    /// Succeeds only if the stored version still equals `expected_version`;
    /// otherwise returns `RepositoryError::Conflict` and writes nothing.
    /// Returns the new version.
    fn append_messages(
        &self,
        id: &Uuid,
        expected_version: u64,
        messages: &[Message],
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;

    /// Rename a conversation. Returns `false` if it is missing or foreign.
    fn update_title(
        &self,
        id: &Uuid,
        owner_id: &str,
        title: &str,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;

    /// Delete a conversation and its messages. Returns whether a row was removed.
    fn delete(
        &self,
        id: &Uuid,
        owner_id: &str,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;
}
