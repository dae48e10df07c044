//! CompletionClient trait definition.

use ynity_types::error::CompletionError;

/// A chat-completion backend (system + user message in, text out).
///
/// Implementations live in ynity-infra (e.g., `GroqCompletionClient`) and
/// must report rate limiting as `CompletionError::RateLimited` carrying the
/// raw error text.
pub trait CompletionClient: Send + Sync {
    fn complete(
        &self,
        system: &str,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<String, CompletionError>> + Send;
}
