//! Agent client trait definitions.
//!
//! Uses RPITIT, like the repository traits. Implementations live in
//! ynity-infra (e.g., `HttpAgentClient`).

use ynity_types::error::AgentError;

/// A remote agent reachable through a single prompt -> reply call.
///
/// `Ok(None)` means the agent answered but returned no reply text; callers
/// substitute their own fallback. Transport and HTTP failures are `Err`.
pub trait AgentClient: Send + Sync {
    /// Short name used in logs (e.g., "coach", "assistant").
    fn name(&self) -> &str;

    /// Send one prompt and wait for the agent's reply.
    fn chat(
        &self,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, AgentError>> + Send;
}

/// The chapter-writing agent (`POST /agent/generate-chapter`).
pub trait ChapterAgent: Send + Sync {
    fn generate_chapter(
        &self,
        description: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, AgentError>> + Send;
}
