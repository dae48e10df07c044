use thiserror::Error;

/// Errors from repository operations (used by trait definitions in ynity-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors from calls to an external chat agent.
#[derive(Debug, Clone, Error)]
pub enum AgentError {
    #[error("agent request failed: {0}")]
    Transport(String),

    #[error("agent returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid agent response: {0}")]
    Deserialization(String),
}

/// Errors from the summarization chat-completion backend.
#[derive(Debug, Clone, Error)]
pub enum CompletionError {
    /// Recoverable: the backend asked us to slow down. `detail` is the raw
    /// error body, which may carry a "try again in Ns" hint.
    #[error("rate limited: {detail}")]
    RateLimited { detail: String },

    /// Any other failure; fatal for the current job.
    #[error("{0}")]
    Upstream(String),
}

/// Errors from artifact backends whose failure aborts a turn.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("voice synthesis failed: {0}")]
    Voice(String),

    #[error("document generation failed: {0}")]
    Document(String),

    #[error("artifact storage failed: {0}")]
    Storage(String),
}

/// Errors surfaced by a chat turn or conversation management call.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("{0}")]
    Validation(String),

    #[error("conversation not found")]
    NotFound,

    #[error("upstream agent error: {0}")]
    Upstream(#[from] AgentError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Errors from speech-to-text transcription.
#[derive(Debug, Error)]
pub enum TranscriptionError {
    #[error("{0}")]
    Validation(String),

    #[error("transcription backend error: {0}")]
    Upstream(String),
}

/// Errors surfaced by the summarization pipeline. Never carries a partial
/// result.
#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("{0}")]
    Validation(String),

    #[error("summarization backend error: {0}")]
    Upstream(CompletionError),
}

/// Errors from chapter generation and management.
#[derive(Debug, Error)]
pub enum ChapterError {
    #[error("{0}")]
    Validation(String),

    #[error("chapter not found")]
    NotFound,

    #[error("agent did not return valid chapter content")]
    InvalidContent,

    #[error("upstream agent error: {0}")]
    Upstream(#[from] AgentError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_agent_status_error_display() {
        let err = AgentError::Status {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "agent returned HTTP 502: bad gateway");
    }

    #[test]
    fn test_chat_error_from_agent_error() {
        let err: ChatError = AgentError::Transport("connection refused".to_string()).into();
        assert!(matches!(err, ChatError::Upstream(_)));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_upstream_completion_error_keeps_raw_detail() {
        let err = SummarizeError::Upstream(CompletionError::Upstream(
            "{\"error\":\"model_not_found\"}".to_string(),
        ));
        assert!(err.to_string().contains("model_not_found"));
    }
}
