//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use ynity_types::error::{
    ChapterError, ChatError, RepositoryError, SummarizeError, TranscriptionError,
};

use crate::http::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    Chat(ChatError),
    Summarize(SummarizeError),
    Chapter(ChapterError),
    Transcription(TranscriptionError),
    /// Missing or malformed caller identity.
    Unauthorized(String),
    Internal(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl From<SummarizeError> for AppError {
    fn from(e: SummarizeError) -> Self {
        AppError::Summarize(e)
    }
}

impl From<ChapterError> for AppError {
    fn from(e: ChapterError) -> Self {
        AppError::Chapter(e)
    }
}

impl From<TranscriptionError> for AppError {
    fn from(e: TranscriptionError) -> Self {
        AppError::Transcription(e)
    }
}

/// Status and code for repository failures shared by every service.
fn repository_status(e: &RepositoryError) -> (StatusCode, &'static str) {
    match e {
        RepositoryError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        RepositoryError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
    }
}

impl AppError {
    /// Status, machine code and client-facing message. Upstream details stay
    /// in the logs.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Chat(ChatError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Chat(ChatError::NotFound) => (
                StatusCode::NOT_FOUND,
                "CONVERSATION_NOT_FOUND",
                "Conversation not found".to_string(),
            ),
            AppError::Chat(ChatError::Upstream(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "UPSTREAM_ERROR",
                "Server error".to_string(),
            ),
            AppError::Chat(ChatError::Artifact(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "ARTIFACT_ERROR",
                "Server error".to_string(),
            ),
            AppError::Chat(ChatError::Repository(e)) => {
                let (status, code) = repository_status(e);
                let message = match e {
                    RepositoryError::Conflict(_) => {
                        "Conversation was modified concurrently, retry the request".to_string()
                    }
                    RepositoryError::NotFound => "Conversation not found".to_string(),
                    _ => "Server error".to_string(),
                };
                (status, code, message)
            }
            AppError::Summarize(SummarizeError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Summarize(SummarizeError::Upstream(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "SUMMARIZATION_FAILED",
                "Summarization failed".to_string(),
            ),
            AppError::Chapter(ChapterError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Chapter(ChapterError::NotFound) => (
                StatusCode::NOT_FOUND,
                "CHAPTER_NOT_FOUND",
                "Chapter not found".to_string(),
            ),
            AppError::Chapter(ChapterError::InvalidContent) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INVALID_CHAPTER_CONTENT",
                "AI did not return valid chapter content. Try again.".to_string(),
            ),
            AppError::Chapter(ChapterError::Upstream(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "UPSTREAM_ERROR",
                "Server error".to_string(),
            ),
            AppError::Chapter(ChapterError::Repository(e)) => {
                let (status, code) = repository_status(e);
                (status, code, "Server error".to_string())
            }
            AppError::Transcription(TranscriptionError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Transcription(TranscriptionError::Upstream(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "TRANSCRIPTION_FAILED",
                "Transcription failed".to_string(),
            ),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Server error".to_string(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        if status.is_server_error() {
            tracing::error!(error = ?self, code, "Request failed");
        } else {
            tracing::debug!(error = ?self, code, "Request rejected");
        }

        (status, ApiResponse::error(code, &message)).into_response()
    }
}
