//! Caller identity extractor.
//!
//! Authentication happens upstream; the authenticated user's id arrives in
//! the `X-User-Id` header. Requests without it are rejected.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::http::error::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller. Every conversation and chapter is scoped to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: String,
}

impl<S: Send + Sync> FromRequestParts<S> for Caller {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| AppError::Unauthorized("Not authenticated".to_string()))?;

        let user_id = value
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid X-User-Id header encoding".to_string()))?
            .trim();

        if user_id.is_empty() {
            return Err(AppError::Unauthorized("Not authenticated".to_string()));
        }

        Ok(Caller {
            user_id: user_id.to_string(),
        })
    }
}
