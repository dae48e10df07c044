//! Chapter generation handlers.
//!
//! Endpoints:
//! - POST   /api/ai/chapter      - Generate and save a chapter
//! - GET    /api/ai/chapters     - List the caller's chapters, newest first
//! - DELETE /api/ai/chapter/{id} - Delete one chapter

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ynity_types::chapter::Chapter;

use crate::http::error::AppError;
use crate::http::extractors::caller::Caller;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateChapterRequest {
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct DeletedChapter {
    pub id: Uuid,
    pub deleted: bool,
}

/// POST /api/ai/chapter
pub async fn generate_chapter(
    State(state): State<AppState>,
    caller: Caller,
    Json(request): Json<GenerateChapterRequest>,
) -> Result<Json<ApiResponse<Chapter>>, AppError> {
    let timer = RequestTimer::start();
    let chapter = state
        .chapter_service
        .generate(&caller.user_id, &request.description)
        .await?;
    Ok(Json(timer.success(chapter).with_link("list", "/api/ai/chapters")))
}

/// GET /api/ai/chapters
pub async fn list_chapters(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<ApiResponse<Vec<Chapter>>>, AppError> {
    let timer = RequestTimer::start();
    let chapters = state.chapter_service.list(&caller.user_id).await?;
    Ok(Json(timer.success(chapters)))
}

/// DELETE /api/ai/chapter/{id}
pub async fn delete_chapter(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeletedChapter>>, AppError> {
    let timer = RequestTimer::start();
    state.chapter_service.delete(&id, &caller.user_id).await?;
    Ok(Json(timer.success(DeletedChapter { id, deleted: true })))
}
