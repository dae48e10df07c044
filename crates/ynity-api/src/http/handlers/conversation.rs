//! Conversation CRUD handlers.
//!
//! Endpoints:
//! - GET    /api/chatbot/conversations      - List the caller's conversations
//! - POST   /api/chatbot/conversations      - Create an empty conversation
//! - GET    /api/chatbot/conversations/{id} - Get one conversation with messages
//! - PUT    /api/chatbot/conversations/{id} - Rename
//! - DELETE /api/chatbot/conversations/{id} - Delete

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ynity_types::conversation::{Conversation, ConversationSummary};

use crate::http::error::AppError;
use crate::http::extractors::caller::Caller;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CreateConversationRequest {
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RenameConversationRequest {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

fn self_link(id: &Uuid) -> String {
    format!("/api/chatbot/conversations/{id}")
}

/// GET /api/chatbot/conversations
pub async fn list_conversations(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<ApiResponse<Vec<ConversationSummary>>>, AppError> {
    let timer = RequestTimer::start();
    let conversations = state.chat_service.list_conversations(&caller.user_id).await?;
    Ok(Json(timer.success(conversations)))
}

/// POST /api/chatbot/conversations
pub async fn create_conversation(
    State(state): State<AppState>,
    caller: Caller,
    Json(request): Json<CreateConversationRequest>,
) -> Result<Json<ApiResponse<Conversation>>, AppError> {
    let timer = RequestTimer::start();
    let conversation = state
        .chat_service
        .create_conversation(&caller.user_id, request.title.as_deref())
        .await?;
    let link = self_link(&conversation.id);
    Ok(Json(timer.success(conversation).with_link("self", &link)))
}

/// GET /api/chatbot/conversations/{id}
pub async fn get_conversation(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Conversation>>, AppError> {
    let timer = RequestTimer::start();
    let conversation = state.chat_service.get_conversation(&id, &caller.user_id).await?;
    Ok(Json(timer.success(conversation).with_link("self", &self_link(&id))))
}

/// PUT /api/chatbot/conversations/{id}
pub async fn rename_conversation(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
    Json(request): Json<RenameConversationRequest>,
) -> Result<Json<ApiResponse<Conversation>>, AppError> {
    let timer = RequestTimer::start();
    let conversation = state
        .chat_service
        .rename_conversation(&id, &caller.user_id, &request.title)
        .await?;
    Ok(Json(timer.success(conversation).with_link("self", &self_link(&id))))
}

/// DELETE /api/chatbot/conversations/{id} - `success` is false when
/// nothing owned by the caller matched.
pub async fn delete_conversation(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeleteResponse>>, AppError> {
    let timer = RequestTimer::start();
    let success = state.chat_service.delete_conversation(&id, &caller.user_id).await?;
    Ok(Json(timer.success(DeleteResponse { success })))
}
