//! Chat turn handlers.
//!
//! Endpoints:
//! - POST /api/chatbot/ask     - One chat turn (coach or QA agent)
//! - POST /api/chatbot/voice   - Spoken reply to a standalone message
//! - GET  /api/chatbot/history - Messages of the latest conversation

use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use ynity_core::chat::service::{AskRequest, TurnOutcome};
use ynity_types::conversation::Message;

use crate::http::error::AppError;
use crate::http::extractors::caller::Caller;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

/// POST /api/chatbot/ask
pub async fn ask(
    State(state): State<AppState>,
    caller: Caller,
    Json(request): Json<AskRequest>,
) -> Result<Json<ApiResponse<TurnOutcome>>, AppError> {
    let timer = RequestTimer::start();

    let outcome = state.chat_service.ask(&caller.user_id, request).await?;
    let conversation_link = format!("/api/chatbot/conversations/{}", outcome.conversation_id);

    Ok(Json(
        timer
            .success(outcome)
            .with_link("conversation", &conversation_link),
    ))
}

#[derive(Debug, Deserialize)]
pub struct VoiceRequest {
    #[serde(default)]
    pub message: String,
}

/// POST /api/chatbot/voice - responds with `audio/mpeg` bytes, not JSON.
pub async fn voice(
    State(state): State<AppState>,
    _caller: Caller,
    Json(request): Json<VoiceRequest>,
) -> Result<Response, AppError> {
    let audio = state.chat_service.voice_reply(&request.message).await?;
    Ok(([(header::CONTENT_TYPE, "audio/mpeg")], audio).into_response())
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub messages: Vec<Message>,
}

/// GET /api/chatbot/history
pub async fn history(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<ApiResponse<HistoryResponse>>, AppError> {
    let timer = RequestTimer::start();
    let messages = state.chat_service.latest_history(&caller.user_id).await?;
    Ok(Json(timer.success(HistoryResponse { messages })))
}
