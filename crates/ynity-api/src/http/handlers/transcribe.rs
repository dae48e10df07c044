//! POST /api/chatbot/transcribe - speech-to-text for a recorded question.
//!
//! Expects `multipart/form-data` with the recording in a `file` field.

use axum::Json;
use axum::extract::{Multipart, State};
use serde::Serialize;

use ynity_core::transcribe::client::AudioUpload;
use ynity_types::error::TranscriptionError;

use crate::http::error::AppError;
use crate::http::extractors::caller::Caller;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

/// Upload ceiling, matching the Whisper API file limit.
pub const MAX_AUDIO_BYTES: usize = 25 * 1024 * 1024;

#[derive(Debug, Serialize)]
pub struct TranscribeResponse {
    pub text: String,
}

pub async fn transcribe(
    State(state): State<AppState>,
    _caller: Caller,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<TranscribeResponse>>, AppError> {
    let timer = RequestTimer::start();

    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(invalid_upload)? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(invalid_upload)?;
        upload = Some(AudioUpload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
        break;
    }

    let upload = upload
        .ok_or_else(|| TranscriptionError::Validation("No audio file".to_string()))?;
    let text = state.transcriber.transcribe(upload).await?;
    Ok(Json(timer.success(TranscribeResponse { text })))
}

fn invalid_upload(e: axum::extract::multipart::MultipartError) -> AppError {
    TranscriptionError::Validation(format!("Invalid upload: {}", e.body_text())).into()
}
