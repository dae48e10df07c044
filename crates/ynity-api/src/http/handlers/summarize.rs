//! POST /api/summarize - chunked summarization of a long text.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use ynity_types::summary::SummaryMode;

use crate::http::error::AppError;
use crate::http::extractors::caller::Caller;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub text: String,
    /// Mode keyword; unknown or missing keywords use the long template.
    #[serde(default)]
    pub mode: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub summary: String,
    pub mode: SummaryMode,
}

pub async fn summarize(
    State(state): State<AppState>,
    _caller: Caller,
    Json(request): Json<SummarizeRequest>,
) -> Result<Json<ApiResponse<SummarizeResponse>>, AppError> {
    let timer = RequestTimer::start();
    let mode = request
        .mode
        .as_deref()
        .map(SummaryMode::from_keyword)
        .unwrap_or_default();

    let summary = state.summarizer.summarize(&request.text, mode).await?;
    Ok(Json(timer.success(SummarizeResponse { summary, mode })))
}
