//! Axum router configuration with middleware.
//!
//! Middleware: CORS, tracing. Generated artifacts are served from
//! `{data_dir}/public/audio` and `{data_dir}/public/files`.

use axum::Router;
use axum::extract::{DefaultBodyLimit, State};
use axum::routing::{delete, get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use ynity_infra::artifact::local::{audio_dir, files_dir};

use crate::http::error::AppError;
use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let chatbot_routes = Router::new()
        .route("/ask", post(handlers::chat::ask))
        .route("/voice", post(handlers::chat::voice))
        .route("/history", get(handlers::chat::history))
        .route(
            "/transcribe",
            post(handlers::transcribe::transcribe)
                .layer(DefaultBodyLimit::max(handlers::transcribe::MAX_AUDIO_BYTES)),
        )
        .route(
            "/conversations",
            get(handlers::conversation::list_conversations)
                .post(handlers::conversation::create_conversation),
        )
        .route(
            "/conversations/{id}",
            get(handlers::conversation::get_conversation)
                .put(handlers::conversation::rename_conversation)
                .delete(handlers::conversation::delete_conversation),
        );

    let ai_routes = Router::new()
        .route("/chapter", post(handlers::chapter::generate_chapter))
        .route("/chapters", get(handlers::chapter::list_chapters))
        .route("/chapter/{id}", delete(handlers::chapter::delete_chapter));

    let audio = ServeDir::new(audio_dir(&state.public_dir));
    let files = ServeDir::new(files_dir(&state.public_dir));

    Router::new()
        .nest("/api/chatbot", chatbot_routes)
        .nest("/api/ai", ai_routes)
        .route("/api/summarize", post(handlers::summarize::summarize))
        .route("/health", get(health_check))
        .nest_service("/audio", audio)
        .nest_service("/files", files)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - liveness plus a database round-trip (no caller required).
async fn health_check(
    State(state): State<AppState>,
) -> Result<axum::Json<serde_json::Value>, AppError> {
    state
        .db_pool
        .ping()
        .await
        .map_err(|e| AppError::Internal(format!("database unavailable: {e}")))?;

    Ok(axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    })))
}
