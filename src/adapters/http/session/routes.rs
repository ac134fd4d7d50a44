//! HTTP routes for session endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    abandon_session, complete_early, get_summary, get_transcript, start_session, submit_answer,
    SessionHandlers,
};

/// Creates the session router with all endpoints.
pub fn session_routes(handlers: SessionHandlers) -> Router {
    Router::new()
        .route("/", post(start_session))
        .route("/:id/answers", post(submit_answer))
        .route("/:id/complete", post(complete_early))
        .route("/:id/summary", get(get_summary))
        .route("/:id/transcript", get(get_transcript))
        .route("/:id/abandon", post(abandon_session))
        .with_state(handlers)
}
