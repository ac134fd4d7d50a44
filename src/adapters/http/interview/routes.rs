//! HTTP routes for interview endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    archive_interview, create_interview, get_interview_sessions, list_interviews,
    resolve_share_token, InterviewHandlers,
};

/// Creates the interview router with all endpoints.
pub fn interview_routes(handlers: InterviewHandlers) -> Router {
    Router::new()
        .route("/", post(create_interview))
        .route("/", get(list_interviews))
        .route("/by-token/:token", get(resolve_share_token))
        .route("/:id", get(get_interview_sessions))
        .route("/:id/archive", post(archive_interview))
        .with_state(handlers)
}
