//! HTTP adapters - the axum facade over the application handlers.

pub mod error;
pub mod interview;
pub mod middleware;
pub mod session;

use axum::Router;
use std::sync::Arc;

use crate::ports::OperatorValidator;

pub use interview::InterviewHandlers;
pub use session::SessionHandlers;

use interview::interview_routes;
use middleware::auth_middleware;
use session::session_routes;

/// Builds the full API router.
///
/// The auth middleware runs for every route; it only injects the
/// operator identity when a valid token is present, and the
/// operator-only handlers enforce it via `RequireOperator`.
pub fn api_router(
    interview_handlers: InterviewHandlers,
    session_handlers: SessionHandlers,
    validator: Arc<dyn OperatorValidator>,
) -> Router {
    Router::new()
        .nest("/api/interviews", interview_routes(interview_handlers))
        .nest("/api/sessions", session_routes(session_handlers))
        .layer(axum::middleware::from_fn_with_state(
            validator,
            auth_middleware,
        ))
}
