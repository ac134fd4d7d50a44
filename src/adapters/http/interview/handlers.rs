//! HTTP handlers for interview endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{status_for, ErrorResponse};
use crate::adapters::http::middleware::RequireOperator;
use crate::adapters::http::session::dto::SessionResponse;
use crate::application::handlers::interview::{
    ArchiveInterviewCommand, ArchiveInterviewHandler, CreateInterviewCommand,
    CreateInterviewHandler, ListInterviewSessionsHandler, ListInterviewSessionsQuery,
    ListInterviewsHandler, ListInterviewsQuery, ResolveShareTokenHandler, ResolveShareTokenQuery,
};
use crate::domain::foundation::InterviewId;
use crate::domain::interview::InterviewError;

use super::dto::{
    CreateInterviewRequest, InterviewListResponse, InterviewPublicResponse, InterviewResponse,
    InterviewSessionsResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct InterviewHandlers {
    create_handler: Arc<CreateInterviewHandler>,
    archive_handler: Arc<ArchiveInterviewHandler>,
    list_handler: Arc<ListInterviewsHandler>,
    sessions_handler: Arc<ListInterviewSessionsHandler>,
    resolve_handler: Arc<ResolveShareTokenHandler>,
}

impl InterviewHandlers {
    pub fn new(
        create_handler: Arc<CreateInterviewHandler>,
        archive_handler: Arc<ArchiveInterviewHandler>,
        list_handler: Arc<ListInterviewsHandler>,
        sessions_handler: Arc<ListInterviewSessionsHandler>,
        resolve_handler: Arc<ResolveShareTokenHandler>,
    ) -> Self {
        Self {
            create_handler,
            archive_handler,
            list_handler,
            sessions_handler,
            resolve_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/interviews - Create an interview (operator).
pub async fn create_interview(
    State(handlers): State<InterviewHandlers>,
    RequireOperator(operator): RequireOperator,
    Json(req): Json<CreateInterviewRequest>,
) -> Response {
    let cmd = CreateInterviewCommand {
        owner_id: operator.id,
        title: req.title,
        prompt: req.prompt,
        question_budget: req.question_budget,
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(result) => {
            let response: InterviewResponse = (&result.interview).into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_interview_error(e),
    }
}

/// GET /api/interviews - List the operator's interviews.
pub async fn list_interviews(
    State(handlers): State<InterviewHandlers>,
    RequireOperator(operator): RequireOperator,
) -> Response {
    let query = ListInterviewsQuery {
        owner_id: operator.id,
    };

    match handlers.list_handler.handle(query).await {
        Ok(interviews) => {
            let response = InterviewListResponse {
                items: interviews.iter().map(Into::into).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_interview_error(e),
    }
}

/// GET /api/interviews/:id - Interview details with sessions (operator).
pub async fn get_interview_sessions(
    State(handlers): State<InterviewHandlers>,
    RequireOperator(operator): RequireOperator,
    Path(interview_id): Path<String>,
) -> Response {
    let interview_id = match interview_id.parse::<InterviewId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid interview ID")),
            )
                .into_response()
        }
    };

    let query = ListInterviewSessionsQuery {
        interview_id,
        owner_id: operator.id,
    };

    match handlers.sessions_handler.handle(query).await {
        Ok(view) => {
            let response = InterviewSessionsResponse {
                interview: (&view.interview).into(),
                sessions: view.sessions.iter().map(SessionResponse::from).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_interview_error(e),
    }
}

/// POST /api/interviews/:id/archive - Archive an interview (operator).
pub async fn archive_interview(
    State(handlers): State<InterviewHandlers>,
    RequireOperator(operator): RequireOperator,
    Path(interview_id): Path<String>,
) -> Response {
    let interview_id = match interview_id.parse::<InterviewId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid interview ID")),
            )
                .into_response()
        }
    };

    let cmd = ArchiveInterviewCommand {
        interview_id,
        owner_id: operator.id,
    };

    match handlers.archive_handler.handle(cmd).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_interview_error(e),
    }
}

/// GET /api/interviews/by-token/:token - Resolve a share token (public).
pub async fn resolve_share_token(
    State(handlers): State<InterviewHandlers>,
    Path(token): Path<String>,
) -> Response {
    let query = ResolveShareTokenQuery { token };

    match handlers.resolve_handler.handle(query).await {
        Ok(view) => {
            let response: InterviewPublicResponse = view.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_interview_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_interview_error(error: InterviewError) -> Response {
    let status = status_for(error.code());
    let body = ErrorResponse::from_code(error.code(), error.message());
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interview_not_found_maps_to_404() {
        let error = InterviewError::not_found_by_token("iv-missing");
        let response = handle_interview_error(error);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn forbidden_maps_to_403() {
        let response = handle_interview_error(InterviewError::forbidden());
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn validation_maps_to_400() {
        let error = InterviewError::validation("prompt", "cannot be empty");
        let response = handle_interview_error(error);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
