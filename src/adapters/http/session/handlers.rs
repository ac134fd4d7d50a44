//! HTTP handlers for session endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{status_for, ErrorResponse};
use crate::adapters::http::middleware::RequireOperator;
use crate::application::handlers::session::{
    AbandonSessionCommand, AbandonSessionHandler, CompleteEarlyCommand, CompleteEarlyHandler,
    GetSummaryHandler, GetSummaryQuery, GetTranscriptHandler, GetTranscriptQuery,
    StartSessionCommand, StartSessionHandler, SubmitAnswerCommand, SubmitAnswerHandler,
};
use crate::domain::foundation::{InterviewId, SessionId};
use crate::domain::session::SessionError;

use super::dto::{
    CompleteEarlyResponse, SessionSummaryResponse, StartSessionRequest, StartSessionResponse,
    SubmitAnswerRequest, SubmitAnswerResponse, TranscriptResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SessionHandlers {
    start_handler: Arc<StartSessionHandler>,
    submit_handler: Arc<SubmitAnswerHandler>,
    complete_handler: Arc<CompleteEarlyHandler>,
    abandon_handler: Arc<AbandonSessionHandler>,
    summary_handler: Arc<GetSummaryHandler>,
    transcript_handler: Arc<GetTranscriptHandler>,
}

impl SessionHandlers {
    pub fn new(
        start_handler: Arc<StartSessionHandler>,
        submit_handler: Arc<SubmitAnswerHandler>,
        complete_handler: Arc<CompleteEarlyHandler>,
        abandon_handler: Arc<AbandonSessionHandler>,
        summary_handler: Arc<GetSummaryHandler>,
        transcript_handler: Arc<GetTranscriptHandler>,
    ) -> Self {
        Self {
            start_handler,
            submit_handler,
            complete_handler,
            abandon_handler,
            summary_handler,
            transcript_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/sessions - Start a session (public).
pub async fn start_session(
    State(handlers): State<SessionHandlers>,
    Json(req): Json<StartSessionRequest>,
) -> Response {
    let interview_id = match req.interview_id.parse::<InterviewId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid interview ID")),
            )
                .into_response()
        }
    };

    let cmd = StartSessionCommand {
        interview_id,
        respondent: req.respondent.map(Into::into),
    };

    match handlers.start_handler.handle(cmd).await {
        Ok(result) => {
            let response: StartSessionResponse = result.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// POST /api/sessions/:id/answers - Submit an answer (public).
pub async fn submit_answer(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
    Json(req): Json<SubmitAnswerRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = SubmitAnswerCommand {
        session_id,
        answer: req.answer,
    };

    match handlers.submit_handler.handle(cmd).await {
        Ok(result) => {
            let response: SubmitAnswerResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// POST /api/sessions/:id/complete - Complete a session early (public).
pub async fn complete_early(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .complete_handler
        .handle(CompleteEarlyCommand { session_id })
        .await
    {
        Ok(result) => {
            let response = CompleteEarlyResponse {
                success: true,
                already_completed: result.already_completed,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// GET /api/sessions/:id/summary - Fetch a session's summary (public).
pub async fn get_summary(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .summary_handler
        .handle(GetSummaryQuery { session_id })
        .await
    {
        Ok(view) => {
            let response = SessionSummaryResponse {
                session: (&view.session).into(),
                summary: view.summary.as_ref().map(Into::into),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// GET /api/sessions/:id/transcript - Fetch the transcript (operator).
pub async fn get_transcript(
    State(handlers): State<SessionHandlers>,
    RequireOperator(operator): RequireOperator,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let query = GetTranscriptQuery {
        session_id,
        owner_id: operator.id,
    };

    match handlers.transcript_handler.handle(query).await {
        Ok(view) => {
            let response = TranscriptResponse {
                session: (&view.session).into(),
                turns: view.turns.iter().map(Into::into).collect(),
                summary: view.summary.as_ref().map(Into::into),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// POST /api/sessions/:id/abandon - Abandon a stale session (operator).
pub async fn abandon_session(
    State(handlers): State<SessionHandlers>,
    RequireOperator(operator): RequireOperator,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = AbandonSessionCommand {
        session_id,
        owner_id: operator.id,
    };

    match handlers.abandon_handler.handle(cmd).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_session_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn parse_session_id(raw: &str) -> Result<SessionId, Response> {
    raw.parse::<SessionId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid session ID")),
        )
            .into_response()
    })
}

fn handle_session_error(error: SessionError) -> Response {
    let status = status_for(error.code());
    let body = ErrorResponse::from_code(error.code(), error.message());
    (status, Json(body)).into_response()
}
