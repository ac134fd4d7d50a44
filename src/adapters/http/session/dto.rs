//! HTTP DTOs for session endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::application::handlers::session::{
    StartSessionResult, SubmitAnswerResult,
};
use crate::domain::session::{RespondentInfo, Session, SessionStatus, SessionSummary};
use crate::domain::transcript::{Turn, TurnRole};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Respondent identification supplied at start time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RespondentInfoRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl From<RespondentInfoRequest> for RespondentInfo {
    fn from(req: RespondentInfoRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            metadata: req.metadata,
        }
    }
}

/// Request to start a session.
#[derive(Debug, Clone, Deserialize)]
pub struct StartSessionRequest {
    pub interview_id: String,
    #[serde(default)]
    pub respondent: Option<RespondentInfoRequest>,
}

/// Request to answer the current question.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAnswerRequest {
    pub answer: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Response to a successful start.
#[derive(Debug, Clone, Serialize)]
pub struct StartSessionResponse {
    pub session_id: String,
    pub first_question: String,
    pub question_number: u32,
    pub total_questions: u32,
}

impl From<StartSessionResult> for StartSessionResponse {
    fn from(result: StartSessionResult) -> Self {
        Self {
            session_id: result.session_id.to_string(),
            first_question: result.first_question,
            question_number: result.question_number,
            total_questions: result.total_questions,
        }
    }
}

/// Response to a successful answer submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitAnswerResponse {
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_number: Option<u32>,
    pub total_questions: u32,
}

impl From<SubmitAnswerResult> for SubmitAnswerResponse {
    fn from(result: SubmitAnswerResult) -> Self {
        Self {
            completed: result.completed,
            next_question: result.next_question,
            question_number: result.question_number,
            total_questions: result.total_questions,
        }
    }
}

/// Acknowledgement of early completion.
#[derive(Debug, Clone, Serialize)]
pub struct CompleteEarlyResponse {
    pub success: bool,
    pub already_completed: bool,
}

/// Session view for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub interview_id: String,
    pub status: SessionStatus,
    pub questions_asked: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub respondent_name: Option<String>,
    pub started_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id().to_string(),
            interview_id: session.interview_id().to_string(),
            status: session.status(),
            questions_asked: session.questions_asked(),
            respondent_name: session
                .respondent()
                .and_then(|info| info.name.clone()),
            started_at: session.started_at().as_datetime().to_rfc3339(),
            completed_at: session
                .completed_at()
                .map(|ts| ts.as_datetime().to_rfc3339()),
        }
    }
}

/// Summary view for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
    pub key_insights: Vec<String>,
    pub structured_data: Map<String, Value>,
    pub created_at: String,
}

impl From<&SessionSummary> for SummaryResponse {
    fn from(summary: &SessionSummary) -> Self {
        Self {
            summary: summary.summary().to_string(),
            key_insights: summary.key_insights().to_vec(),
            structured_data: summary.structured_data().clone(),
            created_at: summary.created_at().as_datetime().to_rfc3339(),
        }
    }
}

/// Session plus optional summary.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummaryResponse {
    pub session: SessionResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummaryResponse>,
}

/// One transcript turn.
#[derive(Debug, Clone, Serialize)]
pub struct TurnResponse {
    pub id: String,
    pub role: TurnRole,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_number: Option<u32>,
    pub created_at: String,
}

impl From<&Turn> for TurnResponse {
    fn from(turn: &Turn) -> Self {
        Self {
            id: turn.id().to_string(),
            role: turn.role(),
            content: turn.content().to_string(),
            question_number: turn.question_number(),
            created_at: turn.created_at().as_datetime().to_rfc3339(),
        }
    }
}

/// Full transcript view for operators.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptResponse {
    pub session: SessionResponse,
    pub turns: Vec<TurnResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummaryResponse>,
}
