//! HTTP DTOs for interview endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing
//! independent evolution.

use serde::{Deserialize, Serialize};

use crate::adapters::http::session::dto::SessionResponse;
use crate::application::handlers::interview::InterviewPublicView;
use crate::domain::interview::{Interview, InterviewStatus};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to create a new interview.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInterviewRequest {
    pub title: String,
    pub prompt: String,
    #[serde(default = "default_question_budget")]
    pub question_budget: u32,
}

fn default_question_budget() -> u32 {
    10
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Full interview view for operator responses.
#[derive(Debug, Clone, Serialize)]
pub struct InterviewResponse {
    pub id: String,
    pub title: String,
    pub prompt: String,
    pub question_budget: u32,
    pub share_token: String,
    pub share_url: String,
    pub status: InterviewStatus,
    pub created_at: String,
}

impl From<&Interview> for InterviewResponse {
    fn from(interview: &Interview) -> Self {
        Self {
            id: interview.id().to_string(),
            title: interview.title().to_string(),
            prompt: interview.prompt().to_string(),
            question_budget: interview.question_budget(),
            share_token: interview.share_token().to_string(),
            share_url: format!("/interview/{}", interview.share_token()),
            status: interview.status(),
            created_at: interview.created_at().as_datetime().to_rfc3339(),
        }
    }
}

/// Respondent-visible interview slice for the token lookup.
#[derive(Debug, Clone, Serialize)]
pub struct InterviewPublicResponse {
    pub id: String,
    pub title: String,
    pub question_budget: u32,
}

impl From<InterviewPublicView> for InterviewPublicResponse {
    fn from(view: InterviewPublicView) -> Self {
        Self {
            id: view.id.to_string(),
            title: view.title,
            question_budget: view.question_budget,
        }
    }
}

/// List of an operator's interviews.
#[derive(Debug, Clone, Serialize)]
pub struct InterviewListResponse {
    pub items: Vec<InterviewResponse>,
}

/// Interview details together with its sessions.
#[derive(Debug, Clone, Serialize)]
pub struct InterviewSessionsResponse {
    pub interview: InterviewResponse,
    pub sessions: Vec<SessionResponse>,
}
