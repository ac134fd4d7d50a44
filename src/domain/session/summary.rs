//! End-of-session summary record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::foundation::{InterviewId, SessionId, SummaryId, Timestamp};

/// Structured summary produced at most once per session, on the
/// transition into `Completed`.
///
/// A completed session without a summary is a normal state: summary
/// generation is best-effort and its failure never blocks completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Unique identifier for this summary.
    id: SummaryId,

    /// The session this summary describes.
    session_id: SessionId,

    /// The interview the session ran against.
    interview_id: InterviewId,

    /// Prose summary of the conversation.
    summary: String,

    /// Ordered list of short extracted insights.
    key_insights: Vec<String>,

    /// Open-ended structured data; the completion service decides the keys.
    structured_data: Map<String, Value>,

    /// When the summary was produced.
    created_at: Timestamp,
}

impl SessionSummary {
    /// Creates a new summary for a session.
    pub fn new(
        session_id: SessionId,
        interview_id: InterviewId,
        summary: String,
        key_insights: Vec<String>,
        structured_data: Map<String, Value>,
    ) -> Self {
        Self {
            id: SummaryId::new(),
            session_id,
            interview_id,
            summary,
            key_insights,
            structured_data,
            created_at: Timestamp::now(),
        }
    }

    /// Reconstitutes a summary from persistence.
    pub fn reconstitute(
        id: SummaryId,
        session_id: SessionId,
        interview_id: InterviewId,
        summary: String,
        key_insights: Vec<String>,
        structured_data: Map<String, Value>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            session_id,
            interview_id,
            summary,
            key_insights,
            structured_data,
            created_at,
        }
    }

    /// Returns the summary ID.
    pub fn id(&self) -> &SummaryId {
        &self.id
    }

    /// Returns the session this summary describes.
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Returns the interview the session ran against.
    pub fn interview_id(&self) -> &InterviewId {
        &self.interview_id
    }

    /// Returns the prose summary.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Returns the extracted insights, in order.
    pub fn key_insights(&self) -> &[String] {
        &self.key_insights
    }

    /// Returns the open-ended structured data.
    pub fn structured_data(&self) -> &Map<String, Value> {
        &self.structured_data
    }

    /// Returns when the summary was produced.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}
