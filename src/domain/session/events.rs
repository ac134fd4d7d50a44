//! Domain events emitted over a session's lifecycle.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EventId, InterviewId, SessionId, Timestamp};
use crate::domain_event;

/// A respondent started a session and received the first question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStarted {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub interview_id: InterviewId,
    pub started_at: Timestamp,
}

domain_event!(SessionStarted {
    event_type: "session.started.v1",
    aggregate: Session(session_id),
    occurred_at: started_at,
});

/// A respondent's answer was recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerSubmitted {
    pub event_id: EventId,
    pub session_id: SessionId,
    /// The question number the answer responds to.
    pub question_number: u32,
    pub occurred_at: Timestamp,
}

domain_event!(AnswerSubmitted {
    event_type: "session.answer_submitted.v1",
    aggregate: Session(session_id),
    occurred_at: occurred_at,
});

/// A session transitioned to `Completed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCompleted {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub questions_asked: u32,
    /// True when completion happened before the budget was exhausted.
    pub completed_early: bool,
    /// True when a summary was produced during finalization.
    pub summary_recorded: bool,
    pub completed_at: Timestamp,
}

domain_event!(SessionCompleted {
    event_type: "session.completed.v1",
    aggregate: Session(session_id),
    occurred_at: completed_at,
});

/// An operator abandoned a stale session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionAbandoned {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub abandoned_at: Timestamp,
}

domain_event!(SessionAbandoned {
    event_type: "session.abandoned.v1",
    aggregate: Session(session_id),
    occurred_at: abandoned_at,
});
