//! Domain events emitted by the interview aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EventId, InterviewId, OwnerId, Timestamp};
use crate::domain_event;

/// An operator created a new interview template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewCreated {
    pub event_id: EventId,
    pub interview_id: InterviewId,
    pub owner_id: OwnerId,
    pub title: String,
    pub question_budget: u32,
    pub share_token: String,
    pub created_at: Timestamp,
}

domain_event!(InterviewCreated {
    event_type: "interview.created.v1",
    aggregate: Interview(interview_id),
    occurred_at: created_at,
});

/// An interview was archived; new sessions are disabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewArchived {
    pub event_id: EventId,
    pub interview_id: InterviewId,
    pub archived_at: Timestamp,
}

domain_event!(InterviewArchived {
    event_type: "interview.archived.v1",
    aggregate: Interview(interview_id),
    occurred_at: archived_at,
});
