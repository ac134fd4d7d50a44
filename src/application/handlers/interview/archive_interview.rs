//! ArchiveInterviewHandler - Operator command for retiring an interview.
//!
//! Archival permanently disables new sessions against the interview;
//! sessions already in progress keep running to completion.

use std::sync::Arc;

use crate::domain::foundation::{EventId, InterviewId, OwnerId, SerializableDomainEvent};
use crate::domain::interview::{InterviewArchived, InterviewError};
use crate::ports::{EventPublisher, InterviewRepository};

/// Command to archive an interview.
#[derive(Debug, Clone)]
pub struct ArchiveInterviewCommand {
    pub interview_id: InterviewId,
    pub owner_id: OwnerId,
}

/// Handler for archiving interviews.
pub struct ArchiveInterviewHandler {
    interviews: Arc<dyn InterviewRepository>,
    events: Arc<dyn EventPublisher>,
}

impl ArchiveInterviewHandler {
    pub fn new(interviews: Arc<dyn InterviewRepository>, events: Arc<dyn EventPublisher>) -> Self {
        Self { interviews, events }
    }

    pub async fn handle(&self, cmd: ArchiveInterviewCommand) -> Result<(), InterviewError> {
        let mut interview = self
            .interviews
            .find_by_id(&cmd.interview_id)
            .await?
            .ok_or_else(|| InterviewError::not_found(&cmd.interview_id))?;

        interview.authorize(&cmd.owner_id)?;
        interview.archive()?;

        self.interviews.update(&interview).await?;

        let event = InterviewArchived {
            event_id: EventId::new(),
            interview_id: cmd.interview_id,
            archived_at: *interview.updated_at(),
        };
        self.events.publish(event.to_envelope()).await?;

        tracing::info!(interview_id = %cmd.interview_id, "interview archived");

        Ok(())
    }
}
