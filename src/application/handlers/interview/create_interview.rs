//! CreateInterviewHandler - Command handler for creating interview templates.

use std::sync::Arc;

use crate::domain::foundation::{EventId, OwnerId, SerializableDomainEvent};
use crate::domain::interview::{Interview, InterviewCreated, InterviewError};
use crate::ports::{EventPublisher, InterviewRepository};

/// Command to create a new interview template.
#[derive(Debug, Clone)]
pub struct CreateInterviewCommand {
    pub owner_id: OwnerId,
    pub title: String,
    pub prompt: String,
    pub question_budget: u32,
}

/// Result of successful interview creation.
#[derive(Debug, Clone)]
pub struct CreateInterviewResult {
    pub interview: Interview,
}

/// Handler for creating interview templates.
pub struct CreateInterviewHandler {
    interviews: Arc<dyn InterviewRepository>,
    events: Arc<dyn EventPublisher>,
}

impl CreateInterviewHandler {
    pub fn new(interviews: Arc<dyn InterviewRepository>, events: Arc<dyn EventPublisher>) -> Self {
        Self { interviews, events }
    }

    pub async fn handle(
        &self,
        cmd: CreateInterviewCommand,
    ) -> Result<CreateInterviewResult, InterviewError> {
        let interview = Interview::new(
            cmd.owner_id.clone(),
            cmd.title,
            cmd.prompt,
            cmd.question_budget,
        )?;

        self.interviews.save(&interview).await?;

        let event = InterviewCreated {
            event_id: EventId::new(),
            interview_id: *interview.id(),
            owner_id: cmd.owner_id,
            title: interview.title().to_string(),
            question_budget: interview.question_budget(),
            share_token: interview.share_token().to_string(),
            created_at: *interview.created_at(),
        };
        self.events.publish(event.to_envelope()).await?;

        tracing::info!(
            interview_id = %interview.id(),
            share_token = %interview.share_token(),
            "interview created"
        );

        Ok(CreateInterviewResult { interview })
    }
}
