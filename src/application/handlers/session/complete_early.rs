//! CompleteEarlyHandler - Command handler for ending a session before the
//! budget is exhausted.
//!
//! Idempotent: early completion is frequently triggered by respondent
//! double-submission, so a second call on an already-completed session is
//! a success no-op, not an error.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::session::{SessionError, SessionStatus};
use crate::ports::{InterviewRepository, SessionRepository};

use super::Finalizer;

/// Command to complete a session early.
#[derive(Debug, Clone)]
pub struct CompleteEarlyCommand {
    pub session_id: SessionId,
}

/// Result of early completion.
#[derive(Debug, Clone)]
pub struct CompleteEarlyResult {
    /// True when the session was already completed and nothing changed.
    pub already_completed: bool,
}

/// Handler for early completion.
pub struct CompleteEarlyHandler {
    interviews: Arc<dyn InterviewRepository>,
    sessions: Arc<dyn SessionRepository>,
    finalizer: Arc<Finalizer>,
}

impl CompleteEarlyHandler {
    pub fn new(
        interviews: Arc<dyn InterviewRepository>,
        sessions: Arc<dyn SessionRepository>,
        finalizer: Arc<Finalizer>,
    ) -> Self {
        Self {
            interviews,
            sessions,
            finalizer,
        }
    }

    pub async fn handle(
        &self,
        cmd: CompleteEarlyCommand,
    ) -> Result<CompleteEarlyResult, SessionError> {
        let mut session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or(SessionError::NotFound(cmd.session_id))?;

        match session.status() {
            SessionStatus::Completed => {
                return Ok(CompleteEarlyResult {
                    already_completed: true,
                })
            }
            SessionStatus::Abandoned => {
                return Err(SessionError::invalid_state(
                    "Session was abandoned and cannot be completed",
                ))
            }
            SessionStatus::InProgress => {}
        }

        let interview = self
            .interviews
            .find_by_id(session.interview_id())
            .await?
            .ok_or(SessionError::InterviewUnavailable(*session.interview_id()))?;

        self.finalizer
            .finalize(&mut session, &interview, true)
            .await?;

        tracing::info!(session_id = %cmd.session_id, "session completed early");

        Ok(CompleteEarlyResult {
            already_completed: false,
        })
    }
}
