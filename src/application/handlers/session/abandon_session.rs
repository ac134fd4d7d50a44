//! AbandonSessionHandler - Operator command for closing a stale session.
//!
//! Abandoning skips finalization entirely: no summary is attempted and
//! the session never reports a completion time.

use std::sync::Arc;

use crate::domain::foundation::{EventId, OwnerId, SerializableDomainEvent, SessionId, Timestamp};
use crate::domain::session::{SessionAbandoned, SessionError};
use crate::ports::{EventPublisher, InterviewRepository, SessionRepository};

/// Command to abandon a session.
#[derive(Debug, Clone)]
pub struct AbandonSessionCommand {
    pub session_id: SessionId,
    pub owner_id: OwnerId,
}

/// Handler for abandoning sessions.
pub struct AbandonSessionHandler {
    interviews: Arc<dyn InterviewRepository>,
    sessions: Arc<dyn SessionRepository>,
    events: Arc<dyn EventPublisher>,
}

impl AbandonSessionHandler {
    pub fn new(
        interviews: Arc<dyn InterviewRepository>,
        sessions: Arc<dyn SessionRepository>,
        events: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            interviews,
            sessions,
            events,
        }
    }

    pub async fn handle(&self, cmd: AbandonSessionCommand) -> Result<(), SessionError> {
        let mut session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or(SessionError::NotFound(cmd.session_id))?;

        let interview = self
            .interviews
            .find_by_id(session.interview_id())
            .await?
            .ok_or(SessionError::InterviewUnavailable(*session.interview_id()))?;

        interview
            .authorize(&cmd.owner_id)
            .map_err(|_| SessionError::forbidden())?;

        let expected_version = session.version();
        session.abandon()?;
        self.sessions.update(&session, expected_version).await?;

        let event = SessionAbandoned {
            event_id: EventId::new(),
            session_id: cmd.session_id,
            abandoned_at: Timestamp::now(),
        };
        self.events.publish(event.to_envelope()).await?;

        tracing::info!(session_id = %cmd.session_id, "session abandoned");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::session::support::*;
    use crate::domain::interview::Interview;
    use crate::domain::session::{Session, SessionStatus};

    struct Harness {
        sessions: Arc<InMemorySessions>,
        handler: AbandonSessionHandler,
    }

    impl Harness {
        fn with_interviews(interviews: Vec<Interview>) -> Self {
            let interviews = Arc::new(InMemoryInterviews::with(interviews));
            let sessions = Arc::new(InMemorySessions::default());
            let events = Arc::new(RecordingPublisher::default());
            let handler = AbandonSessionHandler::new(interviews, sessions.clone(), events);
            Self { sessions, handler }
        }
    }

    #[tokio::test]
    async fn owner_abandons_in_progress_session() {
        let interview = test_interview(5);
        let harness = Harness::with_interviews(vec![interview.clone()]);
        let session = Session::new(*interview.id(), None);
        harness.sessions.save(&session).await.unwrap();

        harness
            .handler
            .handle(AbandonSessionCommand {
                session_id: *session.id(),
                owner_id: test_owner(),
            })
            .await
            .unwrap();

        let stored = harness.sessions.get(session.id()).unwrap();
        assert_eq!(stored.status(), SessionStatus::Abandoned);
        assert!(stored.completed_at().is_none());
    }

    #[tokio::test]
    async fn non_owner_is_forbidden() {
        let interview = test_interview(5);
        let harness = Harness::with_interviews(vec![interview.clone()]);
        let session = Session::new(*interview.id(), None);
        harness.sessions.save(&session).await.unwrap();

        let result = harness
            .handler
            .handle(AbandonSessionCommand {
                session_id: *session.id(),
                owner_id: OwnerId::new("intruder").unwrap(),
            })
            .await;

        assert!(matches!(result, Err(SessionError::Forbidden)));
        let stored = harness.sessions.get(session.id()).unwrap();
        assert_eq!(stored.status(), SessionStatus::InProgress);
    }

    #[tokio::test]
    async fn completed_session_cannot_be_abandoned() {
        let interview = test_interview(5);
        let harness = Harness::with_interviews(vec![interview.clone()]);
        let mut session = Session::new(*interview.id(), None);
        session.complete().unwrap();
        harness.sessions.save(&session).await.unwrap();

        let result = harness
            .handler
            .handle(AbandonSessionCommand {
                session_id: *session.id(),
                owner_id: test_owner(),
            })
            .await;

        assert!(matches!(result, Err(SessionError::InvalidState(_))));
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let harness = Harness::with_interviews(vec![]);

        let result = harness
            .handler
            .handle(AbandonSessionCommand {
                session_id: crate::domain::foundation::SessionId::new(),
                owner_id: test_owner(),
            })
            .await;

        assert!(matches!(result, Err(SessionError::NotFound(_))));
    }
}
