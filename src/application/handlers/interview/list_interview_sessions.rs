//! ListInterviewSessionsHandler - Operator view of one interview's sessions.

use std::sync::Arc;

use crate::domain::foundation::{InterviewId, OwnerId};
use crate::domain::interview::{Interview, InterviewError};
use crate::domain::session::Session;
use crate::ports::{InterviewRepository, SessionRepository};

/// Query for an interview's sessions.
#[derive(Debug, Clone)]
pub struct ListInterviewSessionsQuery {
    pub interview_id: InterviewId,
    pub owner_id: OwnerId,
}

/// An interview together with its sessions, newest first.
#[derive(Debug, Clone)]
pub struct InterviewSessionsView {
    pub interview: Interview,
    pub sessions: Vec<Session>,
}

/// Handler for listing an interview's sessions.
pub struct ListInterviewSessionsHandler {
    interviews: Arc<dyn InterviewRepository>,
    sessions: Arc<dyn SessionRepository>,
}

impl ListInterviewSessionsHandler {
    pub fn new(
        interviews: Arc<dyn InterviewRepository>,
        sessions: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            interviews,
            sessions,
        }
    }

    pub async fn handle(
        &self,
        query: ListInterviewSessionsQuery,
    ) -> Result<InterviewSessionsView, InterviewError> {
        let interview = self
            .interviews
            .find_by_id(&query.interview_id)
            .await?
            .ok_or_else(|| InterviewError::not_found(&query.interview_id))?;

        interview.authorize(&query.owner_id)?;

        let sessions = self.sessions.find_by_interview(&query.interview_id).await?;

        Ok(InterviewSessionsView {
            interview,
            sessions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainError, SessionId};
    use crate::domain::interview::ShareToken;
    use async_trait::async_trait;

    struct MockInterviewRepository {
        interview: Option<Interview>,
    }

    #[async_trait]
    impl InterviewRepository for MockInterviewRepository {
        async fn save(&self, _interview: &Interview) -> Result<(), DomainError> {
            Ok(())
        }

        async fn update(&self, _interview: &Interview) -> Result<(), DomainError> {
            Ok(())
        }

        async fn find_by_id(&self, _id: &InterviewId) -> Result<Option<Interview>, DomainError> {
            Ok(self.interview.clone())
        }

        async fn find_by_share_token(
            &self,
            _token: &ShareToken,
        ) -> Result<Option<Interview>, DomainError> {
            Ok(None)
        }

        async fn find_by_owner(&self, _owner: &OwnerId) -> Result<Vec<Interview>, DomainError> {
            Ok(vec![])
        }
    }

    struct MockSessionRepository {
        sessions: Vec<Session>,
    }

    #[async_trait]
    impl SessionRepository for MockSessionRepository {
        async fn save(&self, _session: &Session) -> Result<(), DomainError> {
            Ok(())
        }

        async fn update(
            &self,
            _session: &Session,
            _expected_version: u64,
        ) -> Result<(), DomainError> {
            Ok(())
        }

        async fn find_by_id(&self, _id: &SessionId) -> Result<Option<Session>, DomainError> {
            Ok(None)
        }

        async fn find_by_interview(
            &self,
            _interview_id: &InterviewId,
        ) -> Result<Vec<Session>, DomainError> {
            Ok(self.sessions.clone())
        }
    }

    fn owner() -> OwnerId {
        OwnerId::new("op-1").unwrap()
    }

    fn interview() -> Interview {
        Interview::new(owner(), "T".into(), "p".into(), 3).unwrap()
    }

    #[tokio::test]
    async fn returns_interview_with_sessions() {
        let interview = interview();
        let session = Session::new(*interview.id(), None);
        let handler = ListInterviewSessionsHandler::new(
            Arc::new(MockInterviewRepository {
                interview: Some(interview.clone()),
            }),
            Arc::new(MockSessionRepository {
                sessions: vec![session],
            }),
        );

        let view = handler
            .handle(ListInterviewSessionsQuery {
                interview_id: *interview.id(),
                owner_id: owner(),
            })
            .await
            .unwrap();
        assert_eq!(view.sessions.len(), 1);
    }

    #[tokio::test]
    async fn unknown_interview_is_not_found() {
        let handler = ListInterviewSessionsHandler::new(
            Arc::new(MockInterviewRepository { interview: None }),
            Arc::new(MockSessionRepository { sessions: vec![] }),
        );

        let result = handler
            .handle(ListInterviewSessionsQuery {
                interview_id: InterviewId::new(),
                owner_id: owner(),
            })
            .await;
        assert!(matches!(result, Err(InterviewError::NotFound(_))));
    }

    #[tokio::test]
    async fn non_owner_is_forbidden() {
        let interview = interview();
        let handler = ListInterviewSessionsHandler::new(
            Arc::new(MockInterviewRepository {
                interview: Some(interview.clone()),
            }),
            Arc::new(MockSessionRepository { sessions: vec![] }),
        );

        let result = handler
            .handle(ListInterviewSessionsQuery {
                interview_id: *interview.id(),
                owner_id: OwnerId::new("intruder").unwrap(),
            })
            .await;
        assert!(matches!(result, Err(InterviewError::Forbidden)));
    }
}
