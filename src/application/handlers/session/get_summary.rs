//! GetSummaryHandler - Query for a session and its (optional) summary.
//!
//! Summary retrieval is best-effort by contract: a completed session may
//! legitimately have no summary, and callers must not treat that as an
//! error.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::session::{Session, SessionError, SessionSummary};
use crate::ports::{SessionRepository, SummaryRepository};

/// Query for a session's summary.
#[derive(Debug, Clone)]
pub struct GetSummaryQuery {
    pub session_id: SessionId,
}

/// A session together with its summary, when one exists.
#[derive(Debug, Clone)]
pub struct SessionSummaryView {
    pub session: Session,
    pub summary: Option<SessionSummary>,
}

/// Handler for summary retrieval.
pub struct GetSummaryHandler {
    sessions: Arc<dyn SessionRepository>,
    summaries: Arc<dyn SummaryRepository>,
}

impl GetSummaryHandler {
    pub fn new(sessions: Arc<dyn SessionRepository>, summaries: Arc<dyn SummaryRepository>) -> Self {
        Self {
            sessions,
            summaries,
        }
    }

    pub async fn handle(&self, query: GetSummaryQuery) -> Result<SessionSummaryView, SessionError> {
        let session = self
            .sessions
            .find_by_id(&query.session_id)
            .await?
            .ok_or(SessionError::NotFound(query.session_id))?;

        let summary = self.summaries.find_by_session(&query.session_id).await?;

        Ok(SessionSummaryView { session, summary })
    }
}
