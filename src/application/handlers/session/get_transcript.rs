//! GetTranscriptHandler - Operator query for a session's full transcript.

use std::sync::Arc;

use crate::domain::foundation::{OwnerId, SessionId};
use crate::domain::session::{Session, SessionError, SessionSummary};
use crate::domain::transcript::Turn;
use crate::ports::{InterviewRepository, SessionRepository, SummaryRepository, TranscriptStore};

/// Query for a session's transcript.
#[derive(Debug, Clone)]
pub struct GetTranscriptQuery {
    pub session_id: SessionId,
    pub owner_id: OwnerId,
}

/// A session with its ordered turns and optional summary.
#[derive(Debug, Clone)]
pub struct TranscriptView {
    pub session: Session,
    pub turns: Vec<Turn>,
    pub summary: Option<SessionSummary>,
}

/// Handler for transcript retrieval.
pub struct GetTranscriptHandler {
    interviews: Arc<dyn InterviewRepository>,
    sessions: Arc<dyn SessionRepository>,
    transcripts: Arc<dyn TranscriptStore>,
    summaries: Arc<dyn SummaryRepository>,
}

impl GetTranscriptHandler {
    pub fn new(
        interviews: Arc<dyn InterviewRepository>,
        sessions: Arc<dyn SessionRepository>,
        transcripts: Arc<dyn TranscriptStore>,
        summaries: Arc<dyn SummaryRepository>,
    ) -> Self {
        Self {
            interviews,
            sessions,
            transcripts,
            summaries,
        }
    }

    pub async fn handle(&self, query: GetTranscriptQuery) -> Result<TranscriptView, SessionError> {
        let session = self
            .sessions
            .find_by_id(&query.session_id)
            .await?
            .ok_or(SessionError::NotFound(query.session_id))?;

        let interview = self
            .interviews
            .find_by_id(session.interview_id())
            .await?
            .ok_or(SessionError::InterviewUnavailable(*session.interview_id()))?;

        interview
            .authorize(&query.owner_id)
            .map_err(|_| SessionError::forbidden())?;

        let turns = self.transcripts.list_turns(&query.session_id).await?;
        let summary = self.summaries.find_by_session(&query.session_id).await?;

        Ok(TranscriptView {
            session,
            turns,
            summary,
        })
    }
}
