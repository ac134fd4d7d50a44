//! Finalizer - the shared terminal step for completing a session.
//!
//! Finalization wins the `InProgress -> Completed` transition through the
//! session repository's compare-and-swap first, then produces the summary
//! best-effort. Losing the swap means another caller already finalized
//! (or advanced) the session; summary failures of any kind never undo the
//! completion.

use std::sync::Arc;

use crate::domain::foundation::{EventId, SerializableDomainEvent};
use crate::domain::generation::SummaryGenerator;
use crate::domain::interview::Interview;
use crate::domain::session::{Session, SessionCompleted, SessionError, SessionSummary};
use crate::ports::{
    EventPublisher, ProviderResolver, SessionRepository, SummaryRepository, TranscriptStore,
};

/// Shared finalize step for `submitAnswer` (budget exhausted) and
/// `completeEarly`.
pub struct Finalizer {
    sessions: Arc<dyn SessionRepository>,
    transcripts: Arc<dyn TranscriptStore>,
    summaries: Arc<dyn SummaryRepository>,
    providers: Arc<dyn ProviderResolver>,
    events: Arc<dyn EventPublisher>,
    generator: SummaryGenerator,
}

impl Finalizer {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        transcripts: Arc<dyn TranscriptStore>,
        summaries: Arc<dyn SummaryRepository>,
        providers: Arc<dyn ProviderResolver>,
        events: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            sessions,
            transcripts,
            summaries,
            providers,
            events,
            generator: SummaryGenerator::new(),
        }
    }

    /// Complete the session and attempt a summary.
    ///
    /// The completion itself is the only fallible part callers observe:
    /// summary production is best-effort and its failure leaves the
    /// session `Completed` with no summary, which is a valid state.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if the session is not in progress
    /// - `Conflict` if a concurrent caller finalized or advanced it first
    pub async fn finalize(
        &self,
        session: &mut Session,
        interview: &Interview,
        completed_early: bool,
    ) -> Result<(), SessionError> {
        let expected_version = session.version();
        session.complete()?;
        self.sessions.update(session, expected_version).await?;

        let summary_recorded = self.produce_summary(session, interview).await;

        let event = SessionCompleted {
            event_id: EventId::new(),
            session_id: *session.id(),
            questions_asked: session.questions_asked(),
            completed_early,
            summary_recorded,
            completed_at: *session
                .completed_at()
                .expect("completed session has a completion time"),
        };
        self.events.publish(event.to_envelope()).await?;

        Ok(())
    }

    /// Generates and persists the summary, swallowing every failure.
    ///
    /// Returns true when a summary was recorded.
    async fn produce_summary(&self, session: &Session, interview: &Interview) -> bool {
        let provider = match self.providers.resolve(interview.owner_id()).await {
            Ok(provider) => provider,
            Err(err) => {
                tracing::warn!(session_id = %session.id(), error = %err, "no completion provider at finalize; completing without summary");
                return false;
            }
        };

        let turns = match self.transcripts.list_turns(session.id()).await {
            Ok(turns) => turns,
            Err(err) => {
                tracing::warn!(session_id = %session.id(), error = %err, "could not load transcript at finalize; completing without summary");
                return false;
            }
        };

        let parts = match self
            .generator
            .generate(provider.as_ref(), interview.prompt(), &turns)
            .await
        {
            Ok(parts) => parts,
            Err(err) => {
                tracing::warn!(session_id = %session.id(), error = %err, "summary generation failed; completing without summary");
                return false;
            }
        };

        let summary = SessionSummary::new(
            *session.id(),
            *interview.id(),
            parts.summary,
            parts.key_insights,
            parts.structured_data,
        );

        match self.summaries.save(&summary).await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(session_id = %session.id(), error = %err, "summary persistence failed; completing without summary");
                false
            }
        }
    }
}
