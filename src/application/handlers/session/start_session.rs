//! StartSessionHandler - Command handler for starting a session.
//!
//! Creation and first-question generation are one atomic unit from the
//! caller's perspective: nothing is persisted until the first question
//! exists, so a provider failure leaves no partial session behind.

use std::sync::Arc;

use crate::domain::foundation::{EventId, InterviewId, SerializableDomainEvent, SessionId};
use crate::domain::generation::QuestionGenerator;
use crate::domain::session::{RespondentInfo, Session, SessionError, SessionStarted};
use crate::domain::transcript::Turn;
use crate::ports::{
    EventPublisher, InterviewRepository, ProviderResolver, SessionRepository, TranscriptStore,
};

/// Command to start a session against an interview.
#[derive(Debug, Clone)]
pub struct StartSessionCommand {
    pub interview_id: InterviewId,
    pub respondent: Option<RespondentInfo>,
}

/// Result of a successful start.
#[derive(Debug, Clone)]
pub struct StartSessionResult {
    pub session_id: SessionId,
    pub first_question: String,
    pub question_number: u32,
    pub total_questions: u32,
}

/// Handler for starting sessions.
pub struct StartSessionHandler {
    interviews: Arc<dyn InterviewRepository>,
    sessions: Arc<dyn SessionRepository>,
    transcripts: Arc<dyn TranscriptStore>,
    providers: Arc<dyn ProviderResolver>,
    events: Arc<dyn EventPublisher>,
    generator: QuestionGenerator,
}

impl StartSessionHandler {
    pub fn new(
        interviews: Arc<dyn InterviewRepository>,
        sessions: Arc<dyn SessionRepository>,
        transcripts: Arc<dyn TranscriptStore>,
        providers: Arc<dyn ProviderResolver>,
        events: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            interviews,
            sessions,
            transcripts,
            providers,
            events,
            generator: QuestionGenerator::new(),
        }
    }

    pub async fn handle(
        &self,
        cmd: StartSessionCommand,
    ) -> Result<StartSessionResult, SessionError> {
        let interview = self
            .interviews
            .find_by_id(&cmd.interview_id)
            .await?
            .filter(|interview| interview.status().accepts_sessions())
            .ok_or(SessionError::InterviewUnavailable(cmd.interview_id))?;

        let provider = self
            .providers
            .resolve(interview.owner_id())
            .await
            .map_err(|err| SessionError::start_failed(err.to_string()))?;

        let mut session = Session::new(cmd.interview_id, cmd.respondent);

        // Generate before persisting anything: a failed call must leave
        // no partial session visible.
        let first_question = self
            .generator
            .generate(provider.as_ref(), interview.prompt(), &[], 1, interview.question_budget())
            .await
            .map_err(|err| SessionError::start_failed(err.to_string()))?;

        let question_number = session
            .record_question_asked(interview.question_budget())
            .map_err(SessionError::from)?;

        self.sessions.save(&session).await?;

        let turn = Turn::question(*session.id(), question_number, first_question.clone())?;
        self.transcripts.append(&turn).await?;

        let event = SessionStarted {
            event_id: EventId::new(),
            session_id: *session.id(),
            interview_id: cmd.interview_id,
            started_at: *session.started_at(),
        };
        self.events.publish(event.to_envelope()).await?;

        tracing::info!(
            session_id = %session.id(),
            interview_id = %cmd.interview_id,
            "session started"
        );

        Ok(StartSessionResult {
            session_id: *session.id(),
            first_question,
            question_number,
            total_questions: interview.question_budget(),
        })
    }
}
