//! SubmitAnswerHandler - Command handler for answering the current question.
//!
//! The turn-progression core. Ordering rules:
//!
//! 1. The respondent's answer is appended before anything fallible runs,
//!    so respondent input is never lost. A retry after a failed
//!    generation is detected by the transcript's tail and does not append
//!    the answer twice.
//! 2. The question index is advanced through the repository's
//!    compare-and-swap BEFORE the new question turn is appended, so two
//!    racing submissions can never both record a turn for the same
//!    question number; the loser observes `Conflict`.
//! 3. Budget exhaustion finalizes in the same call that recorded the
//!    triggering answer; a session never rests at index == budget while
//!    still in progress.

use std::sync::Arc;

use crate::domain::foundation::{EventId, SerializableDomainEvent, SessionId, Timestamp};
use crate::domain::generation::QuestionGenerator;
use crate::domain::session::{AnswerSubmitted, SessionError};
use crate::domain::transcript::Turn;
use crate::ports::{
    EventPublisher, InterviewRepository, ProviderResolver, SessionRepository, TranscriptStore,
};

use super::Finalizer;

/// Command to submit an answer to the session's current question.
#[derive(Debug, Clone)]
pub struct SubmitAnswerCommand {
    pub session_id: SessionId,
    pub answer: String,
}

/// Result of a successful submission.
#[derive(Debug, Clone)]
pub struct SubmitAnswerResult {
    /// True when this answer closed the session.
    pub completed: bool,
    /// The next question, when the session continues.
    pub next_question: Option<String>,
    /// The next question's 1-based number.
    pub question_number: Option<u32>,
    /// The interview's question budget.
    pub total_questions: u32,
}

/// Handler for answer submission.
pub struct SubmitAnswerHandler {
    interviews: Arc<dyn InterviewRepository>,
    sessions: Arc<dyn SessionRepository>,
    transcripts: Arc<dyn TranscriptStore>,
    providers: Arc<dyn ProviderResolver>,
    events: Arc<dyn EventPublisher>,
    finalizer: Arc<Finalizer>,
    generator: QuestionGenerator,
}

impl SubmitAnswerHandler {
    pub fn new(
        interviews: Arc<dyn InterviewRepository>,
        sessions: Arc<dyn SessionRepository>,
        transcripts: Arc<dyn TranscriptStore>,
        providers: Arc<dyn ProviderResolver>,
        events: Arc<dyn EventPublisher>,
        finalizer: Arc<Finalizer>,
    ) -> Self {
        Self {
            interviews,
            sessions,
            transcripts,
            providers,
            events,
            finalizer,
            generator: QuestionGenerator::new(),
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitAnswerCommand,
    ) -> Result<SubmitAnswerResult, SessionError> {
        let mut session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or(SessionError::NotFound(cmd.session_id))?;

        if !session.is_in_progress() {
            return Err(SessionError::invalid_state(format!(
                "Session is {:?}; answers are no longer accepted",
                session.status()
            )));
        }

        let interview = self
            .interviews
            .find_by_id(session.interview_id())
            .await?
            .ok_or(SessionError::InterviewUnavailable(*session.interview_id()))?;

        let answer = Turn::answer(cmd.session_id, cmd.answer)?;

        let mut turns = self.transcripts.list_turns(&cmd.session_id).await?;

        // Idempotency guard: append the answer only when the transcript
        // ends with an unanswered question. A retry after a failed
        // generation arrives with the answer already recorded.
        if turns.last().map(Turn::is_answer).unwrap_or(false) {
            tracing::debug!(session_id = %cmd.session_id, "answer already recorded; treating as retry");
        } else {
            self.transcripts.append(&answer).await?;
            turns.push(answer);

            let event = AnswerSubmitted {
                event_id: EventId::new(),
                session_id: cmd.session_id,
                question_number: session.questions_asked(),
                occurred_at: Timestamp::now(),
            };
            self.events.publish(event.to_envelope()).await?;
        }

        if session.has_exhausted_budget(interview.question_budget()) {
            self.finalizer
                .finalize(&mut session, &interview, false)
                .await?;

            return Ok(SubmitAnswerResult {
                completed: true,
                next_question: None,
                question_number: None,
                total_questions: interview.question_budget(),
            });
        }

        let provider = self.providers.resolve(interview.owner_id()).await?;

        let next_number = session.questions_asked() + 1;
        let next_question = self
            .generator
            .generate(
                provider.as_ref(),
                interview.prompt(),
                &turns,
                next_number,
                interview.question_budget(),
            )
            .await
            .map_err(|err| SessionError::generation(err.to_string()))?;

        // Reserve the question number via compare-and-swap before the
        // turn exists; the losing side of a race stops here.
        let expected_version = session.version();
        let question_number = session.record_question_asked(interview.question_budget())?;
        self.sessions.update(&session, expected_version).await?;

        let turn = Turn::question(cmd.session_id, question_number, next_question.clone())?;
        self.transcripts.append(&turn).await?;

        tracing::info!(
            session_id = %cmd.session_id,
            question_number,
            "next question generated"
        );

        Ok(SubmitAnswerResult {
            completed: false,
            next_question: Some(next_question),
            question_number: Some(question_number),
            total_questions: interview.question_budget(),
        })
    }
}
