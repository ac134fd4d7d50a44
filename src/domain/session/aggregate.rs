//! Session aggregate entity.
//!
//! A session is one respondent's run against exactly one interview.
//! The aggregate is the sole writer of `status` and `questions_asked`;
//! everything else in the system treats both as read-only.
//!
//! # Ownership
//!
//! Transcript turns are referenced by session id but owned by the
//! transcript store; the session never holds them in memory.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::foundation::{DomainError, ErrorCode, InterviewId, SessionId, Timestamp};

use super::SessionStatus;

/// Optional respondent-provided identification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RespondentInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Free-form metadata supplied at start time.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

impl RespondentInfo {
    /// Returns true if no field carries any information.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.metadata.is_empty()
    }
}

/// Session aggregate - one respondent's run through an interview.
///
/// # Invariants
///
/// - `questions_asked` starts at 0, increments by exactly one per
///   interviewer turn, and never decreases
/// - `questions_asked` never exceeds the interview's question budget
/// - `Completed` and `Abandoned` are terminal; no mutation succeeds on them
/// - `completed_at` is stamped exactly once, on the transition to `Completed`
/// - `version` increments on every successful mutation; persistence uses it
///   as the compare-and-swap token that serializes concurrent submissions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier for this session.
    id: SessionId,

    /// The interview this session runs against.
    interview_id: InterviewId,

    /// Current lifecycle status.
    status: SessionStatus,

    /// Number of questions asked so far (the current question index).
    questions_asked: u32,

    /// Respondent identification, if provided.
    respondent: Option<RespondentInfo>,

    /// When the session started.
    started_at: Timestamp,

    /// When the session completed, if it has.
    completed_at: Option<Timestamp>,

    /// Optimistic concurrency token.
    version: u64,
}

impl Session {
    /// Create a new in-progress session with no questions asked.
    pub fn new(interview_id: InterviewId, respondent: Option<RespondentInfo>) -> Self {
        Self {
            id: SessionId::new(),
            interview_id,
            status: SessionStatus::InProgress,
            questions_asked: 0,
            respondent: respondent.filter(|info| !info.is_empty()),
            started_at: Timestamp::now(),
            completed_at: None,
            version: 1,
        }
    }

    /// Reconstitute a session from persistence (no validation, no events).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SessionId,
        interview_id: InterviewId,
        status: SessionStatus,
        questions_asked: u32,
        respondent: Option<RespondentInfo>,
        started_at: Timestamp,
        completed_at: Option<Timestamp>,
        version: u64,
    ) -> Self {
        Self {
            id,
            interview_id,
            status,
            questions_asked,
            respondent,
            started_at,
            completed_at,
            version,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the session ID.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns the interview this session runs against.
    pub fn interview_id(&self) -> &InterviewId {
        &self.interview_id
    }

    /// Returns the current status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Returns the number of questions asked so far.
    pub fn questions_asked(&self) -> u32 {
        self.questions_asked
    }

    /// Returns the respondent info, if provided.
    pub fn respondent(&self) -> Option<&RespondentInfo> {
        self.respondent.as_ref()
    }

    /// Returns when the session started.
    pub fn started_at(&self) -> &Timestamp {
        &self.started_at
    }

    /// Returns when the session completed, if it has.
    pub fn completed_at(&self) -> Option<&Timestamp> {
        self.completed_at.as_ref()
    }

    /// Returns the optimistic concurrency token.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Returns true if the session is still accepting answers.
    pub fn is_in_progress(&self) -> bool {
        self.status == SessionStatus::InProgress
    }

    /// Returns true if every budgeted question has been asked.
    pub fn has_exhausted_budget(&self, question_budget: u32) -> bool {
        self.questions_asked >= question_budget
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Record that one more question was asked, returning its 1-based number.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the session is not in progress
    /// - `OutOfRange` if the budget is already exhausted
    pub fn record_question_asked(&mut self, question_budget: u32) -> Result<u32, DomainError> {
        self.ensure_in_progress()?;

        if self.questions_asked >= question_budget {
            return Err(DomainError::new(
                ErrorCode::OutOfRange,
                format!(
                    "Question budget of {} already exhausted",
                    question_budget
                ),
            ));
        }

        self.questions_asked += 1;
        self.version += 1;
        Ok(self.questions_asked)
    }

    /// Transition to `Completed`, stamping the completion time.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the session is not in progress
    pub fn complete(&mut self) -> Result<(), DomainError> {
        if !self.status.can_transition_to(&SessionStatus::Completed) {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot complete a session in status {:?}", self.status),
            ));
        }

        self.status = SessionStatus::Completed;
        self.completed_at = Some(Timestamp::now());
        self.version += 1;
        Ok(())
    }

    /// Transition to `Abandoned` without finalizing.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the session is not in progress
    pub fn abandon(&mut self) -> Result<(), DomainError> {
        if !self.status.can_transition_to(&SessionStatus::Abandoned) {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot abandon a session in status {:?}", self.status),
            ));
        }

        self.status = SessionStatus::Abandoned;
        self.version += 1;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn ensure_in_progress(&self) -> Result<(), DomainError> {
        if self.is_in_progress() {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Session is {:?}, not in progress", self.status),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_session() -> Session {
        Session::new(InterviewId::new(), None)
    }

    // Construction tests

    #[test]
    fn new_session_is_in_progress_with_zero_questions() {
        let session = test_session();
        assert_eq!(session.status(), SessionStatus::InProgress);
        assert_eq!(session.questions_asked(), 0);
        assert!(session.completed_at().is_none());
    }

    #[test]
    fn new_session_drops_empty_respondent_info() {
        let session = Session::new(InterviewId::new(), Some(RespondentInfo::default()));
        assert!(session.respondent().is_none());
    }

    #[test]
    fn new_session_keeps_populated_respondent_info() {
        let info = RespondentInfo {
            name: Some("Ada".to_string()),
            ..Default::default()
        };
        let session = Session::new(InterviewId::new(), Some(info));
        assert_eq!(session.respondent().unwrap().name.as_deref(), Some("Ada"));
    }

    // Question counting tests

    #[test]
    fn record_question_increments_and_returns_number() {
        let mut session = test_session();
        assert_eq!(session.record_question_asked(3).unwrap(), 1);
        assert_eq!(session.record_question_asked(3).unwrap(), 2);
        assert_eq!(session.questions_asked(), 2);
    }

    #[test]
    fn record_question_bumps_version() {
        let mut session = test_session();
        let before = session.version();
        session.record_question_asked(3).unwrap();
        assert_eq!(session.version(), before + 1);
    }

    #[test]
    fn record_question_fails_when_budget_exhausted() {
        let mut session = test_session();
        session.record_question_asked(1).unwrap();
        let result = session.record_question_asked(1);
        assert!(result.is_err());
        assert_eq!(session.questions_asked(), 1);
    }

    #[test]
    fn record_question_fails_on_completed_session() {
        let mut session = test_session();
        session.complete().unwrap();
        assert!(session.record_question_asked(3).is_err());
    }

    #[test]
    fn budget_exhaustion_check_matches_count() {
        let mut session = test_session();
        assert!(!session.has_exhausted_budget(2));
        session.record_question_asked(2).unwrap();
        session.record_question_asked(2).unwrap();
        assert!(session.has_exhausted_budget(2));
    }

    // Transition tests

    #[test]
    fn complete_stamps_completion_time() {
        let mut session = test_session();
        session.complete().unwrap();
        assert_eq!(session.status(), SessionStatus::Completed);
        assert!(session.completed_at().is_some());
    }

    #[test]
    fn complete_twice_fails() {
        let mut session = test_session();
        session.complete().unwrap();
        assert!(session.complete().is_err());
    }

    #[test]
    fn abandon_from_in_progress_succeeds() {
        let mut session = test_session();
        session.abandon().unwrap();
        assert_eq!(session.status(), SessionStatus::Abandoned);
        assert!(session.completed_at().is_none());
    }

    #[test]
    fn abandon_after_complete_fails() {
        let mut session = test_session();
        session.complete().unwrap();
        assert!(session.abandon().is_err());
    }

    #[test]
    fn complete_after_abandon_fails() {
        let mut session = test_session();
        session.abandon().unwrap();
        assert!(session.complete().is_err());
    }

    // Invariant properties

    #[derive(Debug, Clone)]
    enum Op {
        Ask,
        Complete,
        Abandon,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => Just(Op::Ask),
            1 => Just(Op::Complete),
            1 => Just(Op::Abandon),
        ]
    }

    proptest! {
        #[test]
        fn questions_asked_is_monotone_and_bounded(
            budget in 1u32..=50,
            ops in proptest::collection::vec(op_strategy(), 0..120),
        ) {
            let mut session = test_session();
            let mut last_count = session.questions_asked();

            for op in ops {
                let _ = match op {
                    Op::Ask => session.record_question_asked(budget).map(|_| ()),
                    Op::Complete => session.complete(),
                    Op::Abandon => session.abandon(),
                };

                prop_assert!(session.questions_asked() >= last_count);
                prop_assert!(session.questions_asked() <= budget);
                last_count = session.questions_asked();
            }
        }

        #[test]
        fn terminal_states_absorb_all_operations(
            budget in 1u32..=50,
            ops in proptest::collection::vec(op_strategy(), 0..60),
        ) {
            let mut session = test_session();
            session.complete().unwrap();
            let frozen = session.clone();

            for op in ops {
                let _ = match op {
                    Op::Ask => session.record_question_asked(budget).map(|_| ()),
                    Op::Complete => session.complete(),
                    Op::Abandon => session.abandon(),
                };
                prop_assert_eq!(&session, &frozen);
            }
        }
    }
}
