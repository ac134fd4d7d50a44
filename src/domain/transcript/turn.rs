//! Turn entity for session transcripts.
//!
//! Turns are immutable records of the question/answer exchange within a
//! session. Ordering is by the store's assignment sequence, never by
//! wall-clock time; the store's timestamp resolution cannot be assumed
//! unique.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, SessionId, Timestamp, TurnId};

/// Role of a turn within a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    /// A generated question.
    Interviewer,
    /// A respondent's answer.
    Respondent,
}

/// An immutable turn within a session transcript.
///
/// # Invariants
///
/// - `content` is non-empty (validated at construction)
/// - `question_number` is present exactly when the role is `Interviewer`
/// - Turns are never mutated or deleted once written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Unique identifier for this turn.
    id: TurnId,

    /// The session this turn belongs to.
    session_id: SessionId,

    /// Who produced this turn.
    role: TurnRole,

    /// The question or answer text.
    content: String,

    /// For interviewer turns, the 1-based question number.
    question_number: Option<u32>,

    /// When the turn was created.
    created_at: Timestamp,
}

impl Turn {
    /// Creates an interviewer turn carrying the given question number.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if content is empty
    pub fn question(
        session_id: SessionId,
        question_number: u32,
        content: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let content = content.into();
        Self::validate_content(&content)?;

        Ok(Self {
            id: TurnId::new(),
            session_id,
            role: TurnRole::Interviewer,
            content,
            question_number: Some(question_number),
            created_at: Timestamp::now(),
        })
    }

    /// Creates a respondent turn.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if content is empty
    pub fn answer(session_id: SessionId, content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        Self::validate_content(&content)?;

        Ok(Self {
            id: TurnId::new(),
            session_id,
            role: TurnRole::Respondent,
            content,
            question_number: None,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitutes a turn from persistence (no validation).
    pub fn reconstitute(
        id: TurnId,
        session_id: SessionId,
        role: TurnRole,
        content: String,
        question_number: Option<u32>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            session_id,
            role,
            content,
            question_number,
            created_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the turn ID.
    pub fn id(&self) -> &TurnId {
        &self.id
    }

    /// Returns the session this turn belongs to.
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Returns the role.
    pub fn role(&self) -> TurnRole {
        self.role
    }

    /// Returns the content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the question number, for interviewer turns.
    pub fn question_number(&self) -> Option<u32> {
        self.question_number
    }

    /// Returns when the turn was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns true if this turn is a generated question.
    pub fn is_question(&self) -> bool {
        self.role == TurnRole::Interviewer
    }

    /// Returns true if this turn is a respondent's answer.
    pub fn is_answer(&self) -> bool {
        self.role == TurnRole::Respondent
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn validate_content(content: &str) -> Result<(), DomainError> {
        if content.trim().is_empty() {
            return Err(DomainError::validation(
                "content",
                "Turn content cannot be empty",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod construction {
        use super::*;

        #[test]
        fn question_carries_number_and_role() {
            let turn = Turn::question(SessionId::new(), 1, "What brings you here?").unwrap();
            assert!(turn.is_question());
            assert_eq!(turn.question_number(), Some(1));
            assert_eq!(turn.content(), "What brings you here?");
        }

        #[test]
        fn answer_has_no_question_number() {
            let turn = Turn::answer(SessionId::new(), "I like the beach").unwrap();
            assert!(turn.is_answer());
            assert!(turn.question_number().is_none());
        }

        #[test]
        fn rejects_empty_content() {
            assert!(Turn::question(SessionId::new(), 1, "").is_err());
            assert!(Turn::answer(SessionId::new(), "   ").is_err());
        }
    }

    mod reconstitute {
        use super::*;

        #[test]
        fn preserves_all_fields() {
            let id = TurnId::new();
            let session_id = SessionId::new();
            let created_at = Timestamp::now();

            let turn = Turn::reconstitute(
                id,
                session_id,
                TurnRole::Interviewer,
                "Question?".to_string(),
                Some(2),
                created_at,
            );

            assert_eq!(turn.id(), &id);
            assert_eq!(turn.session_id(), &session_id);
            assert_eq!(turn.role(), TurnRole::Interviewer);
            assert_eq!(turn.question_number(), Some(2));
            assert_eq!(turn.created_at(), &created_at);
        }
    }

    #[test]
    fn role_serializes_to_snake_case() {
        let json = serde_json::to_string(&TurnRole::Interviewer).unwrap();
        assert_eq!(json, "\"interviewer\"");
        let json = serde_json::to_string(&TurnRole::Respondent).unwrap();
        assert_eq!(json, "\"respondent\"");
    }
}
