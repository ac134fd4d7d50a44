//! Interview template aggregate.
//!
//! An interview is immutable once created, except for archival. Archiving
//! permanently disables new sessions against it; sessions already in
//! progress are unaffected.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, InterviewId, OwnerId, Timestamp};

use super::ShareToken;

/// Maximum length for an interview title.
pub const MAX_TITLE_LENGTH: usize = 500;

/// Upper bound on the question budget.
pub const MAX_QUESTION_BUDGET: u32 = 50;

/// Lifecycle status of an interview template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewStatus {
    /// Accepting new sessions.
    Active,
    /// No new sessions may start; existing sessions keep running.
    Archived,
}

impl InterviewStatus {
    /// Returns true if new sessions may be started against the interview.
    pub fn accepts_sessions(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Interview template aggregate.
///
/// # Invariants
///
/// - `id` and `share_token` are globally unique
/// - `title` is 1-500 characters, non-empty
/// - `prompt` is non-empty
/// - `question_budget` is in 1..=50
/// - Archived interviews never return to `Active`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interview {
    /// Unique identifier for this interview.
    id: InterviewId,

    /// Operator who owns this interview.
    owner_id: OwnerId,

    /// Display title.
    title: String,

    /// The instruction for what to interview about.
    prompt: String,

    /// Maximum number of questions a session will be asked.
    question_budget: u32,

    /// Token respondents use to reach the interview.
    share_token: ShareToken,

    /// Current status (Active or Archived).
    status: InterviewStatus,

    /// When the interview was created.
    created_at: Timestamp,

    /// When the interview was last updated.
    updated_at: Timestamp,
}

impl Interview {
    /// Create a new active interview.
    ///
    /// The share token is derived from the freshly generated id.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if title or prompt is empty, title is too long,
    ///   or the question budget is out of range
    pub fn new(
        owner_id: OwnerId,
        title: String,
        prompt: String,
        question_budget: u32,
    ) -> Result<Self, DomainError> {
        Self::validate_title(&title)?;
        Self::validate_prompt(&prompt)?;
        Self::validate_budget(question_budget)?;

        let id = InterviewId::new();
        let share_token = ShareToken::for_interview(&id);
        let now = Timestamp::now();
        Ok(Self {
            id,
            owner_id,
            title,
            prompt,
            question_budget,
            share_token,
            status: InterviewStatus::Active,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute an interview from persistence (no validation, no events).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: InterviewId,
        owner_id: OwnerId,
        title: String,
        prompt: String,
        question_budget: u32,
        share_token: ShareToken,
        status: InterviewStatus,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            owner_id,
            title,
            prompt,
            question_budget,
            share_token,
            status,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the interview ID.
    pub fn id(&self) -> &InterviewId {
        &self.id
    }

    /// Returns the owner's ID.
    pub fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }

    /// Returns the title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the topic prompt.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Returns the question budget.
    pub fn question_budget(&self) -> u32 {
        self.question_budget
    }

    /// Returns the shareable token.
    pub fn share_token(&self) -> &ShareToken {
        &self.share_token
    }

    /// Returns the current status.
    pub fn status(&self) -> InterviewStatus {
        self.status
    }

    /// Returns when the interview was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns when the interview was last updated.
    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authorization
    // ─────────────────────────────────────────────────────────────────────────

    /// Checks if the given operator owns this interview.
    pub fn is_owner(&self, owner_id: &OwnerId) -> bool {
        &self.owner_id == owner_id
    }

    /// Validates that the operator can access this interview.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the operator is not the owner
    pub fn authorize(&self, owner_id: &OwnerId) -> Result<(), DomainError> {
        if self.is_owner(owner_id) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "Operator is not authorized to access this interview",
            ))
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Archive the interview, disabling new sessions.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if already archived
    pub fn archive(&mut self) -> Result<(), DomainError> {
        if self.status == InterviewStatus::Archived {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Interview is already archived",
            ));
        }

        self.status = InterviewStatus::Archived;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn validate_title(title: &str) -> Result<(), DomainError> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("title", "Title cannot be empty"));
        }
        if trimmed.len() > MAX_TITLE_LENGTH {
            return Err(DomainError::validation(
                "title",
                format!("Title must be {} characters or less", MAX_TITLE_LENGTH),
            ));
        }
        Ok(())
    }

    fn validate_prompt(prompt: &str) -> Result<(), DomainError> {
        if prompt.trim().is_empty() {
            return Err(DomainError::validation(
                "prompt",
                "Topic prompt cannot be empty",
            ));
        }
        Ok(())
    }

    fn validate_budget(budget: u32) -> Result<(), DomainError> {
        if budget == 0 || budget > MAX_QUESTION_BUDGET {
            return Err(DomainError::validation(
                "question_budget",
                format!("Question budget must be between 1 and {}", MAX_QUESTION_BUDGET),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_owner() -> OwnerId {
        OwnerId::new("operator-123").unwrap()
    }

    fn test_interview() -> Interview {
        Interview::new(
            test_owner(),
            "Vacation preferences".to_string(),
            "Learn how this person likes to travel".to_string(),
            10,
        )
        .unwrap()
    }

    // Construction tests

    #[test]
    fn new_interview_is_active() {
        let interview = test_interview();
        assert_eq!(interview.status(), InterviewStatus::Active);
        assert!(interview.status().accepts_sessions());
    }

    #[test]
    fn new_interview_derives_share_token_from_id() {
        let interview = test_interview();
        let expected = ShareToken::for_interview(interview.id());
        assert_eq!(interview.share_token(), &expected);
    }

    #[test]
    fn new_interview_rejects_empty_title() {
        let result = Interview::new(test_owner(), "".to_string(), "prompt".to_string(), 5);
        assert!(result.is_err());
    }

    #[test]
    fn new_interview_rejects_whitespace_prompt() {
        let result = Interview::new(test_owner(), "Title".to_string(), "   ".to_string(), 5);
        assert!(result.is_err());
    }

    #[test]
    fn new_interview_rejects_zero_budget() {
        let result = Interview::new(test_owner(), "Title".to_string(), "prompt".to_string(), 0);
        assert!(result.is_err());
    }

    #[test]
    fn new_interview_rejects_oversized_budget() {
        let result = Interview::new(
            test_owner(),
            "Title".to_string(),
            "prompt".to_string(),
            MAX_QUESTION_BUDGET + 1,
        );
        assert!(result.is_err());
    }

    #[test]
    fn new_interview_accepts_budget_bounds() {
        assert!(Interview::new(test_owner(), "T".to_string(), "p".to_string(), 1).is_ok());
        assert!(Interview::new(
            test_owner(),
            "T".to_string(),
            "p".to_string(),
            MAX_QUESTION_BUDGET
        )
        .is_ok());
    }

    // Archive tests

    #[test]
    fn archive_changes_status() {
        let mut interview = test_interview();
        interview.archive().unwrap();
        assert_eq!(interview.status(), InterviewStatus::Archived);
        assert!(!interview.status().accepts_sessions());
    }

    #[test]
    fn archive_twice_fails() {
        let mut interview = test_interview();
        interview.archive().unwrap();
        assert!(interview.archive().is_err());
    }

    // Authorization tests

    #[test]
    fn owner_is_authorized() {
        let interview = test_interview();
        assert!(interview.authorize(&test_owner()).is_ok());
    }

    #[test]
    fn non_owner_is_forbidden() {
        let interview = test_interview();
        let other = OwnerId::new("someone-else").unwrap();
        let result = interview.authorize(&other);
        assert!(result.is_err());
    }
}
