//! Session lifecycle status.

use serde::{Deserialize, Serialize};

/// Lifecycle status of an interview session.
///
/// `Completed` and `Abandoned` are terminal: there is no transition out
/// of either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// The respondent is still answering questions.
    InProgress,
    /// The session finished, by budget exhaustion or early completion.
    Completed,
    /// An operator closed the session without finalizing it.
    Abandoned,
}

impl SessionStatus {
    /// Returns true if no further transitions are allowed.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Abandoned)
    }

    /// Returns true if the given transition is allowed.
    pub fn can_transition_to(&self, next: &SessionStatus) -> bool {
        match (self, next) {
            (Self::InProgress, Self::Completed) => true,
            (Self::InProgress, Self::Abandoned) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_progress_is_not_terminal() {
        assert!(!SessionStatus::InProgress.is_terminal());
    }

    #[test]
    fn completed_and_abandoned_are_terminal() {
        assert!(SessionStatus::Completed.is_terminal());
        assert!(SessionStatus::Abandoned.is_terminal());
    }

    #[test]
    fn in_progress_can_complete_or_abandon() {
        assert!(SessionStatus::InProgress.can_transition_to(&SessionStatus::Completed));
        assert!(SessionStatus::InProgress.can_transition_to(&SessionStatus::Abandoned));
    }

    #[test]
    fn terminal_states_allow_no_transitions() {
        for terminal in [SessionStatus::Completed, SessionStatus::Abandoned] {
            assert!(!terminal.can_transition_to(&SessionStatus::InProgress));
            assert!(!terminal.can_transition_to(&SessionStatus::Completed));
            assert!(!terminal.can_transition_to(&SessionStatus::Abandoned));
        }
    }

    #[test]
    fn serializes_to_snake_case() {
        let json = serde_json::to_string(&SessionStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }
}
