//! Transcript store port.
//!
//! The transcript is append-only: the core never mutates or deletes a
//! turn once written. Ordering is by the store's assignment sequence.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::transcript::Turn;

/// Port for the append-only transcript record.
#[async_trait]
pub trait TranscriptStore: Send + Sync {
    /// Append a turn to a session's transcript.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn append(&self, turn: &Turn) -> Result<(), DomainError>;

    /// List a session's turns in assignment order.
    ///
    /// Returns an empty list for an unknown session; existence checks
    /// belong to the session repository.
    async fn list_turns(&self, session_id: &SessionId) -> Result<Vec<Turn>, DomainError>;
}
