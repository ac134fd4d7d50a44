//! Session repository port (write side).
//!
//! Defines the contract for persisting and retrieving Session aggregates.
//!
//! # Design
//!
//! Updates are compare-and-swap: the caller passes the version it loaded,
//! and the update fails with `Conflict` if another writer got there first.
//! This is the per-session serialization point that keeps concurrent
//! submissions from both advancing the question index.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, InterviewId, SessionId};
use crate::domain::session::Session;

/// Repository port for Session aggregate persistence.
///
/// Implementations must ensure:
/// - `update` compares `expected_version` against the stored row and
///   fails with `ErrorCode::Conflict` on mismatch, leaving the row intact
/// - listing is ordered by start time descending
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Save a new session.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, session: &Session) -> Result<(), DomainError>;

    /// Update an existing session if its stored version matches.
    ///
    /// `expected_version` is the version the caller loaded before
    /// mutating; the session itself already carries the bumped version.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session doesn't exist
    /// - `Conflict` if the stored version differs from `expected_version`
    /// - `DatabaseError` on persistence failure
    async fn update(&self, session: &Session, expected_version: u64) -> Result<(), DomainError>;

    /// Find a session by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError>;

    /// Find all sessions run against an interview.
    ///
    /// Returns sessions ordered by started_at descending.
    async fn find_by_interview(
        &self,
        interview_id: &InterviewId,
    ) -> Result<Vec<Session>, DomainError>;
}
