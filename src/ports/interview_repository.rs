//! Interview repository port.
//!
//! Defines the contract for persisting and retrieving Interview
//! templates. Implementations handle the actual database operations.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, InterviewId, OwnerId};
use crate::domain::interview::{Interview, ShareToken};

/// Repository port for Interview template persistence.
#[async_trait]
pub trait InterviewRepository: Send + Sync {
    /// Save a new interview.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, interview: &Interview) -> Result<(), DomainError>;

    /// Update an existing interview (archival only; templates are
    /// otherwise immutable).
    ///
    /// # Errors
    ///
    /// - `InterviewNotFound` if the interview doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, interview: &Interview) -> Result<(), DomainError>;

    /// Find an interview by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &InterviewId) -> Result<Option<Interview>, DomainError>;

    /// Find an interview by its shareable token.
    ///
    /// Returns `None` if no interview carries the token. Archived
    /// interviews ARE returned; token-lookup policy is the caller's.
    async fn find_by_share_token(
        &self,
        token: &ShareToken,
    ) -> Result<Option<Interview>, DomainError>;

    /// Find all interviews owned by an operator.
    ///
    /// Returns interviews ordered by created_at descending.
    async fn find_by_owner(&self, owner_id: &OwnerId) -> Result<Vec<Interview>, DomainError>;
}
