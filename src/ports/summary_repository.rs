//! Summary repository port.
//!
//! Summaries are written exactly once, by the finalize step. A completed
//! session with no summary is a valid state; reads are best-effort.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::session::SessionSummary;

/// Port for session summary persistence.
#[async_trait]
pub trait SummaryRepository: Send + Sync {
    /// Save a summary.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the session already has a summary
    /// - `DatabaseError` on persistence failure
    async fn save(&self, summary: &SessionSummary) -> Result<(), DomainError>;

    /// Find the summary for a session.
    ///
    /// Returns `None` if the session has no summary.
    async fn find_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<SessionSummary>, DomainError>;
}
