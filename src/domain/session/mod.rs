//! Session module - one respondent's run through an interview.
//!
//! The `Session` aggregate is the heart of the system: it owns the
//! question index and the lifecycle status, and is the only writer of
//! either. Orchestration (generation, persistence, finalization) lives in
//! the application handlers; the invariants live here.

mod aggregate;
mod errors;
mod events;
mod status;
mod summary;

pub use aggregate::{RespondentInfo, Session};
pub use errors::SessionError;
pub use events::{AnswerSubmitted, SessionAbandoned, SessionCompleted, SessionStarted};
pub use status::SessionStatus;
pub use summary::SessionSummary;
