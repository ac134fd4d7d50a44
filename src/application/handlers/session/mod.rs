//! Session-facing handlers: the respondent surface plus operator
//! transcript access.
//!
//! These handlers orchestrate the session state machine: they load
//! aggregates, call the generators, and persist results. All sequencing
//! rules (atomic start, the answer idempotency guard, compare-and-swap
//! index advancement, best-effort finalization) live here and in
//! `Finalizer`.

mod abandon_session;
mod complete_early;
mod finalizer;
mod get_summary;
mod get_transcript;
mod start_session;
mod submit_answer;

#[cfg(test)]
pub(crate) mod support;

pub use abandon_session::{AbandonSessionCommand, AbandonSessionHandler};
pub use complete_early::{CompleteEarlyCommand, CompleteEarlyHandler, CompleteEarlyResult};
pub use finalizer::Finalizer;
pub use get_summary::{GetSummaryHandler, GetSummaryQuery, SessionSummaryView};
pub use get_transcript::{GetTranscriptHandler, GetTranscriptQuery, TranscriptView};
pub use start_session::{StartSessionCommand, StartSessionHandler, StartSessionResult};
pub use submit_answer::{SubmitAnswerCommand, SubmitAnswerHandler, SubmitAnswerResult};
