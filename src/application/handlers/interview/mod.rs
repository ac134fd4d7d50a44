//! Interview-facing handlers (operator surface plus the public token
//! lookup).

mod archive_interview;
mod create_interview;
mod list_interview_sessions;
mod list_interviews;
mod resolve_share_token;

pub use archive_interview::{ArchiveInterviewCommand, ArchiveInterviewHandler};
pub use create_interview::{CreateInterviewCommand, CreateInterviewHandler, CreateInterviewResult};
pub use list_interview_sessions::{
    InterviewSessionsView, ListInterviewSessionsHandler, ListInterviewSessionsQuery,
};
pub use list_interviews::{ListInterviewsHandler, ListInterviewsQuery};
pub use resolve_share_token::{
    InterviewPublicView, ResolveShareTokenHandler, ResolveShareTokenQuery,
};
