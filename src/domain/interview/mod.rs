//! Interview module - the reusable interview definition.
//!
//! An `Interview` is the template an operator shares with respondents:
//! a topic prompt, a question budget, and a shareable token. Sessions
//! are run against it but owned by the session module.

mod errors;
mod events;
mod share_token;
mod template;

pub use errors::InterviewError;
pub use events::{InterviewArchived, InterviewCreated};
pub use share_token::ShareToken;
pub use template::{Interview, InterviewStatus, MAX_QUESTION_BUDGET, MAX_TITLE_LENGTH};
