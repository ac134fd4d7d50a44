//! ResolveShareTokenHandler - Public lookup of an interview by its token.
//!
//! An archived interview's token resolves to not-found even though the
//! record still exists; respondents never learn the difference.

use std::sync::Arc;

use crate::domain::foundation::InterviewId;
use crate::domain::interview::{InterviewError, ShareToken};
use crate::ports::InterviewRepository;

/// Query to resolve an interview from its shareable token.
#[derive(Debug, Clone)]
pub struct ResolveShareTokenQuery {
    pub token: String,
}

/// The respondent-visible slice of an interview.
#[derive(Debug, Clone)]
pub struct InterviewPublicView {
    pub id: InterviewId,
    pub title: String,
    pub question_budget: u32,
}

/// Handler for resolving share tokens.
pub struct ResolveShareTokenHandler {
    interviews: Arc<dyn InterviewRepository>,
}

impl ResolveShareTokenHandler {
    pub fn new(interviews: Arc<dyn InterviewRepository>) -> Self {
        Self { interviews }
    }

    pub async fn handle(
        &self,
        query: ResolveShareTokenQuery,
    ) -> Result<InterviewPublicView, InterviewError> {
        // A token that doesn't even parse is indistinguishable from an
        // unknown one.
        let token = ShareToken::new(query.token.clone())
            .map_err(|_| InterviewError::not_found_by_token(query.token.clone()))?;

        let interview = self
            .interviews
            .find_by_share_token(&token)
            .await?
            .filter(|interview| interview.status().accepts_sessions())
            .ok_or_else(|| InterviewError::not_found_by_token(query.token))?;

        Ok(InterviewPublicView {
            id: *interview.id(),
            title: interview.title().to_string(),
            question_budget: interview.question_budget(),
        })
    }
}
