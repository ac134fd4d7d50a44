//! ListInterviewsHandler - Operator listing of owned interviews.

use std::sync::Arc;

use crate::domain::foundation::OwnerId;
use crate::domain::interview::{Interview, InterviewError};
use crate::ports::InterviewRepository;

/// Query for an operator's interviews.
#[derive(Debug, Clone)]
pub struct ListInterviewsQuery {
    pub owner_id: OwnerId,
}

/// Handler for listing an operator's interviews.
pub struct ListInterviewsHandler {
    interviews: Arc<dyn InterviewRepository>,
}

impl ListInterviewsHandler {
    pub fn new(interviews: Arc<dyn InterviewRepository>) -> Self {
        Self { interviews }
    }

    pub async fn handle(&self, query: ListInterviewsQuery) -> Result<Vec<Interview>, InterviewError> {
        Ok(self.interviews.find_by_owner(&query.owner_id).await?)
    }
}
