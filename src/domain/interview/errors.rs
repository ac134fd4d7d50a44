//! Interview-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, InterviewId};

/// Interview-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterviewError {
    /// Interview was not found (or is archived, for token lookups).
    NotFound(String),
    /// Operator is not authorized.
    Forbidden,
    /// Interview is already archived.
    AlreadyArchived,
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl InterviewError {
    pub fn not_found(id: &InterviewId) -> Self {
        InterviewError::NotFound(id.to_string())
    }

    pub fn not_found_by_token(token: impl Into<String>) -> Self {
        InterviewError::NotFound(token.into())
    }

    pub fn forbidden() -> Self {
        InterviewError::Forbidden
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        InterviewError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        InterviewError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            InterviewError::NotFound(_) => ErrorCode::InterviewNotFound,
            InterviewError::Forbidden => ErrorCode::Forbidden,
            InterviewError::AlreadyArchived => ErrorCode::InterviewArchived,
            InterviewError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            InterviewError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            InterviewError::NotFound(key) => format!("Interview not found: {}", key),
            InterviewError::Forbidden => "Permission denied".to_string(),
            InterviewError::AlreadyArchived => "Interview is already archived".to_string(),
            InterviewError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            InterviewError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for InterviewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for InterviewError {}

impl From<DomainError> for InterviewError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InterviewNotFound => InterviewError::NotFound(err.message),
            ErrorCode::Forbidden => InterviewError::Forbidden,
            ErrorCode::InvalidStateTransition | ErrorCode::InterviewArchived => {
                InterviewError::AlreadyArchived
            }
            ErrorCode::ValidationFailed => InterviewError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => InterviewError::Infrastructure(err.message),
        }
    }
}
