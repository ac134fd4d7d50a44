//! Session-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, InterviewId, SessionId};

/// Session-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Session was not found.
    NotFound(SessionId),
    /// The interview backing the session was not found or is archived.
    InterviewUnavailable(InterviewId),
    /// Operator is not authorized.
    Forbidden,
    /// Operation not valid for the session's current status.
    InvalidState(String),
    /// A concurrent mutation won the compare-and-swap.
    Conflict,
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Session creation failed before anything became visible.
    StartFailed(String),
    /// The completion service failed to produce a usable question.
    Generation(String),
    /// Infrastructure error.
    Infrastructure(String),
}

impl SessionError {
    pub fn not_found(id: SessionId) -> Self {
        SessionError::NotFound(id)
    }

    pub fn interview_unavailable(id: InterviewId) -> Self {
        SessionError::InterviewUnavailable(id)
    }

    pub fn forbidden() -> Self {
        SessionError::Forbidden
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        SessionError::InvalidState(message.into())
    }

    pub fn conflict() -> Self {
        SessionError::Conflict
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SessionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn start_failed(message: impl Into<String>) -> Self {
        SessionError::StartFailed(message.into())
    }

    pub fn generation(message: impl Into<String>) -> Self {
        SessionError::Generation(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        SessionError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::NotFound(_) => ErrorCode::SessionNotFound,
            SessionError::InterviewUnavailable(_) => ErrorCode::InterviewNotFound,
            SessionError::Forbidden => ErrorCode::Forbidden,
            SessionError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            SessionError::Conflict => ErrorCode::Conflict,
            SessionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SessionError::StartFailed(_) => ErrorCode::SessionStartFailed,
            SessionError::Generation(_) => ErrorCode::GenerationFailed,
            SessionError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            SessionError::NotFound(id) => format!("Session not found: {}", id),
            SessionError::InterviewUnavailable(id) => {
                format!("Interview not available: {}", id)
            }
            SessionError::Forbidden => "Permission denied".to_string(),
            SessionError::InvalidState(msg) => format!("Invalid state: {}", msg),
            SessionError::Conflict => {
                "Session was modified concurrently; reload and retry".to_string()
            }
            SessionError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            SessionError::StartFailed(msg) => format!("Could not start session: {}", msg),
            SessionError::Generation(msg) => format!("Question generation failed: {}", msg),
            SessionError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SessionError {}

impl From<DomainError> for SessionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => SessionError::Forbidden,
            ErrorCode::Conflict => SessionError::Conflict,
            ErrorCode::CompletionProviderError => SessionError::Generation(err.message),
            ErrorCode::InvalidStateTransition | ErrorCode::OutOfRange => {
                SessionError::InvalidState(err.message)
            }
            ErrorCode::ValidationFailed => SessionError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => SessionError::Infrastructure(err.message),
        }
    }
}
