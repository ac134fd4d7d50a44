//! Shared HTTP error response shape and status mapping.

use axum::http::StatusCode;
use serde::Serialize;

use crate::domain::foundation::ErrorCode;

/// Standard error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    /// Creates an error response from a domain error code.
    pub fn from_code(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            code: "UNAUTHORIZED".to_string(),
            message: message.into(),
        }
    }
}

/// Maps a domain error code to an HTTP status.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed
        | ErrorCode::EmptyField
        | ErrorCode::OutOfRange
        | ErrorCode::InvalidFormat
        | ErrorCode::InvalidStateTransition
        | ErrorCode::InterviewArchived => StatusCode::BAD_REQUEST,
        ErrorCode::InterviewNotFound
        | ErrorCode::SessionNotFound
        | ErrorCode::SummaryNotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::CompletionProviderError
        | ErrorCode::GenerationFailed
        | ErrorCode::SessionStartFailed => StatusCode::BAD_GATEWAY,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_codes_map_to_404() {
        assert_eq!(status_for(ErrorCode::InterviewNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorCode::SessionNotFound), StatusCode::NOT_FOUND);
    }

    #[test]
    fn conflict_maps_to_409() {
        assert_eq!(status_for(ErrorCode::Conflict), StatusCode::CONFLICT);
    }

    #[test]
    fn generation_failures_map_to_502() {
        assert_eq!(status_for(ErrorCode::GenerationFailed), StatusCode::BAD_GATEWAY);
        assert_eq!(status_for(ErrorCode::SessionStartFailed), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn validation_maps_to_400() {
        assert_eq!(status_for(ErrorCode::ValidationFailed), StatusCode::BAD_REQUEST);
    }
}
