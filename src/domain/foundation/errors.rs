//! Domain error vocabulary.
//!
//! Three layers: `ErrorCode` is the stable, wire-visible identifier the
//! HTTP adapter maps to statuses; `DomainError` pairs a code with a
//! human-readable message and optional key/value details; and
//! `ValidationError` covers value-object construction, converting into a
//! `DomainError` at the aggregate boundary.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Stable error identifiers, grouped by the HTTP status they map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Bad input
    ValidationFailed,
    EmptyField,
    OutOfRange,
    InvalidFormat,
    // Missing resources
    InterviewNotFound,
    SessionNotFound,
    SummaryNotFound,
    // Lifecycle violations
    InvalidStateTransition,
    InterviewArchived,
    Conflict,
    // Access control
    Unauthorized,
    Forbidden,
    // Completion service
    CompletionProviderError,
    GenerationFailed,
    SessionStartFailed,
    // Infrastructure
    DatabaseError,
    InternalError,
}

impl ErrorCode {
    /// The SCREAMING_SNAKE_CASE form used in API responses and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationFailed => "VALIDATION_FAILED",
            Self::EmptyField => "EMPTY_FIELD",
            Self::OutOfRange => "OUT_OF_RANGE",
            Self::InvalidFormat => "INVALID_FORMAT",
            Self::InterviewNotFound => "INTERVIEW_NOT_FOUND",
            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::SummaryNotFound => "SUMMARY_NOT_FOUND",
            Self::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            Self::InterviewArchived => "INTERVIEW_ARCHIVED",
            Self::Conflict => "CONFLICT",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::CompletionProviderError => "COMPLETION_PROVIDER_ERROR",
            Self::GenerationFailed => "GENERATION_FAILED",
            Self::SessionStartFailed => "SESSION_START_FAILED",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A coded domain error with a message and optional structured details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Shorthand for a `ValidationFailed` error attributed to one field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message).with_detail("field", field)
    }

    /// Attaches a key/value detail, consuming and returning the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

/// Errors raised while constructing value objects.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("`{field}` must not be empty")]
    EmptyField { field: String },

    #[error("`{field}` is out of range: expected {min}..={max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("`{field}` is malformed: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub fn empty_field(field: impl Into<String>) -> Self {
        Self::EmptyField {
            field: field.into(),
        }
    }

    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        Self::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    fn field(&self) -> &str {
        match self {
            Self::EmptyField { field }
            | Self::OutOfRange { field, .. }
            | Self::InvalidFormat { field, .. } => field,
        }
    }
}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let field = err.field().to_string();
        DomainError::validation(field, err.to_string())
    }
}
