//! Generation error types.

use thiserror::Error;

use crate::ports::CompletionError;

/// Errors produced by the question and summary generators.
///
/// Provider failures are transient by nature; the caller may retry the
/// outer operation. Empty or malformed completions are contract
/// violations by the provider and are not retried automatically.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The completion provider call itself failed.
    #[error("completion provider failed: {0}")]
    Provider(#[from] CompletionError),

    /// The provider returned no usable text.
    #[error("completion was empty")]
    EmptyCompletion,

    /// The provider's reply did not match the required shape.
    #[error("completion was malformed: {0}")]
    MalformedCompletion(String),
}

impl GenerationError {
    /// Returns true if retrying the outer operation could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            GenerationError::Provider(err) => err.is_retryable(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_retryability_is_propagated() {
        let err = GenerationError::Provider(CompletionError::rate_limited(10));
        assert!(err.is_retryable());

        let err = GenerationError::Provider(CompletionError::AuthenticationFailed);
        assert!(!err.is_retryable());
    }

    #[test]
    fn malformed_completion_is_not_retryable() {
        assert!(!GenerationError::EmptyCompletion.is_retryable());
        assert!(!GenerationError::MalformedCompletion("no json".to_string()).is_retryable());
    }
}
