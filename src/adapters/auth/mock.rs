//! Mock operator validator for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::foundation::OwnerId;
use crate::ports::{AuthError, AuthenticatedOperator, OperatorValidator};

/// Validator with a configurable token table.
#[derive(Default)]
pub struct MockOperatorValidator {
    tokens: Mutex<HashMap<String, OwnerId>>,
}

impl MockOperatorValidator {
    /// Creates an empty validator that rejects everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a token for an operator.
    pub fn with_token(self, token: impl Into<String>, operator_id: OwnerId) -> Self {
        self.tokens.lock().unwrap().insert(token.into(), operator_id);
        self
    }
}

#[async_trait]
impl OperatorValidator for MockOperatorValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedOperator, AuthError> {
        self.tokens
            .lock()
            .unwrap()
            .get(token)
            .cloned()
            .map(|id| AuthenticatedOperator { id })
            .ok_or(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn registered_token_validates() {
        let validator = MockOperatorValidator::new()
            .with_token("tok-1", OwnerId::new("op-1").unwrap());

        let operator = validator.validate("tok-1").await.unwrap();
        assert_eq!(operator.id.as_str(), "op-1");
    }

    #[tokio::test]
    async fn unregistered_token_is_invalid() {
        let validator = MockOperatorValidator::new();
        assert!(matches!(
            validator.validate("nope").await,
            Err(AuthError::InvalidToken)
        ));
    }
}
