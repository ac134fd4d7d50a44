//! Static-key operator validator.
//!
//! Validates bearer tokens against the single operator key from
//! configuration. Deployments with a real identity provider swap this
//! adapter for one backed by their IdP.

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};

use crate::domain::foundation::OwnerId;
use crate::ports::{AuthError, AuthenticatedOperator, OperatorValidator};

/// Validator that accepts exactly one configured key.
pub struct StaticKeyValidator {
    key: Secret<String>,
    operator_id: OwnerId,
}

impl StaticKeyValidator {
    /// Creates a validator for the given key and operator identity.
    pub fn new(key: impl Into<String>, operator_id: OwnerId) -> Self {
        Self {
            key: Secret::new(key.into()),
            operator_id,
        }
    }
}

#[async_trait]
impl OperatorValidator for StaticKeyValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedOperator, AuthError> {
        if token == self.key.expose_secret() {
            Ok(AuthenticatedOperator {
                id: self.operator_id.clone(),
            })
        } else {
            Err(AuthError::InvalidToken)
        }
    }
}
