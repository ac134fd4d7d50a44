//! Operator authentication port.
//!
//! The facade authenticates operators with a bearer token; this port is
//! the thin contract the HTTP middleware consumes. Provider mechanics
//! (key stores, OIDC, ...) live entirely in adapters.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::OwnerId;

/// An operator whose token validated successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedOperator {
    /// The operator's identity, used as interview owner id.
    pub id: OwnerId,
}

/// Token validation errors.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token did not validate.
    #[error("invalid token")]
    InvalidToken,
    /// The validator itself could not be reached.
    #[error("auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Port for validating operator bearer tokens.
#[async_trait]
pub trait OperatorValidator: Send + Sync {
    /// Validate a bearer token, returning the operator it identifies.
    async fn validate(&self, token: &str) -> Result<AuthenticatedOperator, AuthError>;
}
