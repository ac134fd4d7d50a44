//! Authentication middleware and extractors for axum.
//!
//! This module provides:
//! - `auth_middleware` - Layer that validates Bearer tokens and injects
//!   the operator into request extensions
//! - `RequireOperator` - Extractor that requires an authenticated operator
//!
//! The middleware uses the `OperatorValidator` port, keeping it
//! provider-agnostic: the static-key adapter, an IdP-backed one, or the
//! mock all plug in without touching this file.
//!
//! ```text
//! Request -> auth_middleware -> injects AuthenticatedOperator into extensions
//!                                      |
//!                              Handler -> RequireOperator reads extensions
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::ports::{AuthError, AuthenticatedOperator, OperatorValidator};

use super::super::error::ErrorResponse;

/// Auth middleware state - wraps the operator validator.
pub type AuthState = Arc<dyn OperatorValidator>;

/// Authentication middleware that validates Bearer tokens.
///
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Validates it through the `OperatorValidator` port
/// 3. On success, injects `AuthenticatedOperator` into request extensions
/// 4. On missing token, continues without injecting (public routes)
/// 5. On invalid token, returns 401 Unauthorized
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    match token {
        Some(token) => match validator.validate(token).await {
            Ok(operator) => {
                request.extensions_mut().insert(operator);
                next.run(request).await
            }
            Err(e) => {
                let (status, message) = match &e {
                    AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token"),
                    AuthError::ServiceUnavailable(msg) => {
                        tracing::error!("Auth service unavailable: {}", msg);
                        (
                            StatusCode::SERVICE_UNAVAILABLE,
                            "Authentication service unavailable",
                        )
                    }
                };

                (status, Json(ErrorResponse::unauthorized(message))).into_response()
            }
        },
        None => {
            // No token provided - continue without auth. Handlers use
            // RequireOperator to enforce authentication.
            next.run(request).await
        }
    }
}

/// Extractor that requires an authenticated operator.
///
/// # Example
///
/// ```ignore
/// async fn my_handler(RequireOperator(operator): RequireOperator) -> impl IntoResponse {
///     format!("Hello, {}!", operator.id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireOperator(pub AuthenticatedOperator);

#[async_trait]
impl<S> FromRequestParts<S> for RequireOperator
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedOperator>()
            .cloned()
            .map(RequireOperator)
            .ok_or(AuthRejection::Unauthenticated)
    }
}

/// Rejection for the `RequireOperator` extractor.
#[derive(Debug)]
pub enum AuthRejection {
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::unauthorized("Authentication required")),
        )
            .into_response()
    }
}
