//! Shareable token value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{InterviewId, ValidationError};

/// Globally unique, URL-safe token that respondents use to reach an
/// interview without authenticating.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShareToken(String);

impl ShareToken {
    /// Derives a token for a freshly created interview.
    ///
    /// Uses the first segment of the interview's UUID prefixed with `iv-`,
    /// which is short enough to paste into a link while remaining unique
    /// for practical purposes (the full id still disambiguates on lookup).
    pub fn for_interview(id: &InterviewId) -> Self {
        let uuid = id.as_uuid().to_string();
        let prefix = uuid.split('-').next().unwrap_or(&uuid);
        Self(format!("iv-{}", prefix))
    }

    /// Creates a token from an existing string (e.g., from persistence).
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the token is empty
    /// - `InvalidFormat` if the token contains characters unsafe in a URL path
    pub fn new(token: impl Into<String>) -> Result<Self, ValidationError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ValidationError::empty_field("share_token"));
        }
        if !token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ValidationError::invalid_format(
                "share_token",
                "only alphanumerics, '-' and '_' are allowed",
            ));
        }
        Ok(Self(token))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShareToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
