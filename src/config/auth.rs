//! Operator authentication configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Operator authentication configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Bearer key operators present on admin endpoints
    pub operator_key: String,

    /// Identity recorded as interview owner for the configured key
    #[serde(default = "default_operator_id")]
    pub operator_id: String,
}

impl AuthConfig {
    /// Validate auth configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.operator_key.is_empty() {
            return Err(ValidationError::MissingRequired("OPERATOR_KEY"));
        }
        if self.operator_key.len() < 8 {
            return Err(ValidationError::WeakOperatorKey);
        }
        if self.operator_id.is_empty() {
            return Err(ValidationError::MissingRequired("OPERATOR_ID"));
        }
        Ok(())
    }
}

fn default_operator_id() -> String {
    "operator".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config_passes() {
        let config = AuthConfig {
            operator_key: "long-enough-key".to_string(),
            operator_id: "operator-1".to_string(),
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_key_fails() {
        let config = AuthConfig {
            operator_key: String::new(),
            operator_id: "operator-1".to_string(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_short_key_fails() {
        let config = AuthConfig {
            operator_key: "short".to_string(),
            operator_id: "operator-1".to_string(),
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::WeakOperatorKey)
        ));
    }
}
