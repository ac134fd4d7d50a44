//! Configuration error types

use thiserror::Error;

/// Errors while loading configuration from the environment
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

/// Errors from semantic validation of configuration values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("server port must be non-zero")]
    InvalidPort,

    #[error("timeout must be between 1 and 300 seconds")]
    InvalidTimeout,

    #[error("database URL must be a postgres:// or postgresql:// URL")]
    InvalidDatabaseUrl,

    #[error("database pool size must be between 1 and 100")]
    InvalidPoolSize,

    #[error("operator key must be at least 8 characters")]
    WeakOperatorKey,

    #[error("missing required configuration: {0}")]
    MissingRequired(&'static str),
}
