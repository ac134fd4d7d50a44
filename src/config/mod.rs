//! Typed configuration, loaded from the environment.
//!
//! Variables carry the `PARLEY` prefix with `__` separating nesting
//! levels (`PARLEY__SERVER__PORT=8080` becomes `server.port`). A `.env`
//! file is honored in development. Loading only parses; `validate()`
//! applies the semantic rules and runs once at startup so a bad
//! deployment fails before binding the listener.
//!
//! # Example
//!
//! ```no_run
//! use parley::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod ai;
mod auth;
mod database;
mod error;
mod server;

pub use ai::AiConfig;
pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Everything the service reads from the environment, by section.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL connection settings (required).
    pub database: DatabaseConfig,

    /// Operator key and identity (required).
    pub auth: AuthConfig,

    #[serde(default)]
    pub ai: AiConfig,
}

impl AppConfig {
    /// Reads `.env` (if present), then the `PARLEY__*` environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a required variable is absent or a
    /// value fails to parse into its field type.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let raw = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PARLEY")
                    .separator("__"),
            )
            .build()?;

        Ok(raw.try_deserialize()?)
    }

    /// Applies every section's semantic checks.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;
        self.ai.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
