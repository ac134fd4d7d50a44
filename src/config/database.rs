//! PostgreSQL configuration.

use serde::Deserialize;

use super::error::ValidationError;

const MAX_POOL_SIZE: u32 = 100;

/// Connection URL and pool sizing.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `postgres://` or `postgresql://` connection URL.
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let is_postgres =
            self.url.starts_with("postgres://") || self.url.starts_with("postgresql://");
        if !is_postgres {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        if !(1..=MAX_POOL_SIZE).contains(&self.max_connections) {
            return Err(ValidationError::InvalidPoolSize);
        }
        Ok(())
    }
}

fn default_max_connections() -> u32 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> DatabaseConfig {
        DatabaseConfig {
            url: url.to_string(),
            max_connections: default_max_connections(),
        }
    }

    #[test]
    fn both_postgres_schemes_pass() {
        assert!(config("postgresql://user@localhost/db").validate().is_ok());
        assert!(config("postgres://user@localhost/db").validate().is_ok());
    }

    #[test]
    fn other_schemes_are_rejected() {
        assert_eq!(
            config("mysql://user@localhost/db").validate(),
            Err(ValidationError::InvalidDatabaseUrl)
        );
    }

    #[test]
    fn pool_size_is_bounded() {
        let mut cfg = config("postgresql://user@localhost/db");
        cfg.max_connections = 0;
        assert!(cfg.validate().is_err());
        cfg.max_connections = MAX_POOL_SIZE + 1;
        assert!(cfg.validate().is_err());
        cfg.max_connections = MAX_POOL_SIZE;
        assert!(cfg.validate().is_ok());
    }
}
