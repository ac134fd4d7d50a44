//! HTTP server configuration.

use serde::Deserialize;
use std::net::SocketAddr;

use super::error::ValidationError;

/// Deployment environment the service believes it is running in.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

/// Bind address, environment, logging, and request-timeout settings.
///
/// Every field has a default so a bare environment boots a development
/// server; production deployments override through `PARLEY__SERVER__*`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "defaults::host")]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "defaults::port")]
    pub port: u16,

    #[serde(default)]
    pub environment: Environment,

    /// Fallback tracing filter when RUST_LOG is unset.
    #[serde(default = "defaults::log_level")]
    pub log_level: String,

    /// Whole-request timeout in seconds.
    ///
    /// Sessions block on the completion provider, so this must cover its
    /// worst-case latency (tens of seconds).
    #[serde(default = "defaults::request_timeout")]
    pub request_timeout_secs: u64,

    /// Comma-separated CORS origins; unset means allow any origin.
    pub cors_origins: Option<String>,
}

impl ServerConfig {
    /// The address to bind, combining host and port.
    pub fn socket_addr(&self) -> SocketAddr {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .unwrap_or_else(|_| panic!("invalid bind address: {addr}"))
    }

    pub fn is_production(&self) -> bool {
        matches!(self.environment, Environment::Production)
    }

    /// Splits `cors_origins` into trimmed entries; empty when unset.
    pub fn cors_origins_list(&self) -> Vec<String> {
        let Some(raw) = self.cors_origins.as_deref() else {
            return Vec::new();
        };
        raw.split(',').map(|origin| origin.trim().to_string()).collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !(1..=300).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: defaults::host(),
            port: defaults::port(),
            environment: Environment::default(),
            log_level: defaults::log_level(),
            request_timeout_secs: defaults::request_timeout(),
            cors_origins: None,
        }
    }
}

mod defaults {
    pub(super) fn host() -> String {
        "0.0.0.0".to_string()
    }

    pub(super) fn port() -> u16 {
        8080
    }

    pub(super) fn log_level() -> String {
        "info,parley=debug,sqlx=warn".to_string()
    }

    pub(super) fn request_timeout() -> u64 {
        90
    }
}
