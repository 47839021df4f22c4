//! HTTP server settings: bind address, environment, logging, CORS.

use serde::Deserialize;
use std::net::SocketAddr;

use super::error::ValidationError;

/// Settings for the HTTP listener and request pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "defaults::host")]
    pub host: String,

    #[serde(default = "defaults::port")]
    pub port: u16,

    #[serde(default)]
    pub environment: Environment,

    /// Tracing filter directive, overridable via RUST_LOG.
    #[serde(default = "defaults::log_level")]
    pub log_level: String,

    #[serde(default = "defaults::request_timeout")]
    pub request_timeout_secs: u64,

    /// Comma-separated allowed origins; unset means allow any.
    pub cors_origins: Option<String>,
}

impl ServerConfig {
    /// The address the listener binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Allowed CORS origins, empty when none are configured.
    pub fn cors_origins_list(&self) -> Vec<String> {
        match &self.cors_origins {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(String::from)
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.host.is_empty() {
            return Err(ValidationError::MissingRequired("SERVER__HOST"));
        }
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        // A zero timeout would reject every request; anything past five
        // minutes outlives the client anyway.
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
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

/// Deployment environment, selects log format among other things.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

mod defaults {
    pub fn host() -> String {
        "0.0.0.0".to_string()
    }

    pub fn port() -> u16 {
        8080
    }

    pub fn log_level() -> String {
        "info,ratrace=debug,sqlx=warn".to_string()
    }

    pub fn request_timeout() -> u64 {
        30
    }
}
