//! Authentication configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// Authentication configuration (JWT bearer tokens)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HMAC signing secret for session tokens
    pub jwt_secret: Secret<String>,

    /// Expected token issuer
    #[serde(default = "default_issuer")]
    pub jwt_issuer: String,

    /// Expected token audience
    #[serde(default = "default_audience")]
    pub jwt_audience: String,
}

impl AuthConfig {
    /// Validate authentication configuration
    ///
    /// A short HMAC secret makes tokens forgeable offline, so a minimum
    /// length is enforced in every environment.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.jwt_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if self.jwt_secret.expose_secret().len() < 32 {
            return Err(ValidationError::JwtSecretTooShort);
        }
        if self.jwt_issuer.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_ISSUER"));
        }
        if self.jwt_audience.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_AUDIENCE"));
        }
        Ok(())
    }
}

fn default_issuer() -> String {
    "ratrace".to_string()
}

fn default_audience() -> String {
    "ratrace-api".to_string()
}
