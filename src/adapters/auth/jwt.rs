//! JWT adapter for session token validation.
//!
//! Implements the `SessionValidator` port for HS256-signed session
//! tokens. Validation checks the signature, issuer, audience, and
//! expiry before mapping claims to the domain `AuthenticatedUser`.

use async_trait::async_trait;
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use crate::config::AuthConfig;
use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Claims carried by a session token.
#[derive(Debug, Deserialize)]
struct SessionClaims {
    /// Subject - the user ID
    sub: String,

    /// User's email address
    #[serde(default)]
    email: Option<String>,

    /// User's display name
    #[serde(default)]
    name: Option<String>,
}

/// HS256 session token validator.
pub struct JwtSessionValidator {
    secret: Secret<String>,
    validation: Validation,
}

impl JwtSessionValidator {
    /// Creates a validator from the auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.jwt_issuer]);
        validation.set_audience(&[&config.jwt_audience]);
        validation.validate_exp = true;

        Self {
            secret: config.jwt_secret.clone(),
            validation,
        }
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let key = DecodingKey::from_secret(self.secret.expose_secret().as_bytes());

        let data = decode::<SessionClaims>(token, &key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            }
        })?;

        let claims = data.claims;
        let user_id = UserId::new(claims.sub).map_err(|_| AuthError::InvalidToken)?;
        let email = claims.email.unwrap_or_default();

        Ok(AuthenticatedUser::new(user_id, email, claims.name))
    }
}
