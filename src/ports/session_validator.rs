//! Session validator port - token validation.
//!
//! Keeps the HTTP middleware provider-agnostic: whether tokens come from
//! a hosted identity provider, a local JWT issuer, or a mock in tests,
//! the middleware doesn't change.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates a bearer token and resolves the authenticated user.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a token, returning the authenticated user on success.
    ///
    /// # Errors
    ///
    /// - `InvalidToken` / `TokenExpired` for bad credentials
    /// - `ServiceUnavailable` for transient infrastructure failures
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
