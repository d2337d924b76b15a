//! Identity resolution port.
//!
//! Turns a bearer token into an authenticated actor. HTTP middleware calls
//! this before any lesson operation; the resulting user id is then passed
//! explicitly into every command.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedActor};

/// Validates access tokens and extracts the actor.
///
/// # Contract
///
/// Implementations must:
/// - Validate the token signature
/// - Return `AuthError::TokenExpired` for expired tokens
/// - Return `AuthError::InvalidToken` for anything else that fails validation
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Validate a raw token (without the "Bearer " prefix).
    async fn resolve(&self, token: &str) -> Result<AuthenticatedActor, AuthError>;
}
