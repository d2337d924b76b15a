//! Authentication types for the domain layer.
//!
//! Identity resolution happens upstream of every command handler: the
//! transport layer turns a bearer token into an [`AuthenticatedActor`] and
//! passes the actor id explicitly into each operation. Nothing in the core
//! reads identity from ambient request state.

use super::UserId;
use thiserror::Error;

/// Actor extracted from a validated access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The user the token was issued to.
    pub user_id: UserId,
}

impl AuthenticatedActor {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired (separate from InvalidToken for specific handling).
    #[error("Token expired")]
    TokenExpired,

    /// The identity service could not be reached or is misconfigured.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if the caller should obtain a new token.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::TokenExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authenticated_actor_wraps_user_id() {
        let actor = AuthenticatedActor::new(UserId::new(5));
        assert_eq!(actor.user_id.value(), 5);
    }

    #[test]
    fn token_errors_require_reauthentication() {
        assert!(AuthError::InvalidToken.requires_reauthentication());
        assert!(AuthError::TokenExpired.requires_reauthentication());
        assert!(!AuthError::service_unavailable("down").requires_reauthentication());
    }
}
