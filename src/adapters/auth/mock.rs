//! Mock identity resolver for testing.
//!
//! Maps fixed token strings to user ids so HTTP tests can authenticate
//! without signing real JWTs.
//!
//! # Example
//!
//! ```ignore
//! use tutorly::adapters::auth::MockIdentityResolver;
//! use tutorly::domain::foundation::UserId;
//!
//! let resolver = MockIdentityResolver::new().with_user("student-token", UserId::new(1));
//! let actor = resolver.resolve("student-token").await?;
//! ```

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedActor, UserId};
use crate::ports::IdentityResolver;

/// Mock identity resolver.
///
/// Tokens not in the map return `InvalidToken`.
#[derive(Debug, Clone, Default)]
pub struct MockIdentityResolver {
    tokens: HashMap<String, UserId>,
    /// Error to return for every token (for error testing)
    force_error: Option<AuthError>,
}

impl MockIdentityResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that resolves to `user_id`.
    pub fn with_user(mut self, token: impl Into<String>, user_id: UserId) -> Self {
        self.tokens.insert(token.into(), user_id);
        self
    }

    /// Forces every resolution to return the specified error.
    pub fn with_error(mut self, error: AuthError) -> Self {
        self.force_error = Some(error);
        self
    }
}

#[async_trait]
impl IdentityResolver for MockIdentityResolver {
    async fn resolve(&self, token: &str) -> Result<AuthenticatedActor, AuthError> {
        if let Some(error) = &self.force_error {
            return Err(error.clone());
        }

        self.tokens
            .get(token)
            .copied()
            .map(AuthenticatedActor::new)
            .ok_or(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn known_token_resolves() {
        let resolver = MockIdentityResolver::new().with_user("t1", UserId::new(3));
        let actor = resolver.resolve("t1").await.unwrap();
        assert_eq!(actor.user_id, UserId::new(3));
    }

    #[tokio::test]
    async fn unknown_token_is_invalid() {
        let resolver = MockIdentityResolver::new();
        assert_eq!(resolver.resolve("nope").await.unwrap_err(), AuthError::InvalidToken);
    }

    #[tokio::test]
    async fn forced_error_wins() {
        let resolver = MockIdentityResolver::new()
            .with_user("t1", UserId::new(3))
            .with_error(AuthError::TokenExpired);
        assert_eq!(resolver.resolve("t1").await.unwrap_err(), AuthError::TokenExpired);
    }
}
