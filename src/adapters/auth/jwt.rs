//! HS256 JWT adapter for identity resolution.
//!
//! Validates bearer tokens signed with a shared secret and maps the `sub`
//! claim, an integer user id, to an [`AuthenticatedActor`]. Validates:
//!
//! - **Signature**: HS256 with the configured secret
//! - **Issuer (iss)**: Must match the configured issuer
//! - **Audience (aud)**: Must contain the configured audience
//! - **Expiry (exp)**: Must be in the future

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, AuthenticatedActor, UserId};
use crate::ports::IdentityResolver;

/// Configuration for the JWT adapter.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared HS256 signing secret.
    pub secret: SecretString,

    /// Expected issuer claim.
    pub issuer: String,

    /// Expected audience claim.
    pub audience: String,
}

impl JwtConfig {
    pub fn new(secret: SecretString, issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            secret,
            issuer: issuer.into(),
            audience: audience.into(),
        }
    }
}

/// Claims carried by identity tokens.
#[derive(Debug, Serialize, Deserialize)]
struct IdentityClaims {
    /// Subject - the integer user id, as a string
    sub: String,
    iss: String,
    #[serde(default)]
    aud: Audience,
    exp: i64,
    #[serde(default)]
    iat: Option<i64>,
}

/// Audience can be a single string or array of strings in JWTs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
enum Audience {
    #[default]
    None,
    Single(String),
    Multiple(Vec<String>),
}

impl Audience {
    fn contains(&self, expected: &str) -> bool {
        match self {
            Audience::None => false,
            Audience::Single(s) => s == expected,
            Audience::Multiple(v) => v.iter().any(|s| s == expected),
        }
    }
}

/// JWT implementation of [`IdentityResolver`].
pub struct JwtIdentityResolver {
    config: JwtConfig,
    decoding_key: DecodingKey,
}

impl JwtIdentityResolver {
    pub fn new(config: JwtConfig) -> Self {
        let decoding_key = DecodingKey::from_secret(config.secret.expose_secret().as_bytes());
        Self {
            config,
            decoding_key,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_audience(&[&self.config.audience]);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation
    }
}

#[async_trait]
impl IdentityResolver for JwtIdentityResolver {
    async fn resolve(&self, token: &str) -> Result<AuthenticatedActor, AuthError> {
        let data = decode::<IdentityClaims>(token, &self.decoding_key, &self.validation())
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Token expired");
                        AuthError::TokenExpired
                    }
                    ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience => {
                        tracing::warn!(error = %e, "Token issued for another party");
                        AuthError::InvalidToken
                    }
                    _ => {
                        tracing::warn!(error = %e, "Token validation failed");
                        AuthError::InvalidToken
                    }
                }
            })?;
        let claims = data.claims;

        if !claims.aud.contains(&self.config.audience) {
            tracing::warn!(audience = ?claims.aud, "Audience mismatch after validation");
            return Err(AuthError::InvalidToken);
        }

        let user_id: UserId = claims.sub.parse().map_err(|_| {
            tracing::warn!(sub = %claims.sub, "Token subject is not a user id");
            AuthError::InvalidToken
        })?;

        Ok(AuthenticatedActor::new(user_id))
    }
}

impl std::fmt::Debug for JwtIdentityResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtIdentityResolver")
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "identity-test-secret";

    fn resolver() -> JwtIdentityResolver {
        JwtIdentityResolver::new(JwtConfig::new(
            SecretString::new(SECRET.to_string()),
            "tutorly",
            "tutorly-api",
        ))
    }

    fn token(sub: &str, iss: &str, aud: &str, exp_offset_secs: i64, secret: &str) -> String {
        let now = Timestamp::now();
        let claims = IdentityClaims {
            sub: sub.to_string(),
            iss: iss.to_string(),
            aud: Audience::Single(aud.to_string()),
            exp: now.plus_secs(exp_offset_secs).as_unix_secs(),
            iat: Some(now.as_unix_secs()),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn valid_token_resolves_to_user() {
        let actor = resolver()
            .resolve(&token("42", "tutorly", "tutorly-api", 600, SECRET))
            .await
            .unwrap();
        assert_eq!(actor.user_id, UserId::new(42));
    }

    #[tokio::test]
    async fn expired_token_is_reported_as_expired() {
        let err = resolver()
            .resolve(&token("42", "tutorly", "tutorly-api", -3600, SECRET))
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::TokenExpired);
    }

    #[tokio::test]
    async fn wrong_issuer_is_rejected() {
        let err = resolver()
            .resolve(&token("42", "someone-else", "tutorly-api", 600, SECRET))
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::InvalidToken);
    }

    #[tokio::test]
    async fn wrong_audience_is_rejected() {
        let err = resolver()
            .resolve(&token("42", "tutorly", "other-api", 600, SECRET))
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::InvalidToken);
    }

    #[tokio::test]
    async fn wrong_secret_is_rejected() {
        let err = resolver()
            .resolve(&token("42", "tutorly", "tutorly-api", 600, "not-the-secret"))
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::InvalidToken);
    }

    #[tokio::test]
    async fn non_numeric_subject_is_rejected() {
        let err = resolver()
            .resolve(&token("alice", "tutorly", "tutorly-api", 600, SECRET))
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::InvalidToken);
    }

    #[tokio::test]
    async fn garbage_is_rejected() {
        assert_eq!(
            resolver().resolve("not-a-jwt").await.unwrap_err(),
            AuthError::InvalidToken
        );
    }

    #[test]
    fn audience_multiple_contains() {
        let aud = Audience::Multiple(vec!["api-1".to_string(), "api-2".to_string()]);
        assert!(aud.contains("api-2"));
        assert!(!aud.contains("api-3"));
    }

    #[test]
    fn jwt_resolver_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<JwtIdentityResolver>();
    }
}
