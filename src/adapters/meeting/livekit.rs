//! LiveKit meeting adapter.
//!
//! Issues LiveKit access tokens locally: an HS256 JWT signed with the API
//! secret, carrying a video grant that allows joining exactly one room.
//! The LiveKit server validates the token when the client connects, so no
//! network call happens here.
//!
//! # Example
//!
//! ```ignore
//! use tutorly::adapters::meeting::{LiveKitConfig, LiveKitMeetingProvider};
//!
//! let provider = LiveKitMeetingProvider::new(LiveKitConfig::new("api-key", secret));
//! let room = provider.room_name_for(lesson_id);
//! let credential = provider.issue_credential(&room, "42").await?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{LessonId, Timestamp};
use crate::ports::{MeetingCredential, MeetingError, MeetingProvider};

/// Configuration for the LiveKit adapter.
#[derive(Debug, Clone)]
pub struct LiveKitConfig {
    /// API key; becomes the token issuer.
    pub api_key: String,

    /// API secret used to sign tokens.
    pub api_secret: SecretString,

    /// Prefix for room names (rooms are `{prefix}-{lesson_id}`).
    pub room_prefix: String,

    /// How long an issued token stays valid.
    pub token_ttl: Duration,
}

impl LiveKitConfig {
    /// Create a configuration with the default room prefix and a one hour TTL.
    pub fn new(api_key: impl Into<String>, api_secret: SecretString) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret,
            room_prefix: "lesson".to_string(),
            token_ttl: Duration::from_secs(3600),
        }
    }

    pub fn with_room_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.room_prefix = prefix.into();
        self
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }
}

/// Access token claims understood by LiveKit.
#[derive(Debug, Serialize, Deserialize)]
struct AccessTokenClaims {
    iss: String,
    sub: String,
    nbf: i64,
    exp: i64,
    video: VideoGrant,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoGrant {
    room: String,
    room_join: bool,
    can_publish: bool,
    can_subscribe: bool,
}

/// LiveKit implementation of [`MeetingProvider`].
pub struct LiveKitMeetingProvider {
    config: LiveKitConfig,
}

impl LiveKitMeetingProvider {
    pub fn new(config: LiveKitConfig) -> Self {
        Self { config }
    }

    fn claims(&self, room_name: &str, identity: &str, now: Timestamp) -> AccessTokenClaims {
        let ttl = self.config.token_ttl.as_secs() as i64;
        AccessTokenClaims {
            iss: self.config.api_key.clone(),
            sub: identity.to_string(),
            nbf: now.as_unix_secs(),
            exp: now.plus_secs(ttl).as_unix_secs(),
            video: VideoGrant {
                room: room_name.to_string(),
                room_join: true,
                can_publish: true,
                can_subscribe: true,
            },
        }
    }
}

#[async_trait]
impl MeetingProvider for LiveKitMeetingProvider {
    fn room_name_for(&self, lesson_id: LessonId) -> String {
        format!("{}-{}", self.config.room_prefix, lesson_id)
    }

    async fn issue_credential(
        &self,
        room_name: &str,
        identity: &str,
    ) -> Result<MeetingCredential, MeetingError> {
        if identity.is_empty() {
            return Err(MeetingError::Rejected("identity must not be empty".to_string()));
        }

        let claims = self.claims(room_name, identity, Timestamp::now());
        let key = EncodingKey::from_secret(self.config.api_secret.expose_secret().as_bytes());

        let token = encode(&Header::new(Algorithm::HS256), &claims, &key).map_err(|e| {
            tracing::error!(room = %room_name, error = %e, "Failed to sign meeting token");
            MeetingError::Rejected(format!("failed to sign token: {}", e))
        })?;

        tracing::debug!(room = %room_name, identity = %identity, "Issued meeting credential");

        Ok(MeetingCredential {
            room_name: room_name.to_string(),
            token,
        })
    }
}

impl std::fmt::Debug for LiveKitMeetingProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveKitMeetingProvider")
            .field("api_key", &self.config.api_key)
            .field("room_prefix", &self.config.room_prefix)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, DecodingKey, Validation};

    const SECRET: &str = "livekit-test-secret";

    fn provider() -> LiveKitMeetingProvider {
        LiveKitMeetingProvider::new(
            LiveKitConfig::new("lk-key", SecretString::new(SECRET.to_string()))
                .with_room_prefix("tutorly"),
        )
    }

    #[test]
    fn room_name_is_derived_from_lesson_id() {
        assert_eq!(provider().room_name_for(LessonId::new(42)), "tutorly-42");
    }

    #[tokio::test]
    async fn token_grants_join_to_the_requested_room_only() {
        let credential = provider().issue_credential("tutorly-42", "7").await.unwrap();
        assert_eq!(credential.room_name, "tutorly-42");

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);
        let data = decode::<AccessTokenClaims>(
            &credential.token,
            &DecodingKey::from_secret(SECRET.as_bytes()),
            &validation,
        )
        .unwrap();

        assert_eq!(data.claims.iss, "lk-key");
        assert_eq!(data.claims.sub, "7");
        assert_eq!(data.claims.video.room, "tutorly-42");
        assert!(data.claims.video.room_join);
        assert!(data.claims.exp > data.claims.nbf);
    }

    #[test]
    fn grant_serializes_with_livekit_field_names() {
        let claims = provider().claims("r", "1", Timestamp::from_unix_secs(100));
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["video"]["roomJoin"], true);
        assert_eq!(json["video"]["canPublish"], true);
        assert_eq!(json["exp"], 3700);
    }

    #[tokio::test]
    async fn empty_identity_is_rejected() {
        let err = provider().issue_credential("room", "").await.unwrap_err();
        assert!(matches!(err, MeetingError::Rejected(_)));
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let debug = format!("{:?}", provider());
        assert!(!debug.contains(SECRET));
    }
}
