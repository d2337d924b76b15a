//! Meeting provider configuration (LiveKit)

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::meeting::LiveKitConfig;

/// Meeting provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MeetingConfig {
    /// LiveKit API key
    pub api_key: String,

    /// LiveKit API secret
    pub api_secret: SecretString,

    /// Prefix for per-lesson room names
    #[serde(default = "default_room_prefix")]
    pub room_prefix: String,

    /// Lifetime of issued meeting tokens in seconds
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,
}

impl MeetingConfig {
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs)
    }

    /// Adapter configuration for the LiveKit provider.
    pub fn livekit_config(&self) -> LiveKitConfig {
        LiveKitConfig::new(&self.api_key, self.api_secret.clone())
            .with_room_prefix(&self.room_prefix)
            .with_token_ttl(self.token_ttl())
    }

    /// Validate meeting configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key.is_empty() {
            return Err(ValidationError::MissingRequired("MEETING__API_KEY"));
        }
        if self.api_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("MEETING__API_SECRET"));
        }
        if self.room_prefix.is_empty()
            || !self
                .room_prefix
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ValidationError::InvalidRoomPrefix);
        }
        if !(60..=86_400).contains(&self.token_ttl_secs) {
            return Err(ValidationError::InvalidTokenTtl);
        }
        Ok(())
    }
}

impl Default for MeetingConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_secret: SecretString::new(String::new()),
            room_prefix: default_room_prefix(),
            token_ttl_secs: default_token_ttl(),
        }
    }
}

fn default_room_prefix() -> String {
    "lesson".to_string()
}

fn default_token_ttl() -> u64 {
    3600
}
