//! Meeting provider port.
//!
//! Issues credentials for a video room. Called after a lesson has been
//! started (Start) or confirmed ongoing (Join); its failures surface as a
//! dependency error distinct from any transition failure.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::domain::foundation::LessonId;

/// Access to one meeting room for one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeetingCredential {
    pub room_name: String,
    pub token: String,
}

/// Meeting provider errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeetingError {
    /// The provider could not be reached or timed out.
    #[error("Meeting provider unavailable: {0}")]
    Unavailable(String),

    /// The provider refused to issue a credential.
    #[error("Meeting provider rejected the request: {0}")]
    Rejected(String),
}

/// Port for the external video meeting service.
#[async_trait]
pub trait MeetingProvider: Send + Sync {
    /// Room name used for a lesson. Deterministic so every participant of
    /// a lesson lands in the same room.
    fn room_name_for(&self, lesson_id: LessonId) -> String;

    /// Issue a credential for `identity` to join `room_name`.
    async fn issue_credential(
        &self,
        room_name: &str,
        identity: &str,
    ) -> Result<MeetingCredential, MeetingError>;
}
