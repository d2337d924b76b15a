//! Mock meeting provider for testing.
//!
//! Hands out deterministic tokens, records every request and can be told to
//! fail, so tests can exercise the "started but no meeting link" path.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::foundation::LessonId;
use crate::ports::{MeetingCredential, MeetingError, MeetingProvider};

/// A credential request seen by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCredential {
    pub room_name: String,
    pub identity: String,
}

/// Mock implementation of [`MeetingProvider`].
#[derive(Debug, Clone, Default)]
pub struct MockMeetingProvider {
    issued: Arc<Mutex<Vec<IssuedCredential>>>,
    force_error: Arc<Mutex<Option<MeetingError>>>,
}

impl MockMeetingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider that fails every request with `error`.
    pub fn failing(error: MeetingError) -> Self {
        let provider = Self::default();
        provider.set_error(Some(error));
        provider
    }

    /// Sets or clears the forced error at runtime.
    pub fn set_error(&self, error: Option<MeetingError>) {
        if let Ok(mut slot) = self.force_error.lock() {
            *slot = error;
        }
    }

    /// Every successful request, in order.
    pub fn issued(&self) -> Vec<IssuedCredential> {
        self.issued
            .lock()
            .map(|issued| issued.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl MeetingProvider for MockMeetingProvider {
    fn room_name_for(&self, lesson_id: LessonId) -> String {
        format!("lesson-{}", lesson_id)
    }

    async fn issue_credential(
        &self,
        room_name: &str,
        identity: &str,
    ) -> Result<MeetingCredential, MeetingError> {
        if let Some(error) = self.force_error.lock().ok().and_then(|e| e.clone()) {
            return Err(error);
        }

        if let Ok(mut issued) = self.issued.lock() {
            issued.push(IssuedCredential {
                room_name: room_name.to_string(),
                identity: identity.to_string(),
            });
        }

        Ok(MeetingCredential {
            room_name: room_name.to_string(),
            token: format!("mock-token:{}:{}", room_name, identity),
        })
    }
}
