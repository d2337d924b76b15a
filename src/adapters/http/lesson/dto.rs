//! HTTP DTOs for lesson endpoints.
//!
//! These types decouple the HTTP API from domain types.

use serde::{Deserialize, Serialize};

use crate::application::handlers::{
    BookLessonResult, JoinLessonResult, LessonView, TransitionLessonResult,
};
use crate::domain::foundation::{
    CategoryId, LessonId, ScheduleSlotId, TeacherId, Timestamp, UserId,
};
use crate::domain::fsm::StateName;
use crate::domain::lesson::{Lesson, LessonAction, LessonError};
use crate::ports::MeetingCredential;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to book a lesson. The student is the authenticated actor.
#[derive(Debug, Clone, Deserialize)]
pub struct BookLessonRequest {
    pub teacher_id: TeacherId,
    pub category_id: CategoryId,
    pub schedule_slot_id: ScheduleSlotId,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// A lesson and its current state.
#[derive(Debug, Clone, Serialize)]
pub struct LessonResponse {
    pub id: LessonId,
    pub student_id: UserId,
    pub teacher_id: TeacherId,
    pub category_id: CategoryId,
    pub schedule_slot_id: ScheduleSlotId,
    pub state: StateName,
    pub created_at: Timestamp,
}

impl LessonResponse {
    fn new(lesson: Lesson, state: StateName) -> Self {
        Self {
            id: lesson.id,
            student_id: lesson.student_id,
            teacher_id: lesson.teacher_id,
            category_id: lesson.category_id,
            schedule_slot_id: lesson.schedule_slot_id,
            state,
            created_at: lesson.created_at,
        }
    }
}

impl From<BookLessonResult> for LessonResponse {
    fn from(result: BookLessonResult) -> Self {
        Self::new(result.lesson, result.state)
    }
}

/// Lesson detail including what the caller may do next.
#[derive(Debug, Clone, Serialize)]
pub struct LessonDetailResponse {
    #[serde(flatten)]
    pub lesson: LessonResponse,
    pub available_actions: Vec<LessonAction>,
}

impl From<LessonView> for LessonDetailResponse {
    fn from(view: LessonView) -> Self {
        Self {
            lesson: LessonResponse::new(view.lesson, view.state),
            available_actions: view.available_actions,
        }
    }
}

/// Room credential handed to a lesson participant.
#[derive(Debug, Clone, Serialize)]
pub struct MeetingResponse {
    pub room_name: String,
    pub token: String,
}

impl From<MeetingCredential> for MeetingResponse {
    fn from(credential: MeetingCredential) -> Self {
        Self {
            room_name: credential.room_name,
            token: credential.token,
        }
    }
}

/// Response for a state-changing lesson action.
#[derive(Debug, Clone, Serialize)]
pub struct TransitionResponse {
    pub lesson_id: LessonId,
    pub action: LessonAction,
    pub state: StateName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting: Option<MeetingResponse>,
}

impl From<TransitionLessonResult> for TransitionResponse {
    fn from(result: TransitionLessonResult) -> Self {
        Self {
            lesson_id: result.lesson_id,
            action: result.action,
            state: result.state,
            meeting: result.meeting.map(MeetingResponse::from),
        }
    }
}

/// Response for joining an ongoing lesson.
#[derive(Debug, Clone, Serialize)]
pub struct JoinResponse {
    pub lesson_id: LessonId,
    pub meeting: MeetingResponse,
}

impl From<JoinLessonResult> for JoinResponse {
    fn from(result: JoinLessonResult) -> Self {
        Self {
            lesson_id: result.lesson_id,
            meeting: result.meeting.into(),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }
}

impl From<&LessonError> for ErrorResponse {
    fn from(error: &LessonError) -> Self {
        let details = match error {
            LessonError::MeetingUnavailable { started, .. } => {
                Some(serde_json::json!({ "started": started }))
            }
            _ => None,
        };
        Self {
            code: error.code().to_string(),
            message: error.message(),
            details,
        }
    }
}
