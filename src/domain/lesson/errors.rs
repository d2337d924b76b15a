//! Lesson-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Kind | Variants | HTTP Status |
//! |------|----------|-------------|
//! | NotFound | ActorNotFound, LessonNotFound, TeacherNotFound, CategoryNotFound, ScheduleSlotNotFound | 404 |
//! | Forbidden | ActorNotTeacher, NotRelatedTeacher, NotRelatedUser | 403 |
//! | IllegalTransition | ActionNotAllowed, Transition(IllegalTransition) | 409 |
//! | Conflict | SlotUnavailable | 409 |
//! | Validation | UnknownAction, NotATransition, SelfBooking, CategoryInactive, SkillInactive, SlotNotOwned | 400 |
//! | Dependency | MeetingUnavailable | 502 |
//! | Infrastructure (or the store error's own kind) | Store | 500 |

use thiserror::Error;

use super::LessonAction;
use crate::domain::foundation::{
    CategoryId, DomainError, ErrorCode, ErrorKind, LessonId, ScheduleSlotId, TeacherId, UserId,
};
use crate::domain::fsm::{FsmError, StateName};

/// Errors returned by lesson lifecycle operations.
#[derive(Debug, Clone, Error)]
pub enum LessonError {
    #[error("User {0} not found")]
    ActorNotFound(UserId),

    #[error("Lesson {0} not found")]
    LessonNotFound(LessonId),

    #[error("Teacher {0} not found")]
    TeacherNotFound(TeacherId),

    #[error("Category {0} not found")]
    CategoryNotFound(CategoryId),

    #[error("Schedule slot {0} not found")]
    ScheduleSlotNotFound(ScheduleSlotId),

    #[error("User {0} is not a teacher")]
    ActorNotTeacher(UserId),

    #[error("User {actor} is not the teacher of lesson {lesson_id}")]
    NotRelatedTeacher { lesson_id: LessonId, actor: UserId },

    #[error("User {actor} is not related to lesson {lesson_id}")]
    NotRelatedUser { lesson_id: LessonId, actor: UserId },

    #[error("Unknown lesson action '{0}'")]
    UnknownAction(String),

    #[error("'{0}' does not change lesson state")]
    NotATransition(LessonAction),

    #[error("A teacher cannot book a lesson with themselves")]
    SelfBooking,

    #[error("Category {0} is not active")]
    CategoryInactive(CategoryId),

    #[error("Teacher {teacher_id} has no active skill in category {category_id}")]
    SkillInactive {
        teacher_id: TeacherId,
        category_id: CategoryId,
    },

    #[error("Schedule slot {slot_id} does not belong to teacher {teacher_id}")]
    SlotNotOwned {
        slot_id: ScheduleSlotId,
        teacher_id: TeacherId,
    },

    #[error("Schedule slot {0} is no longer available")]
    SlotUnavailable(ScheduleSlotId),

    #[error("Cannot {action} a lesson that is {current}")]
    ActionNotAllowed {
        action: LessonAction,
        current: StateName,
    },

    #[error(transparent)]
    Transition(#[from] FsmError),

    /// The meeting provider failed. `started` records whether the lesson was
    /// already moved to `ongoing` before the failure; if so, retry with Join.
    #[error("Meeting unavailable for lesson {lesson_id}: {reason}")]
    MeetingUnavailable {
        lesson_id: LessonId,
        started: bool,
        reason: String,
    },

    /// A port failed. Keeps the port's error code.
    #[error("{0}")]
    Store(DomainError),
}

impl LessonError {
    pub fn not_related_teacher(lesson_id: LessonId, actor: UserId) -> Self {
        LessonError::NotRelatedTeacher { lesson_id, actor }
    }

    pub fn not_related_user(lesson_id: LessonId, actor: UserId) -> Self {
        LessonError::NotRelatedUser { lesson_id, actor }
    }

    pub fn action_not_allowed(action: LessonAction, current: StateName) -> Self {
        LessonError::ActionNotAllowed { action, current }
    }

    pub fn meeting_unavailable(lesson_id: LessonId, started: bool, reason: impl Into<String>) -> Self {
        LessonError::MeetingUnavailable {
            lesson_id,
            started,
            reason: reason.into(),
        }
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            LessonError::ActorNotFound(_) => ErrorCode::UserNotFound,
            LessonError::LessonNotFound(_) => ErrorCode::LessonNotFound,
            LessonError::TeacherNotFound(_) => ErrorCode::TeacherNotFound,
            LessonError::CategoryNotFound(_) => ErrorCode::CategoryNotFound,
            LessonError::ScheduleSlotNotFound(_) => ErrorCode::ScheduleSlotNotFound,
            LessonError::ActorNotTeacher(_) => ErrorCode::ActorNotTeacher,
            LessonError::NotRelatedTeacher { .. } => ErrorCode::NotRelatedTeacher,
            LessonError::NotRelatedUser { .. } => ErrorCode::NotRelatedUser,
            LessonError::UnknownAction(_) | LessonError::NotATransition(_) => {
                ErrorCode::ValidationFailed
            }
            LessonError::SelfBooking => ErrorCode::SelfBooking,
            LessonError::CategoryInactive(_) => ErrorCode::CategoryInactive,
            LessonError::SkillInactive { .. } => ErrorCode::SkillInactive,
            LessonError::SlotNotOwned { .. } => ErrorCode::SlotNotOwned,
            LessonError::SlotUnavailable(_) => ErrorCode::SlotUnavailable,
            LessonError::ActionNotAllowed { .. } => ErrorCode::ActionNotAllowed,
            LessonError::Transition(err) => err.code(),
            LessonError::MeetingUnavailable { .. } => ErrorCode::MeetingProviderError,
            LessonError::Store(err) => err.code,
        }
    }

    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        self.code().kind()
    }

    /// User-facing message. Infrastructure failures are not described to
    /// callers; the full error is logged instead.
    pub fn message(&self) -> String {
        if self.kind() == ErrorKind::Infrastructure {
            return "Internal server error".to_string();
        }
        match self {
            LessonError::Store(err) => err.message.clone(),
            other => other.to_string(),
        }
    }

    /// Returns true if the same request may succeed if simply repeated.
    ///
    /// A Start whose credential failed already moved the lesson to
    /// `ongoing`, so repeating it cannot succeed; Join is the recovery.
    pub fn is_retryable(&self) -> bool {
        match self {
            LessonError::MeetingUnavailable { started, .. } => !started,
            other => matches!(
                other.kind(),
                ErrorKind::Dependency | ErrorKind::Infrastructure
            ),
        }
    }
}

impl From<DomainError> for LessonError {
    fn from(err: DomainError) -> Self {
        LessonError::Store(err)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_errors_are_forbidden() {
        let actor = UserId::new(3);
        let lesson = LessonId::new(1);
        assert_eq!(LessonError::ActorNotTeacher(actor).kind(), ErrorKind::Forbidden);
        assert_eq!(
            LessonError::not_related_teacher(lesson, actor).kind(),
            ErrorKind::Forbidden
        );
        assert_eq!(
            LessonError::not_related_user(lesson, actor).kind(),
            ErrorKind::Forbidden
        );
    }

    #[test]
    fn state_errors_are_illegal_transitions() {
        let precondition =
            LessonError::action_not_allowed(LessonAction::Join, StateName::Planned);
        assert_eq!(precondition.kind(), ErrorKind::IllegalTransition);
        assert_eq!(precondition.to_string(), "Cannot join a lesson that is planned");

        let edge: LessonError =
            FsmError::illegal_transition(StateName::Finished, StateName::Ongoing).into();
        assert_eq!(edge.kind(), ErrorKind::IllegalTransition);
    }

    #[test]
    fn join_is_not_a_transition() {
        let err = LessonError::NotATransition(LessonAction::Join);
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.message(), "'join' does not change lesson state");
    }

    #[test]
    fn slot_race_is_a_conflict_not_a_transition_error() {
        let err = LessonError::SlotUnavailable(ScheduleSlotId::new(8));
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn meeting_failure_before_any_state_change_is_retryable() {
        let err = LessonError::meeting_unavailable(LessonId::new(1), false, "timeout");
        assert_eq!(err.kind(), ErrorKind::Dependency);
        assert!(err.is_retryable());
    }

    #[test]
    fn meeting_failure_after_start_is_not_retryable() {
        let err = LessonError::meeting_unavailable(LessonId::new(1), true, "timeout");
        assert_eq!(err.kind(), ErrorKind::Dependency);
        assert!(!err.is_retryable());
    }

    #[test]
    fn store_failures_are_retryable() {
        let err: LessonError = DomainError::database("connection reset").into();
        assert!(err.is_retryable());
    }

    #[test]
    fn guard_failures_are_not_retryable() {
        assert!(!LessonError::SelfBooking.is_retryable());
        assert!(!LessonError::ActorNotTeacher(UserId::new(1)).is_retryable());
    }

    #[test]
    fn store_error_keeps_its_code() {
        let err: LessonError = DomainError::database("pool timed out").into();
        assert_eq!(err.code(), ErrorCode::DatabaseError);
        assert_eq!(err.kind(), ErrorKind::Infrastructure);

        let err: LessonError =
            DomainError::new(ErrorCode::SlotUnavailable, "slot taken").into();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.message(), "slot taken");
    }

    #[test]
    fn infrastructure_message_is_not_exposed() {
        let err: LessonError = DomainError::database("relation \"lessons\" does not exist").into();
        assert_eq!(err.message(), "Internal server error");
    }
}
