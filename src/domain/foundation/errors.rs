//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Coarse classification shared by every bounded context's error type.
///
/// Transport adapters map on this rather than on individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A referenced record does not exist.
    NotFound,
    /// The actor exists but may not perform the operation.
    Forbidden,
    /// The entity is not in a state from which the operation is allowed.
    IllegalTransition,
    /// A concurrent writer got there first.
    Conflict,
    /// The request itself is malformed or violates a business rule.
    Validation,
    /// An external collaborator failed.
    Dependency,
    /// Persistence or other internal failure.
    Infrastructure,
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    SelfBooking,
    CategoryInactive,
    SkillInactive,
    SlotNotOwned,

    // Not found errors
    UserNotFound,
    TeacherNotFound,
    CategoryNotFound,
    ScheduleSlotNotFound,
    LessonNotFound,
    StateMachineNotFound,
    StateMachineItemNotFound,
    StateNotFound,

    // State errors
    InvalidStateTransition,
    ActionNotAllowed,
    SlotUnavailable,

    // Authorization errors
    Unauthorized,
    ActorNotTeacher,
    NotRelatedTeacher,
    NotRelatedUser,

    // External errors
    MeetingProviderError,

    // Infrastructure errors
    DatabaseError,
    InternalError,
}

impl ErrorCode {
    /// Returns the classification for this code.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorCode::ValidationFailed
            | ErrorCode::SelfBooking
            | ErrorCode::CategoryInactive
            | ErrorCode::SkillInactive
            | ErrorCode::SlotNotOwned => ErrorKind::Validation,
            ErrorCode::UserNotFound
            | ErrorCode::TeacherNotFound
            | ErrorCode::CategoryNotFound
            | ErrorCode::ScheduleSlotNotFound
            | ErrorCode::LessonNotFound
            | ErrorCode::StateMachineNotFound
            | ErrorCode::StateMachineItemNotFound
            | ErrorCode::StateNotFound => ErrorKind::NotFound,
            ErrorCode::InvalidStateTransition | ErrorCode::ActionNotAllowed => {
                ErrorKind::IllegalTransition
            }
            ErrorCode::SlotUnavailable => ErrorKind::Conflict,
            ErrorCode::Unauthorized
            | ErrorCode::ActorNotTeacher
            | ErrorCode::NotRelatedTeacher
            | ErrorCode::NotRelatedUser => ErrorKind::Forbidden,
            ErrorCode::MeetingProviderError => ErrorKind::Dependency,
            ErrorCode::DatabaseError | ErrorCode::InternalError => ErrorKind::Infrastructure,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::SelfBooking => "SELF_BOOKING",
            ErrorCode::CategoryInactive => "CATEGORY_INACTIVE",
            ErrorCode::SkillInactive => "SKILL_INACTIVE",
            ErrorCode::SlotNotOwned => "SLOT_NOT_OWNED",
            ErrorCode::UserNotFound => "USER_NOT_FOUND",
            ErrorCode::TeacherNotFound => "TEACHER_NOT_FOUND",
            ErrorCode::CategoryNotFound => "CATEGORY_NOT_FOUND",
            ErrorCode::ScheduleSlotNotFound => "SCHEDULE_SLOT_NOT_FOUND",
            ErrorCode::LessonNotFound => "LESSON_NOT_FOUND",
            ErrorCode::StateMachineNotFound => "STATE_MACHINE_NOT_FOUND",
            ErrorCode::StateMachineItemNotFound => "STATE_MACHINE_ITEM_NOT_FOUND",
            ErrorCode::StateNotFound => "STATE_NOT_FOUND",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::ActionNotAllowed => "ACTION_NOT_ALLOWED",
            ErrorCode::SlotUnavailable => "SLOT_UNAVAILABLE",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::ActorNotTeacher => "ACTOR_NOT_TEACHER",
            ErrorCode::NotRelatedTeacher => "NOT_RELATED_TEACHER",
            ErrorCode::NotRelatedUser => "NOT_RELATED_USER",
            ErrorCode::MeetingProviderError => "MEETING_PROVIDER_ERROR",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
///
/// Ports return this type; bounded contexts convert it into their own
/// error enums at the application boundary.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a database error, the most common failure raised by adapters.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message).with_detail("field", field.into())
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        self.code.kind()
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field } | ValidationError::InvalidFormat { field, .. } => {
                field.clone()
            }
        };
        DomainError::validation(field, err.to_string())
    }
}
