//! Loading and credential helpers shared by the lesson handlers.

use tracing::warn;

use crate::domain::foundation::{LessonId, UserId};
use crate::domain::lesson::{ActorContext, Lesson, LessonError};
use crate::ports::{DirectoryReader, LessonRepository, MeetingCredential, MeetingProvider};

/// A lesson together with everything guards need to know about the actor.
#[derive(Debug, Clone)]
pub(crate) struct LessonAccess {
    pub lesson: Lesson,
    pub actor: ActorContext,
}

/// Resolves the actor and the lesson, in that order.
///
/// # Errors
///
/// - `ActorNotFound` if the actor does not exist
/// - `LessonNotFound` if the lesson does not exist
pub(crate) async fn load_access(
    directory: &dyn DirectoryReader,
    lessons: &dyn LessonRepository,
    actor_id: UserId,
    lesson_id: LessonId,
) -> Result<LessonAccess, LessonError> {
    directory
        .find_user(actor_id)
        .await?
        .ok_or(LessonError::ActorNotFound(actor_id))?;

    let lesson = lessons
        .find_by_id(lesson_id)
        .await?
        .ok_or(LessonError::LessonNotFound(lesson_id))?;

    let teacher = directory.find_teacher_by_user(actor_id).await?;

    Ok(LessonAccess {
        lesson,
        actor: ActorContext::new(actor_id, teacher),
    })
}

/// Requests a meeting credential for the actor in the lesson's room.
///
/// `started` records whether the lesson was moved to ongoing by this same
/// request, so the caller can tell a failed start from a failed join.
pub(crate) async fn issue_meeting_credential(
    meetings: &dyn MeetingProvider,
    lesson_id: LessonId,
    actor_id: UserId,
    started: bool,
) -> Result<MeetingCredential, LessonError> {
    let room = meetings.room_name_for(lesson_id);
    meetings
        .issue_credential(&room, &actor_id.to_string())
        .await
        .map_err(|e| {
            warn!(
                lesson_id = %lesson_id,
                room = %room,
                started,
                error = %e,
                "Meeting credential request failed"
            );
            LessonError::meeting_unavailable(lesson_id, started, e.to_string())
        })
}
