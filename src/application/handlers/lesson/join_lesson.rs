//! JoinLessonHandler - Command handler for joining an ongoing lesson.

use std::sync::Arc;

use tracing::info;

use super::access::{issue_meeting_credential, load_access, LessonAccess};
use crate::application::fsm::FsmEngine;
use crate::domain::foundation::{LessonId, UserId};
use crate::domain::lesson::{LessonAction, LessonError};
use crate::ports::{DirectoryReader, LessonRepository, MeetingCredential, MeetingProvider};

/// Command to join a lesson's meeting room.
#[derive(Debug, Clone)]
pub struct JoinLessonCommand {
    pub actor_id: UserId,
    pub lesson_id: LessonId,
}

/// Result of a successful join.
#[derive(Debug, Clone)]
pub struct JoinLessonResult {
    pub lesson_id: LessonId,
    pub meeting: MeetingCredential,
}

/// Handler for joining lessons.
///
/// Either party may join, and only while the lesson is ongoing. Joining
/// never changes state, so it is always safe to retry; it is also the
/// recovery path when a start committed but its credential request failed.
pub struct JoinLessonHandler {
    directory: Arc<dyn DirectoryReader>,
    lessons: Arc<dyn LessonRepository>,
    engine: FsmEngine,
    meetings: Arc<dyn MeetingProvider>,
}

impl JoinLessonHandler {
    pub fn new(
        directory: Arc<dyn DirectoryReader>,
        lessons: Arc<dyn LessonRepository>,
        engine: FsmEngine,
        meetings: Arc<dyn MeetingProvider>,
    ) -> Self {
        Self {
            directory,
            lessons,
            engine,
            meetings,
        }
    }

    pub async fn handle(&self, cmd: JoinLessonCommand) -> Result<JoinLessonResult, LessonError> {
        let action = LessonAction::Join;

        let LessonAccess { lesson, actor } = load_access(
            self.directory.as_ref(),
            self.lessons.as_ref(),
            cmd.actor_id,
            cmd.lesson_id,
        )
        .await?;

        action.guard().check(&lesson, &actor)?;

        let current = self.engine.get_current_state(lesson.state_item_id).await?;
        action.check_state_policy(&lesson, &actor, current.name)?;

        let meeting =
            issue_meeting_credential(self.meetings.as_ref(), lesson.id, actor.user_id, false)
                .await?;

        info!(lesson_id = %lesson.id, actor_id = %actor.user_id, "Lesson joined");

        Ok(JoinLessonResult {
            lesson_id: lesson.id,
            meeting,
        })
    }
}
