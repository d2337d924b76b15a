//! TransitionLessonHandler - Command handler for lesson state changes.
//!
//! Handles approve (plan), reject, cancel, start and finish. Join is a
//! separate handler because it never changes state.

use std::sync::Arc;

use tracing::info;

use super::access::{issue_meeting_credential, load_access, LessonAccess};
use crate::application::fsm::FsmEngine;
use crate::domain::foundation::{LessonId, UserId};
use crate::domain::fsm::StateName;
use crate::domain::lesson::{LessonAction, LessonError};
use crate::ports::{DirectoryReader, LessonRepository, MeetingCredential, MeetingProvider};

/// Command to apply a named transition to a lesson.
#[derive(Debug, Clone)]
pub struct TransitionLessonCommand {
    pub actor_id: UserId,
    pub lesson_id: LessonId,
    /// One of `approve`, `plan`, `reject`, `cancel`, `start`, `finish`.
    pub transition: String,
}

/// Result of a successful transition.
#[derive(Debug, Clone)]
pub struct TransitionLessonResult {
    pub lesson_id: LessonId,
    pub action: LessonAction,
    pub state: StateName,
    /// Populated only for `start`.
    pub meeting: Option<MeetingCredential>,
}

/// Handler for lesson transitions.
///
/// Failure precedence is fixed: actor and lesson existence, the action's
/// role guard, its state-specific precondition, then the engine. Nothing
/// about the lesson's state is read until the role guard has passed.
pub struct TransitionLessonHandler {
    directory: Arc<dyn DirectoryReader>,
    lessons: Arc<dyn LessonRepository>,
    engine: FsmEngine,
    meetings: Arc<dyn MeetingProvider>,
}

impl TransitionLessonHandler {
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

    pub async fn handle(
        &self,
        cmd: TransitionLessonCommand,
    ) -> Result<TransitionLessonResult, LessonError> {
        let action: LessonAction = cmd.transition.parse()?;
        let target = action
            .target_state()
            .ok_or(LessonError::NotATransition(action))?;

        // 1. Existence
        let LessonAccess { lesson, actor } = load_access(
            self.directory.as_ref(),
            self.lessons.as_ref(),
            cmd.actor_id,
            cmd.lesson_id,
        )
        .await?;

        // 2. Role guard
        action.guard().check(&lesson, &actor)?;

        // 3. State-specific precondition
        let current = self.engine.get_current_state(lesson.state_item_id).await?;
        action.check_state_policy(&lesson, &actor, current.name)?;

        // 4. Engine
        let state = if action.pins_observed_state() {
            self.engine
                .apply_transition_from(lesson.state_item_id, current.id, target)
                .await?
        } else {
            self.engine
                .apply_transition(lesson.state_item_id, target)
                .await?
        };

        info!(
            lesson_id = %lesson.id,
            actor_id = %actor.user_id,
            action = %action,
            from = %current.name,
            to = %state.name,
            "Lesson transitioned"
        );

        // Side effect only after the move has committed
        let meeting = if action.issues_credential() {
            Some(
                issue_meeting_credential(self.meetings.as_ref(), lesson.id, actor.user_id, true)
                    .await?,
            )
        } else {
            None
        };

        Ok(TransitionLessonResult {
            lesson_id: lesson.id,
            action,
            state: state.name,
            meeting,
        })
    }
}
