//! GetLessonHandler - Query handler for a lesson and its permitted actions.

use std::sync::Arc;

use serde::Serialize;

use super::access::{load_access, LessonAccess};
use crate::application::fsm::FsmEngine;
use crate::domain::foundation::{LessonId, UserId};
use crate::domain::fsm::StateName;
use crate::domain::lesson::{Guard, Lesson, LessonAction, LessonError};
use crate::ports::{DirectoryReader, LessonRepository};

/// Query for one lesson as seen by one actor.
#[derive(Debug, Clone)]
pub struct GetLessonQuery {
    pub actor_id: UserId,
    pub lesson_id: LessonId,
}

/// A lesson, its current state and what the actor may do next.
#[derive(Debug, Clone, Serialize)]
pub struct LessonView {
    pub lesson: Lesson,
    pub state: StateName,
    pub available_actions: Vec<LessonAction>,
}

/// Handler for reading a lesson. Only its student and teacher may see it.
pub struct GetLessonHandler {
    directory: Arc<dyn DirectoryReader>,
    lessons: Arc<dyn LessonRepository>,
    engine: FsmEngine,
}

impl GetLessonHandler {
    pub fn new(
        directory: Arc<dyn DirectoryReader>,
        lessons: Arc<dyn LessonRepository>,
        engine: FsmEngine,
    ) -> Self {
        Self {
            directory,
            lessons,
            engine,
        }
    }

    pub async fn handle(&self, query: GetLessonQuery) -> Result<LessonView, LessonError> {
        let LessonAccess { lesson, actor } = load_access(
            self.directory.as_ref(),
            self.lessons.as_ref(),
            query.actor_id,
            query.lesson_id,
        )
        .await?;

        Guard::EitherParty.check(&lesson, &actor)?;

        let state = self.engine.get_current_state(lesson.state_item_id).await?;
        let next: Vec<StateName> = self
            .engine
            .available_transitions(lesson.state_item_id)
            .await?
            .into_iter()
            .map(|s| s.name)
            .collect();

        let available_actions = LessonAction::ALL
            .into_iter()
            .filter(|action| action.authorize(&lesson, &actor, state.name).is_ok())
            .filter(|action| {
                action
                    .target_state()
                    .map_or(true, |target| next.contains(&target))
            })
            .collect();

        Ok(LessonView {
            lesson,
            state: state.name,
            available_actions,
        })
    }
}
