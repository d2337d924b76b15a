//! In-memory lesson repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, LessonId};
use crate::domain::lesson::{Lesson, NewLesson};
use crate::ports::LessonRepository;

/// In-memory implementation of [`LessonRepository`].
#[derive(Debug, Clone)]
pub struct InMemoryLessonRepository {
    lessons: Arc<RwLock<HashMap<LessonId, Lesson>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryLessonRepository {
    pub fn new() -> Self {
        Self {
            lessons: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Number of stored lessons (useful for tests).
    pub async fn lesson_count(&self) -> usize {
        self.lessons.read().await.len()
    }
}

impl Default for InMemoryLessonRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LessonRepository for InMemoryLessonRepository {
    async fn insert(&self, lesson: NewLesson) -> Result<Lesson, DomainError> {
        let id = LessonId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let lesson = lesson.into_lesson(id);
        self.lessons.write().await.insert(id, lesson.clone());
        Ok(lesson)
    }

    async fn find_by_id(&self, id: LessonId) -> Result<Option<Lesson>, DomainError> {
        Ok(self.lessons.read().await.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{
        CategoryId, ScheduleSlotId, StateMachineItemId, TeacherId, Timestamp, UserId,
    };

    fn new_lesson() -> NewLesson {
        NewLesson {
            student_id: UserId::new(1),
            teacher_id: TeacherId::new(1),
            category_id: CategoryId::new(1),
            schedule_slot_id: ScheduleSlotId::new(1),
            state_item_id: StateMachineItemId::new(1),
            created_at: Timestamp::now(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids() {
        let repo = InMemoryLessonRepository::new();
        let first = repo.insert(new_lesson()).await.unwrap();
        let second = repo.insert(new_lesson()).await.unwrap();
        assert_eq!(first.id, LessonId::new(1));
        assert_eq!(second.id, LessonId::new(2));
    }

    #[tokio::test]
    async fn find_returns_none_for_missing_lesson() {
        let repo = InMemoryLessonRepository::new();
        assert!(repo.find_by_id(LessonId::new(1)).await.unwrap().is_none());
    }
}
