//! BookLessonHandler - Command handler for booking a lesson.

use std::sync::Arc;

use tracing::{error, info};

use crate::application::fsm::FsmEngine;
use crate::domain::foundation::{
    CategoryId, ScheduleSlotId, StateMachineItemId, TeacherId, Timestamp, UserId,
};
use crate::domain::fsm::{MachineName, StateName};
use crate::domain::lesson::{Lesson, LessonError, NewLesson};
use crate::ports::{DirectoryReader, LessonRepository, ScheduleRepository};

/// Command to book a lesson. The actor becomes the lesson's student.
#[derive(Debug, Clone)]
pub struct BookLessonCommand {
    pub actor_id: UserId,
    pub teacher_id: TeacherId,
    pub category_id: CategoryId,
    pub schedule_slot_id: ScheduleSlotId,
}

/// Result of a successful booking.
#[derive(Debug, Clone)]
pub struct BookLessonResult {
    pub lesson: Lesson,
    pub state: StateName,
}

/// Handler for booking lessons.
///
/// Checks run in a fixed order: actor and teacher existence, self-booking,
/// category and skill, then the slot. The slot is reserved with a
/// conditional update before anything is created; if creating the state
/// machine item or the lesson fails afterwards, the reservation (and the
/// item, if any) is undone before the error is returned.
pub struct BookLessonHandler {
    directory: Arc<dyn DirectoryReader>,
    schedule: Arc<dyn ScheduleRepository>,
    lessons: Arc<dyn LessonRepository>,
    engine: FsmEngine,
}

impl BookLessonHandler {
    pub fn new(
        directory: Arc<dyn DirectoryReader>,
        schedule: Arc<dyn ScheduleRepository>,
        lessons: Arc<dyn LessonRepository>,
        engine: FsmEngine,
    ) -> Self {
        Self {
            directory,
            schedule,
            lessons,
            engine,
        }
    }

    pub async fn handle(&self, cmd: BookLessonCommand) -> Result<BookLessonResult, LessonError> {
        // 1. Actor and teacher must exist
        self.directory
            .find_user(cmd.actor_id)
            .await?
            .ok_or(LessonError::ActorNotFound(cmd.actor_id))?;

        let teacher = self
            .directory
            .find_teacher(cmd.teacher_id)
            .await?
            .ok_or(LessonError::TeacherNotFound(cmd.teacher_id))?;

        // 2. Nobody books themselves
        if teacher.is_user(cmd.actor_id) {
            return Err(LessonError::SelfBooking);
        }

        // 3. Category and skill must be active
        let category = self
            .directory
            .find_category(cmd.category_id)
            .await?
            .ok_or(LessonError::CategoryNotFound(cmd.category_id))?;
        if !category.active {
            return Err(LessonError::CategoryInactive(category.id));
        }

        let skill_active = self
            .directory
            .find_teacher_skill(teacher.id, category.id)
            .await?
            .is_some_and(|skill| skill.active);
        if !skill_active {
            return Err(LessonError::SkillInactive {
                teacher_id: teacher.id,
                category_id: category.id,
            });
        }

        // 4. Slot must belong to the teacher and be open
        let slot = self
            .schedule
            .find_slot(cmd.schedule_slot_id)
            .await?
            .ok_or(LessonError::ScheduleSlotNotFound(cmd.schedule_slot_id))?;
        if !slot.belongs_to(teacher.id) {
            return Err(LessonError::SlotNotOwned {
                slot_id: slot.id,
                teacher_id: teacher.id,
            });
        }
        if !slot.available {
            return Err(LessonError::SlotUnavailable(slot.id));
        }

        // 5. Reserve; losing here means another booking got there first
        if !self.schedule.reserve_slot(slot.id).await? {
            info!(slot_id = %slot.id, "Schedule slot taken by a concurrent booking");
            return Err(LessonError::SlotUnavailable(slot.id));
        }

        // 6. State machine item in the start state
        let item = match self.engine.create_instance(MachineName::Lesson).await {
            Ok(item) => item,
            Err(err) => {
                self.undo(slot.id, None).await;
                return Err(err.into());
            }
        };

        // 7. The lesson itself
        let new_lesson = NewLesson {
            student_id: cmd.actor_id,
            teacher_id: teacher.id,
            category_id: category.id,
            schedule_slot_id: slot.id,
            state_item_id: item.id,
            created_at: Timestamp::now(),
        };
        let lesson = match self.lessons.insert(new_lesson).await {
            Ok(lesson) => lesson,
            Err(err) => {
                self.undo(slot.id, Some(item.id)).await;
                return Err(err.into());
            }
        };

        info!(
            lesson_id = %lesson.id,
            student_id = %lesson.student_id,
            teacher_id = %lesson.teacher_id,
            slot_id = %slot.id,
            "Lesson booked"
        );

        Ok(BookLessonResult {
            lesson,
            state: StateName::Pending,
        })
    }

    /// Best-effort rollback. Failures are logged; the original error is
    /// what the caller sees.
    async fn undo(&self, slot_id: ScheduleSlotId, item_id: Option<StateMachineItemId>) {
        if let Some(item_id) = item_id {
            if let Err(e) = self.engine.discard_instance(item_id).await {
                error!(item_id = %item_id, error = %e, "Failed to discard orphaned lesson state");
            }
        }
        if let Err(e) = self.schedule.release_slot(slot_id).await {
            error!(slot_id = %slot_id, error = %e, "Failed to release schedule slot");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryFsmStore, InMemoryLessonRepository};
    use crate::application::handlers::lesson::test_support::{
        World, ACTIVE_CATEGORY, INACTIVE_CATEGORY, OPEN_SLOT, OTHER_TEACHERS_SLOT,
        OTHER_TEACHER_USER, STRANGER, STUDENT, TAKEN_SLOT, TEACHER, TEACHER_USER,
        UNSKILLED_CATEGORY,
    };
    use crate::domain::foundation::{DomainError, ErrorKind, LessonId};
    use crate::domain::fsm::MachineDefinition;
    use crate::domain::marketplace::ScheduleSlot;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════════

    struct FailingLessonRepository;

    #[async_trait]
    impl LessonRepository for FailingLessonRepository {
        async fn insert(&self, _lesson: NewLesson) -> Result<Lesson, DomainError> {
            Err(DomainError::database("insert failed"))
        }

        async fn find_by_id(&self, _id: LessonId) -> Result<Option<Lesson>, DomainError> {
            Ok(None)
        }
    }

    /// Reports every slot as open, then loses the conditional update, as if
    /// a concurrent booking committed between the read and the write.
    #[derive(Default)]
    struct RacedScheduleRepository {
        releases: AtomicUsize,
    }

    #[async_trait]
    impl ScheduleRepository for RacedScheduleRepository {
        async fn find_slot(&self, id: ScheduleSlotId) -> Result<Option<ScheduleSlot>, DomainError> {
            Ok(Some(ScheduleSlot {
                id,
                teacher_id: TEACHER,
                starts_at: Timestamp::from_unix_secs(1_700_000_000),
                ends_at: Timestamp::from_unix_secs(1_700_003_600),
                available: true,
            }))
        }

        async fn reserve_slot(&self, _id: ScheduleSlotId) -> Result<bool, DomainError> {
            Ok(false)
        }

        async fn release_slot(&self, _id: ScheduleSlotId) -> Result<(), DomainError> {
            self.releases.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn command(teacher_id: TeacherId, category_id: CategoryId, slot: ScheduleSlotId) -> BookLessonCommand {
        BookLessonCommand {
            actor_id: STUDENT,
            teacher_id,
            category_id,
            schedule_slot_id: slot,
        }
    }

    fn valid_command() -> BookLessonCommand {
        command(TEACHER, ACTIVE_CATEGORY, OPEN_SLOT)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn books_lesson_in_pending_and_reserves_slot() {
        let world = World::new();
        let result = world.book_handler().handle(valid_command()).await.unwrap();

        assert_eq!(result.state, StateName::Pending);
        assert_eq!(result.lesson.student_id, STUDENT);
        assert_eq!(result.lesson.teacher_id, TEACHER);
        assert_eq!(
            world.engine().get_current_state(result.lesson.state_item_id).await.unwrap().name,
            StateName::Pending
        );
        assert_eq!(world.schedule.is_available(OPEN_SLOT).await, Some(false));
    }

    #[tokio::test]
    async fn unknown_actor_is_not_found() {
        let world = World::new();
        let cmd = BookLessonCommand {
            actor_id: UserId::new(999),
            ..valid_command()
        };
        let err = world.book_handler().handle(cmd).await.unwrap_err();
        assert!(matches!(err, LessonError::ActorNotFound(_)));
    }

    #[tokio::test]
    async fn unknown_teacher_is_not_found() {
        let world = World::new();
        let err = world
            .book_handler()
            .handle(command(TeacherId::new(999), ACTIVE_CATEGORY, OPEN_SLOT))
            .await
            .unwrap_err();
        assert!(matches!(err, LessonError::TeacherNotFound(_)));
    }

    #[tokio::test]
    async fn teacher_cannot_book_themselves() {
        let world = World::new();
        let cmd = BookLessonCommand {
            actor_id: TEACHER_USER,
            ..valid_command()
        };
        let err = world.book_handler().handle(cmd).await.unwrap_err();
        assert!(matches!(err, LessonError::SelfBooking));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn inactive_category_is_rejected() {
        let world = World::new();
        let err = world
            .book_handler()
            .handle(command(TEACHER, INACTIVE_CATEGORY, OPEN_SLOT))
            .await
            .unwrap_err();
        assert!(matches!(err, LessonError::CategoryInactive(_)));
    }

    #[tokio::test]
    async fn teacher_without_skill_is_rejected() {
        let world = World::new();
        let err = world
            .book_handler()
            .handle(command(TEACHER, UNSKILLED_CATEGORY, OPEN_SLOT))
            .await
            .unwrap_err();
        assert!(matches!(err, LessonError::SkillInactive { .. }));
    }

    #[tokio::test]
    async fn slot_of_another_teacher_is_rejected() {
        let world = World::new();
        let err = world
            .book_handler()
            .handle(command(TEACHER, ACTIVE_CATEGORY, OTHER_TEACHERS_SLOT))
            .await
            .unwrap_err();
        assert!(matches!(err, LessonError::SlotNotOwned { .. }));
    }

    #[tokio::test]
    async fn taken_slot_is_a_conflict() {
        let world = World::new();
        let err = world
            .book_handler()
            .handle(command(TEACHER, ACTIVE_CATEGORY, TAKEN_SLOT))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn second_booking_of_same_slot_conflicts() {
        let world = World::new();
        world.book_handler().handle(valid_command()).await.unwrap();

        let cmd = BookLessonCommand {
            actor_id: STRANGER,
            ..valid_command()
        };
        let err = world.book_handler().handle(cmd).await.unwrap_err();
        assert!(matches!(err, LessonError::SlotUnavailable(id) if id == OPEN_SLOT));
    }

    #[tokio::test]
    async fn slot_taken_between_check_and_reserve_conflicts() {
        let world = World::new();
        let schedule = Arc::new(RacedScheduleRepository::default());
        let fsm = Arc::new(InMemoryFsmStore::new());
        let lessons = Arc::new(InMemoryLessonRepository::new());
        let handler = BookLessonHandler::new(
            world.directory.clone(),
            schedule.clone(),
            lessons.clone(),
            FsmEngine::new(fsm.clone()),
        );

        let err = handler.handle(valid_command()).await.unwrap_err();

        assert!(matches!(err, LessonError::SlotUnavailable(id) if id == OPEN_SLOT));
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(fsm.item_count().await, 0);
        assert_eq!(lessons.lesson_count().await, 0);
        assert_eq!(schedule.releases.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn another_teacher_can_book_as_a_student() {
        let world = World::new();
        let cmd = BookLessonCommand {
            actor_id: OTHER_TEACHER_USER,
            ..valid_command()
        };
        let result = world.book_handler().handle(cmd).await.unwrap();
        assert_eq!(result.lesson.student_id, OTHER_TEACHER_USER);
        assert_eq!(result.lesson.teacher_id, TEACHER);
    }

    #[tokio::test]
    async fn failed_insert_releases_slot_and_discards_state() {
        let world = World::new();
        let fsm = Arc::new(InMemoryFsmStore::new());
        let handler = BookLessonHandler::new(
            world.directory.clone(),
            world.schedule.clone(),
            Arc::new(FailingLessonRepository),
            FsmEngine::new(fsm.clone()),
        );

        let err = handler.handle(valid_command()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Infrastructure);
        assert_eq!(world.schedule.is_available(OPEN_SLOT).await, Some(true));
        assert_eq!(fsm.item_count().await, 0);
    }

    #[tokio::test]
    async fn unprovisioned_machine_releases_slot() {
        let world = World::new();
        let lessons = Arc::new(InMemoryLessonRepository::new());
        let handler = BookLessonHandler::new(
            world.directory.clone(),
            world.schedule.clone(),
            lessons.clone(),
            FsmEngine::new(Arc::new(InMemoryFsmStore::with_definitions([
                MachineDefinition::skill(),
            ]))),
        );

        let err = handler.handle(valid_command()).await.unwrap_err();
        assert!(matches!(err, LessonError::Transition(_)));
        assert_eq!(world.schedule.is_available(OPEN_SLOT).await, Some(true));
        assert_eq!(lessons.lesson_count().await, 0);
    }
}
