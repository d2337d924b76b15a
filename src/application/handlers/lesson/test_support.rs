//! Shared fixture for lesson handler tests.
//!
//! One student, two teachers and a stranger, wired to in-memory stores and
//! a mock meeting provider.

use std::sync::Arc;

use super::{BookLessonCommand, BookLessonHandler, GetLessonHandler, JoinLessonHandler, TransitionLessonHandler};
use crate::adapters::meeting::MockMeetingProvider;
use crate::adapters::memory::{
    InMemoryDirectory, InMemoryFsmStore, InMemoryLessonRepository, InMemoryScheduleRepository,
};
use crate::application::fsm::FsmEngine;
use crate::domain::foundation::{CategoryId, ScheduleSlotId, TeacherId, Timestamp, UserId};
use crate::domain::fsm::StateName;
use crate::domain::lesson::Lesson;
use crate::domain::marketplace::{Category, ScheduleSlot, Teacher, TeacherSkill, User};

pub const STUDENT: UserId = UserId::new(1);
pub const TEACHER_USER: UserId = UserId::new(2);
pub const OTHER_TEACHER_USER: UserId = UserId::new(3);
pub const STRANGER: UserId = UserId::new(4);

pub const TEACHER: TeacherId = TeacherId::new(20);
pub const OTHER_TEACHER: TeacherId = TeacherId::new(21);

pub const ACTIVE_CATEGORY: CategoryId = CategoryId::new(1);
pub const INACTIVE_CATEGORY: CategoryId = CategoryId::new(2);
pub const UNSKILLED_CATEGORY: CategoryId = CategoryId::new(3);

pub const OPEN_SLOT: ScheduleSlotId = ScheduleSlotId::new(100);
pub const OTHER_TEACHERS_SLOT: ScheduleSlotId = ScheduleSlotId::new(101);
pub const TAKEN_SLOT: ScheduleSlotId = ScheduleSlotId::new(102);

pub struct World {
    pub directory: Arc<InMemoryDirectory>,
    pub schedule: Arc<InMemoryScheduleRepository>,
    pub lessons: Arc<InMemoryLessonRepository>,
    pub fsm: Arc<InMemoryFsmStore>,
    pub meetings: Arc<MockMeetingProvider>,
}

fn user(id: UserId, name: &str) -> User {
    User {
        id,
        name: name.to_string(),
    }
}

fn slot(id: ScheduleSlotId, teacher_id: TeacherId, available: bool) -> ScheduleSlot {
    let starts_at = Timestamp::from_unix_secs(1_800_000_000);
    ScheduleSlot {
        id,
        teacher_id,
        starts_at,
        ends_at: starts_at.plus_minutes(60),
        available,
    }
}

impl World {
    pub fn new() -> Self {
        let directory = InMemoryDirectory::new()
            .with_user(user(STUDENT, "student"))
            .with_user(user(TEACHER_USER, "teacher"))
            .with_user(user(OTHER_TEACHER_USER, "other teacher"))
            .with_user(user(STRANGER, "stranger"))
            .with_teacher(Teacher {
                id: TEACHER,
                user_id: TEACHER_USER,
            })
            .with_teacher(Teacher {
                id: OTHER_TEACHER,
                user_id: OTHER_TEACHER_USER,
            })
            .with_category(Category {
                id: ACTIVE_CATEGORY,
                name: "guitar".to_string(),
                active: true,
            })
            .with_category(Category {
                id: INACTIVE_CATEGORY,
                name: "lute".to_string(),
                active: false,
            })
            .with_category(Category {
                id: UNSKILLED_CATEGORY,
                name: "piano".to_string(),
                active: true,
            })
            .with_skill(TeacherSkill {
                teacher_id: TEACHER,
                category_id: ACTIVE_CATEGORY,
                active: true,
            })
            .with_skill(TeacherSkill {
                teacher_id: TEACHER,
                category_id: UNSKILLED_CATEGORY,
                active: false,
            });

        let schedule = InMemoryScheduleRepository::with_slots([
            slot(OPEN_SLOT, TEACHER, true),
            slot(OTHER_TEACHERS_SLOT, OTHER_TEACHER, true),
            slot(TAKEN_SLOT, TEACHER, false),
        ]);

        Self {
            directory: Arc::new(directory),
            schedule: Arc::new(schedule),
            lessons: Arc::new(InMemoryLessonRepository::new()),
            fsm: Arc::new(InMemoryFsmStore::new()),
            meetings: Arc::new(MockMeetingProvider::new()),
        }
    }

    pub fn engine(&self) -> FsmEngine {
        FsmEngine::new(self.fsm.clone())
    }

    pub fn book_handler(&self) -> BookLessonHandler {
        BookLessonHandler::new(
            self.directory.clone(),
            self.schedule.clone(),
            self.lessons.clone(),
            self.engine(),
        )
    }

    pub fn transition_handler(&self) -> TransitionLessonHandler {
        TransitionLessonHandler::new(
            self.directory.clone(),
            self.lessons.clone(),
            self.engine(),
            self.meetings.clone(),
        )
    }

    pub fn join_handler(&self) -> JoinLessonHandler {
        JoinLessonHandler::new(
            self.directory.clone(),
            self.lessons.clone(),
            self.engine(),
            self.meetings.clone(),
        )
    }

    pub fn get_handler(&self) -> GetLessonHandler {
        GetLessonHandler::new(self.directory.clone(), self.lessons.clone(), self.engine())
    }

    /// Books the open slot for the student. Can be called once per world.
    pub async fn booked_lesson(&self) -> Lesson {
        self.book_handler()
            .handle(BookLessonCommand {
                actor_id: STUDENT,
                teacher_id: TEACHER,
                category_id: ACTIVE_CATEGORY,
                schedule_slot_id: OPEN_SLOT,
            })
            .await
            .expect("booking succeeds")
            .lesson
    }

    /// Books a lesson and drives it to `state` directly through the engine.
    pub async fn lesson_in(&self, state: StateName) -> Lesson {
        use StateName::*;
        let path: &[StateName] = match state {
            Pending => &[],
            Planned => &[Planned],
            Rejected => &[Rejected],
            Ongoing => &[Planned, Ongoing],
            Finished => &[Planned, Ongoing, Finished],
            Cancelled => &[Planned, Cancelled],
            other => panic!("{} is not a lesson state", other),
        };

        let lesson = self.booked_lesson().await;
        for next in path {
            self.engine()
                .apply_transition(lesson.state_item_id, *next)
                .await
                .expect("fixture path is legal");
        }
        lesson
    }

    pub async fn state_of(&self, lesson: &Lesson) -> StateName {
        self.engine()
            .get_current_state(lesson.state_item_id)
            .await
            .expect("lesson state exists")
            .name
    }
}
