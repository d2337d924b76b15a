//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresFsmStore` - State catalog, transitions and machine items
//! - `PostgresLessonRepository` - Lesson records
//! - `PostgresDirectory` - Users, teachers, categories and skills
//! - `PostgresScheduleRepository` - Schedule slots with conditional reservation
//!
//! Schema and catalog seed live in `migrations/`.

mod directory;
mod fsm_store;
mod lesson_repository;
mod schedule_repository;

pub use directory::PostgresDirectory;
pub use fsm_store::PostgresFsmStore;
pub use lesson_repository::PostgresLessonRepository;
pub use schedule_repository::PostgresScheduleRepository;
