//! In-memory adapters.
//!
//! Thread-safe implementations of the persistence ports for tests and local
//! development. Each store honors the same atomicity rules as its Postgres
//! counterpart.

mod directory;
mod fsm_store;
mod lesson_repository;
mod schedule_repository;

pub use directory::InMemoryDirectory;
pub use fsm_store::InMemoryFsmStore;
pub use lesson_repository::InMemoryLessonRepository;
pub use schedule_repository::InMemoryScheduleRepository;
