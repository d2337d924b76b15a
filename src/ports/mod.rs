//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `FsmStore` - State catalog, machines, transitions and live items
//! - `LessonRepository` - Lesson records
//! - `DirectoryReader` - Users, teachers, categories and skills
//! - `ScheduleRepository` - Teacher schedule slots
//!
//! ## External Service Ports
//!
//! - `MeetingProvider` - Video room credentials
//! - `IdentityResolver` - Bearer token validation

mod directory_reader;
mod fsm_store;
mod identity_resolver;
mod lesson_repository;
mod meeting_provider;
mod schedule_repository;

pub use directory_reader::DirectoryReader;
pub use fsm_store::FsmStore;
pub use identity_resolver::IdentityResolver;
pub use lesson_repository::LessonRepository;
pub use meeting_provider::{MeetingCredential, MeetingError, MeetingProvider};
pub use schedule_repository::ScheduleRepository;
