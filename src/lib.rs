//! Tutorly - Tutoring marketplace backend.
//!
//! Lesson lifecycles are driven by a table-driven state machine engine:
//! legal transitions are rows, role guards and side effects are layered on
//! top by the lesson handlers.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
