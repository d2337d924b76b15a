//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - sqlx-backed stores for the FSM catalog, lessons and marketplace data
//! - `memory` - In-process stores for tests and local development
//! - `meeting` - Video room credentials (LiveKit-style tokens, mock)
//! - `auth` - Bearer token resolution (HS256 JWT, mock)
//! - `http` - axum routes and middleware

pub mod auth;
pub mod http;
pub mod meeting;
pub mod memory;
pub mod postgres;
