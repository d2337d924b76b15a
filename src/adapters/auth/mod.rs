//! Authentication adapters.
//!
//! Implementations of the `IdentityResolver` port:
//!
//! - `jwt` - HS256 bearer token validation
//! - `mock` - Test implementation that maps fixed tokens to users

mod jwt;
mod mock;

pub use jwt::{JwtConfig, JwtIdentityResolver};
pub use mock::MockIdentityResolver;
