//! Meeting provider adapters.
//!
//! - `livekit` - Production LiveKit access token issuer
//! - `mock` - Test implementation with failure injection

mod livekit;
mod mock;

pub use livekit::{LiveKitConfig, LiveKitMeetingProvider};
pub use mock::{IssuedCredential, MockMeetingProvider};
