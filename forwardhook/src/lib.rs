//! Forwardhook - webhook fan-out relay.
//!
//! A single stable hook endpoint that relays every inbound POST to a fixed
//! list of destinations. The caller is acknowledged immediately; each
//! destination is delivered to by its own detached task.
//!
//! ## Architecture
//!
//! ```text
//! Caller → POST / → AppState::dispatch → Forwarder (one task per destination) → Destinations
//! ```

pub mod config;
pub mod error;
pub mod forward;
pub mod sites;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use error::ForwardError;
pub use forward::{CapturedRequest, ForwardOutcome, Forwarder, RetryPolicy};
pub use web::{router, AppState};
