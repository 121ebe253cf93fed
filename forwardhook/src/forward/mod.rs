//! Hook forwarding.
//!
//! An inbound hook is captured once into a [`CapturedRequest`] and relayed to
//! each destination by an independent [`Forwarder`] task:
//!
//! ```text
//! POST / → CapturedRequest → build_target(site) → Forwarder::forward (one task per site)
//! ```

pub mod forwarder;
pub mod request;
pub mod target;

pub use forwarder::{ForwardOutcome, Forwarder, RetryPolicy};
pub use request::{outbound_headers, CapturedRequest, QueryPair, TRANSPORT_HEADERS};
pub use target::{build_target, parse_query};
