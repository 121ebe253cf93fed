//! Error types for hook forwarding.

use thiserror::Error;

/// Errors raised while relaying a hook to one destination.
///
/// None of these reach the original caller. They are logged and the affected
/// destination is skipped or retried.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// The configured destination is not a valid absolute URL.
    #[error("invalid destination url {url:?}: {source}")]
    InvalidDestination {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The outbound HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// No HTTP response was obtained from the destination.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ForwardError>;
