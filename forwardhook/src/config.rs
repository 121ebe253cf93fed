//! Configuration module for environment variable parsing.
//!
//! Everything is read once at startup into an immutable [`Config`] that the
//! web layer shares behind an `Arc`.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::forward::RetryPolicy;
use crate::sites::load_sites;

/// Port used when `PORT` is unset or unparseable.
pub const DEFAULT_PORT: u16 = 8001;

/// Default location of the destination list.
pub const DEFAULT_SITES_FILE: &str = "sites";

/// Default inbound body limit. Unbounded: the whole body is always read.
pub const DEFAULT_MAX_BODY_BYTES: usize = usize::MAX;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,

    /// Path of the file the destination list was read from
    pub sites_file: String,

    /// Destination base URLs, in file order
    pub sites: Arc<[String]>,

    /// Attempt limit and pause between transport failures
    pub retry: RetryPolicy,

    /// Optional per-request timeout for outbound calls
    pub request_timeout: Option<Duration>,

    /// Maximum number of inbound body bytes read into memory. Unbounded
    /// unless `FORWARDHOOK_MAX_BODY_BYTES` is set.
    pub max_body_bytes: usize,

    /// Copy host/content-length and hop-by-hop headers verbatim
    pub preserve_transport_headers: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// The sites file is read here as well, so the returned value is complete.
    pub fn from_env() -> Self {
        let sites_file =
            env::var("FORWARDHOOK_SITES_FILE").unwrap_or_else(|_| DEFAULT_SITES_FILE.to_string());
        let sites = load_sites(&sites_file);

        Config {
            port: parse_var("PORT", DEFAULT_PORT),

            sites_file,

            sites: sites.into(),

            retry: RetryPolicy {
                max_attempts: parse_var("FORWARDHOOK_MAX_RETRIES", 1),
                backoff: Duration::from_millis(parse_var("FORWARDHOOK_RETRY_BACKOFF_MS", 10_000)),
            },

            request_timeout: env::var("FORWARDHOOK_REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .map(Duration::from_millis),

            max_body_bytes: parse_var("FORWARDHOOK_MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES),

            preserve_transport_headers: parse_bool("FORWARDHOOK_PRESERVE_TRANSPORT_HEADERS"),
        }
    }

    /// Build a configuration around an explicit destination list, with every
    /// other field at its default.
    pub fn with_sites<I, S>(sites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Config {
            port: DEFAULT_PORT,
            sites_file: DEFAULT_SITES_FILE.to_string(),
            sites: sites.into_iter().map(Into::into).collect(),
            retry: RetryPolicy::default(),
            request_timeout: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            preserve_transport_headers: false,
        }
    }

    /// Listen address in `host:port` form.
    pub fn listen_addr(&self) -> std::net::SocketAddr {
        std::net::SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

/// Parse an environment variable, falling back to `default` when it is unset
/// or invalid.
fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    let raw = match env::var(name) {
        Ok(v) => v,
        Err(_) => return default,
    };

    match raw.trim().parse() {
        Ok(v) => v,
        Err(_) => {
            warn!(env_var = name, value = %raw, "Invalid value, using default");
            default
        }
    }
}

/// Parse a boolean flag. Accepts `1`, `true`, `yes` and `on`.
fn parse_bool(name: &str) -> bool {
    env::var(name)
        .map(|raw| {
            matches!(
                raw.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            )
        })
        .unwrap_or(false)
}
