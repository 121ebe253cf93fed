//! Inbound hook endpoint.
//!
//! The handler never waits on downstream delivery. It:
//! 1. Rejects anything that is not a POST
//! 2. Captures body, headers and query
//! 3. Spawns one forward task per destination
//! 4. Returns 200 OK

use std::sync::Arc;

use axum::{
    body::{to_bytes, Bytes},
    extract::{Request, State},
    http::{Method, StatusCode},
};
use tracing::{error, info, warn};

use crate::error::Result;
use crate::forward::{build_target, parse_query, CapturedRequest, Forwarder};
use crate::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub forwarder: Forwarder,
}

impl AppState {
    /// Build state with a forwarder configured from `config`.
    pub fn new(config: Config) -> Result<Self> {
        let forwarder = Forwarder::new(&config)?;
        Ok(Self::with_forwarder(config, forwarder))
    }

    pub fn with_forwarder(config: Config, forwarder: Forwarder) -> Self {
        Self {
            config: Arc::new(config),
            forwarder,
        }
    }

    /// Spawn one detached forward task per destination.
    ///
    /// Destinations that do not parse are logged and skipped. Returns the
    /// number of tasks spawned.
    pub fn dispatch(&self, request: CapturedRequest) -> usize {
        let request = Arc::new(request);
        let mut spawned = 0;

        for site in self.config.sites.iter() {
            let target = match build_target(site, &request.query) {
                Ok(url) => url,
                Err(e) => {
                    error!(site = %site, error = %e, "destination_parse_failed");
                    continue;
                }
            };

            let forwarder = self.forwarder.clone();
            let request = Arc::clone(&request);
            tokio::spawn(async move {
                forwarder.forward(&request, &target).await;
            });
            spawned += 1;
        }

        spawned
    }
}

/// Hook endpoint.
///
/// Downstream outcomes are only visible in the logs; the caller always gets
/// 200 for a POST and 400 for anything else.
pub async fn hook(State(state): State<AppState>, request: Request) -> StatusCode {
    let (parts, body) = request.into_parts();

    if parts.method != Method::POST {
        warn!(method = %parts.method, "hook_rejected_method");
        return StatusCode::BAD_REQUEST;
    }

    let body = match to_bytes(body, state.config.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(
                error = %e,
                max_body_bytes = state.config.max_body_bytes,
                "hook_body_read_failed"
            );
            Bytes::new()
        }
    };

    let captured = CapturedRequest::new(parts.headers, body, parse_query(parts.uri.query()));

    info!(
        body_length = captured.body.len(),
        header_count = captured.headers.len(),
        query_param_count = captured.query.len(),
        "hook_received"
    );

    let spawned = state.dispatch(captured);

    info!(
        destinations = state.config.sites.len(),
        spawned = spawned,
        "hook_dispatched"
    );

    StatusCode::OK
}
