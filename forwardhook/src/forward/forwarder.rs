//! Delivery of one captured hook to one destination, with bounded retry.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::time::sleep;
use tracing::{error, info, warn};
use url::Url;

use super::request::{outbound_headers, CapturedRequest};
use crate::config::Config;
use crate::error::{ForwardError, Result};

/// How often a destination is tried and how long to wait between tries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. `1` means no retry.
    pub max_attempts: u32,
    /// Pause after each transport failure.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            backoff: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// Attempt limit actually enforced. At least one attempt is always made.
    pub fn attempt_limit(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// Terminal state of a forward task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardOutcome {
    /// The destination answered. Any status counts, 5xx included.
    Delivered { status: StatusCode, attempts: u32 },
    /// Every attempt failed before a response was obtained.
    Exhausted { attempts: u32 },
}

/// Sends captured hooks to destinations.
///
/// Cheap to clone: the underlying `reqwest::Client` is pooled and shared by
/// every task.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: Client,
    policy: RetryPolicy,
    preserve_transport_headers: bool,
}

impl Forwarder {
    /// Build a forwarder from the application configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ForwardError::Client)?;

        Ok(Self::with_client(
            client,
            config.retry,
            config.preserve_transport_headers,
        ))
    }

    pub fn with_client(client: Client, policy: RetryPolicy, preserve_transport_headers: bool) -> Self {
        Self {
            client,
            policy,
            preserve_transport_headers,
        }
    }

    /// Deliver `request` to `target`.
    ///
    /// Only transport failures are retried. Once any HTTP response comes back
    /// the task stops, whatever the status code.
    pub async fn forward(&self, request: &CapturedRequest, target: &Url) -> ForwardOutcome {
        let limit = self.policy.attempt_limit();
        let mut attempt = 1;

        loop {
            info!(url = %target, attempt = attempt, "forward_attempt");

            match self.send_once(request, target).await {
                Ok(status) => {
                    info!(
                        url = %target,
                        attempt = attempt,
                        status_code = status.as_u16(),
                        "forward_delivered"
                    );
                    return ForwardOutcome::Delivered {
                        status,
                        attempts: attempt,
                    };
                }
                Err(e) => {
                    error!(
                        url = %target,
                        attempt = attempt,
                        backoff_ms = self.policy.backoff.as_millis() as u64,
                        error = %e,
                        "forward_failed"
                    );
                    sleep(self.policy.backoff).await;
                }
            }

            if attempt >= limit {
                warn!(url = %target, attempts = attempt, "forward_exhausted");
                return ForwardOutcome::Exhausted { attempts: attempt };
            }
            attempt += 1;
        }
    }

    /// One POST. The response body is dropped unread.
    async fn send_once(&self, request: &CapturedRequest, target: &Url) -> Result<StatusCode> {
        let headers = outbound_headers(&request.headers, self.preserve_transport_headers);

        let response = self
            .client
            .post(target.clone())
            .headers(headers)
            .body(request.body.clone())
            .send()
            .await?;

        Ok(response.status())
    }
}
