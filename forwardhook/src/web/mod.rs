//! Web server module for the inbound hook endpoint.
//!
//! This module provides a thin web server that:
//! - Accepts hooks on `/`
//! - Fans each one out to every configured destination
//! - Returns 200 OK without waiting on delivery

pub mod handlers;

use axum::{routing::any, Router};
use tower_http::trace::TraceLayer;

pub use handlers::{hook, AppState};

/// Build the router. `/` is the only route.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", any(hook))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
