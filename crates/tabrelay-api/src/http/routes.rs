//! HTTP route definitions.
//!
//! ```text
//! GET  /ws      - WebSocket upgrade (Bearer header or ?token=)
//! POST /notify  - Broadcast to all of the caller's tabs
//! GET  /health  - Health with connection counts
//! GET  /stats   - Registry statistics
//! GET  /livez   - Liveness probe
//! ```

use std::sync::Arc;

use axum::{
    Router,
    extract::Request,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::http::monitoring;
use crate::http::notify::notify;
use crate::state::AppState;
use crate::websocket::ws_handler;

/// Create the main router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .route("/notify", post(notify))
        .route("/health", get(monitoring::health_check))
        .route("/stats", get(monitoring::registry_stats))
        .with_state(state)
        // Liveness probe has no state dependency
        .route("/livez", get(monitoring::liveness_probe))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
}

/// Request span without the query string, which may carry `?token=`.
fn request_span(request: &Request) -> Span {
    tracing::debug_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
    )
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
