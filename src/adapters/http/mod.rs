//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure;
//! [`app_router`] assembles them with the shared middleware stack.

pub mod cycle;

use std::time::Duration;

use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

// Re-export key types for convenience
pub use cycle::cycle_router;
pub use cycle::CycleAppState;

/// Builds the full application router with request tracing and a timeout.
pub fn app_router(state: CycleAppState, request_timeout: Duration) -> Router {
    cycle_router()
        .with_state(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}
