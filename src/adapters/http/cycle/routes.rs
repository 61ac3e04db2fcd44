//! Route configuration for cycle endpoints.
//!
//! Configures Axum router with cycle-related routes.

use axum::routing::{get, post, put};
use axum::Router;

use super::handlers::{get_cycles, refresh_cycles, set_identity, set_selected_cycle, CycleAppState};

/// Creates the cycle router with all endpoints.
///
/// Routes:
/// - `GET /api/cycles` - Cycle list, selection and sync status
/// - `PUT /api/cycles/selected` - Select a cycle (`null` clears)
/// - `POST /api/cycles/refresh` - Force a re-sync
/// - `PUT /api/identity` - Switch the acting user
pub fn cycle_router() -> Router<CycleAppState> {
    Router::new()
        .route("/api/cycles", get(get_cycles))
        .route("/api/cycles/selected", put(set_selected_cycle))
        .route("/api/cycles/refresh", post(refresh_cycles))
        .route("/api/identity", put(set_identity))
}
