//! HTTP adapter for cycle selection.
//!
//! Exposes the shared `CycleContext` to HTTP consumers.
//!
//! # Endpoints
//!
//! - `GET /api/cycles` - Read cycles, selection, loading flag and sync status
//! - `PUT /api/cycles/selected` - Change the selection
//! - `POST /api/cycles/refresh` - Force a re-sync
//! - `PUT /api/identity` - Switch the acting user

pub mod dto;
pub mod handlers;
pub mod routes;

// Re-export commonly used types
pub use handlers::CycleAppState;
pub use routes::cycle_router;
