//! Org Health - Assessment cycle selection
//!
//! This crate keeps the user's selected assessment cycle consistent with the
//! cycles they are allowed to see: it persists the selection, reconciles it
//! against the cycle-listing service and exposes the result to the rest of
//! the application.

pub mod adapters;
pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
