//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors)
//! - `cycle` - Assessment cycle options, membership filtering, reconciliation
//! - `identity` - The acting user

pub mod cycle;
pub mod foundation;
pub mod identity;
