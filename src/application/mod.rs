//! Application layer - Orchestrates domain rules over the ports.
//!
//! - `cycle` - Assessment cycle selection, synchronization and context

pub mod cycle;
