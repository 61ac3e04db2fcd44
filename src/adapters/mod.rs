//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - Durable selection storage (file, in-memory)
//! - `cycle_api` - Cycle-listing service clients (HTTP, in-memory)
//! - `identity` - Acting user source
//! - `http` - REST surface over the cycle context

pub mod cycle_api;
pub mod http;
pub mod identity;
pub mod storage;

pub use cycle_api::{HttpCycleLister, HttpCycleListerConfig, InMemoryCycleLister};
pub use identity::WatchIdentityProvider;
pub use storage::{FileSelectionStorage, InMemorySelectionStorage};
