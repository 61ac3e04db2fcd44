//! Identity Adapters
//!
//! - **WatchIdentityProvider** - Holds the acting user in a watch channel

mod watch_identity_provider;

pub use watch_identity_provider::WatchIdentityProvider;
