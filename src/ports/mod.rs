//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SelectionStorage` - Durable key/value storage for the selected cycle
//! - `CycleLister` - The service that lists assessment cycles
//! - `IdentityProvider` - The acting user, observable for changes

mod cycle_lister;
mod identity_provider;
mod selection_storage;

pub use cycle_lister::{CycleListError, CycleLister};
pub use identity_provider::IdentityProvider;
pub use selection_storage::{SelectionStorage, StorageError};
