//! Cycle selection application layer.
//!
//! - `CycleStore` - best-effort persistence of the selected cycle
//! - `CycleSyncController` - fetch, filter, reconcile, persist
//! - `CycleContext` / `CycleScope` - consumer handle and its lifecycle

mod cycle_context;
mod cycle_store;
mod cycle_sync;

pub use cycle_context::{cycle_context, try_cycle_context, CycleContext, CycleScope};
pub use cycle_store::{CycleStore, CycleStoreError, SELECTED_CYCLE_KEY};
pub use cycle_sync::CycleSyncController;
