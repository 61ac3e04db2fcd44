//! Assessment cycle selection domain.
//!
//! Pure types and rules: the selectable `CycleOption`, the collaborator's
//! `CycleListEntry` with membership filtering, reconciliation of a persisted
//! selection, and the observable `CycleSnapshot`.

mod entry;
mod option;
mod reconcile;
mod state;

pub use entry::{filter_by_membership, CycleListEntry};
pub use option::CycleOption;
pub use reconcile::{reconcile, Reconciliation};
pub use state::{CycleSnapshot, SyncStatus};
