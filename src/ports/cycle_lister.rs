//! Cycle Lister Port - Interface to the service that lists assessment cycles.

use async_trait::async_trait;

use crate::domain::cycle::CycleListEntry;

/// Errors returned by a cycle listing call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CycleListError {
    #[error("Cycle service unavailable: {0}")]
    Unavailable(String),

    #[error("Cycle service returned status {status}")]
    UnexpectedStatus { status: u16 },

    #[error("Failed to decode cycle list: {0}")]
    InvalidResponse(String),

    #[error("Cycle service request timed out")]
    Timeout,
}

/// Port for fetching the full list of assessment cycles.
///
/// The call is global: it is not keyed by user. Membership filtering happens
/// on the caller's side using `CycleListEntry::employee_ids`.
#[async_trait]
pub trait CycleLister: Send + Sync {
    /// Fetch every cycle, in the order the service returns them.
    ///
    /// # Errors
    /// Returns `CycleListError` on transport or decoding failure
    async fn list_cycles(&self) -> Result<Vec<CycleListEntry>, CycleListError>;
}
