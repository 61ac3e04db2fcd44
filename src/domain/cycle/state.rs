//! Observable state of the cycle selection.

use serde::Serialize;

use super::CycleOption;

/// Outcome of the most recent refresh.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SyncStatus {
    /// No refresh has completed yet.
    #[default]
    NeverSynced,
    /// The last refresh fetched the list successfully.
    Synced { cycle_count: usize },
    /// The last refresh could not fetch the list; `cycles` is empty.
    FetchFailed { reason: String },
}

impl SyncStatus {
    pub fn is_failure(&self) -> bool {
        matches!(self, SyncStatus::FetchFailed { .. })
    }
}

/// Point-in-time projection of the selection state.
///
/// Published to consumers only when one of its fields actually changes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleSnapshot {
    pub cycles: Vec<CycleOption>,
    pub selected_cycle: Option<CycleOption>,
    pub is_loading_cycles: bool,
    pub last_sync: SyncStatus,
}

impl CycleSnapshot {
    /// Initial state: empty list, selection restored from storage.
    pub fn initial(selected_cycle: Option<CycleOption>) -> Self {
        Self {
            selected_cycle,
            ..Self::default()
        }
    }

    /// True when the selection is one of the listed cycles.
    pub fn selection_is_listed(&self) -> bool {
        self.selected_cycle
            .as_ref()
            .is_some_and(|selected| self.cycles.contains(selected))
    }
}
