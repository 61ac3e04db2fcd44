//! Selection reconciliation.
//!
//! Decides what happens to a previously persisted selection once a fresh list
//! of cycles is known. A still-valid previous choice always wins; otherwise the
//! first cycle in collaborator order is adopted; an empty list clears the
//! selection.

use super::CycleOption;

/// Outcome of reconciling a persisted selection against a cycle list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// The persisted selection is still valid. Nothing needs writing.
    Keep(CycleOption),
    /// A new selection must be adopted and persisted.
    Replace {
        selected: CycleOption,
        /// The stale selection being superseded, if there was one.
        superseded: Option<CycleOption>,
    },
    /// No cycles are available; the selection is cleared.
    Clear,
}

impl Reconciliation {
    /// The selection that results from this outcome.
    pub fn selected(&self) -> Option<&CycleOption> {
        match self {
            Reconciliation::Keep(option) => Some(option),
            Reconciliation::Replace { selected, .. } => Some(selected),
            Reconciliation::Clear => None,
        }
    }

    /// Whether the store must be written to make it match `selected()`.
    pub fn requires_write(&self) -> bool {
        !matches!(self, Reconciliation::Keep(_))
    }
}

/// Reconciles `persisted` against `cycles`.
pub fn reconcile(persisted: Option<&CycleOption>, cycles: &[CycleOption]) -> Reconciliation {
    if let Some(previous) = persisted {
        if cycles.contains(previous) {
            return Reconciliation::Keep(previous.clone());
        }
    }

    match cycles.first() {
        Some(first) => Reconciliation::Replace {
            selected: first.clone(),
            superseded: persisted.cloned(),
        },
        None => Reconciliation::Clear,
    }
}
