//! CycleStore - durable persistence of the selected cycle.
//!
//! The selection lives under a single storage key as
//! `{"cycleId": "...", "cycleName": "..."}`; no entry means "no selection".
//!
//! `read` and `write` never fail. Persistence is best effort: a broken or
//! unavailable storage degrades to "nothing persisted" and the application
//! keeps working from memory. The `try_` variants expose the underlying
//! failure for callers that want it.

use std::sync::Arc;

use crate::domain::cycle::CycleOption;
use crate::ports::{SelectionStorage, StorageError};

/// Storage key holding the selected cycle.
pub const SELECTED_CYCLE_KEY: &str = "selectedCycle";

/// Why a persisted selection could not be read or written.
#[derive(Debug, thiserror::Error)]
pub enum CycleStoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Persisted selection is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Reads and writes the selected cycle through a `SelectionStorage`.
#[derive(Clone)]
pub struct CycleStore {
    storage: Arc<dyn SelectionStorage>,
    key: String,
}

impl CycleStore {
    /// Store using the default key.
    pub fn new(storage: Arc<dyn SelectionStorage>) -> Self {
        Self::with_key(storage, SELECTED_CYCLE_KEY)
    }

    pub fn with_key(storage: Arc<dyn SelectionStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the persisted selection, reporting why it could not be read.
    pub fn try_read(&self) -> Result<Option<CycleOption>, CycleStoreError> {
        match self.storage.get_item(&self.key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Reads the persisted selection.
    ///
    /// Empty storage, storage failures and payloads that are not a valid
    /// `CycleOption` all read as `None`.
    pub fn read(&self) -> Option<CycleOption> {
        self.try_read().unwrap_or_else(|e| {
            tracing::debug!(key = %self.key, error = %e, "Ignoring unreadable cycle selection");
            None
        })
    }

    /// Persists `option`, removing the entry when it is `None`.
    pub fn try_write(&self, option: Option<&CycleOption>) -> Result<(), CycleStoreError> {
        match option {
            Some(option) => {
                let raw = serde_json::to_string(option)?;
                self.storage.set_item(&self.key, &raw)?;
            }
            None => self.storage.remove_item(&self.key)?,
        }
        Ok(())
    }

    /// Persists `option`. Failures are logged and swallowed.
    pub fn write(&self, option: Option<&CycleOption>) {
        if let Err(e) = self.try_write(option) {
            tracing::debug!(key = %self.key, error = %e, "Failed to persist cycle selection");
        }
    }
}

impl std::fmt::Debug for CycleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CycleStore").field("key", &self.key).finish()
    }
}
