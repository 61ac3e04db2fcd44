//! In-Memory Selection Storage Adapter
//!
//! Keeps values in memory. Useful for testing and for runs where persistence
//! across restarts is not wanted.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::ports::{SelectionStorage, StorageError};

/// In-memory key/value storage
#[derive(Debug, Clone, Default)]
pub struct InMemorySelectionStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
    writes: Arc<AtomicUsize>,
    unavailable: Arc<AtomicBool>,
}

impl InMemorySelectionStorage {
    /// Create an empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage holding `value` under `key`
    pub fn with_item(key: &str, value: &str) -> Self {
        let storage = Self::new();
        if let Ok(mut items) = storage.items.lock() {
            items.insert(key.to_string(), value.to_string());
        }
        storage
    }

    /// Number of successful `set_item`/`remove_item` calls
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Make every subsequent call fail with `StorageError::Unavailable`
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Raw value under `key`, bypassing the availability switch
    pub fn peek(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    fn items(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StorageError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("storage disabled".to_string()));
        }
        self.items
            .lock()
            .map_err(|_| StorageError::Unavailable("storage lock poisoned".to_string()))
    }
}

impl SelectionStorage for InMemorySelectionStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items()?.insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items()?.remove(key);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
