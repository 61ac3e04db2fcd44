//! In-memory cycle lister for tests and local development.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::cycle::CycleListEntry;
use crate::ports::{CycleListError, CycleLister};

/// Serves a fixed, replaceable list of cycles.
#[derive(Debug, Clone)]
pub struct InMemoryCycleLister {
    response: Arc<Mutex<Result<Vec<CycleListEntry>, CycleListError>>>,
    calls: Arc<AtomicUsize>,
}

impl InMemoryCycleLister {
    /// Create a lister that returns `entries`
    pub fn new(entries: Vec<CycleListEntry>) -> Self {
        Self {
            response: Arc::new(Mutex::new(Ok(entries))),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a lister whose every call fails with `error`
    pub fn failing(error: CycleListError) -> Self {
        let lister = Self::new(Vec::new());
        lister.fail_with(error);
        lister
    }

    /// Replace the list returned by subsequent calls
    pub fn set_entries(&self, entries: Vec<CycleListEntry>) {
        if let Ok(mut response) = self.response.lock() {
            *response = Ok(entries);
        }
    }

    /// Make subsequent calls fail with `error`
    pub fn fail_with(&self, error: CycleListError) {
        if let Ok(mut response) = self.response.lock() {
            *response = Err(error);
        }
    }

    /// Number of `list_cycles` calls served so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryCycleLister {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl CycleLister for InMemoryCycleLister {
    async fn list_cycles(&self) -> Result<Vec<CycleListEntry>, CycleListError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response
            .lock()
            .map_err(|_| CycleListError::Unavailable("lister lock poisoned".to_string()))?
            .clone()
    }
}
