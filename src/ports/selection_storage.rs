//! Selection Storage Port - Interface for durable client-side key/value storage.
//!
//! Models the small string store the selected cycle is persisted in. Values
//! are raw strings; (de)serialization belongs to the caller.

/// Errors that can occur during storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Storage backing document is corrupt: {0}")]
    Corrupt(String),
}

/// Port for a synchronous key/value string store.
///
/// Implementations are expected to be cheap enough to call on every selection
/// change.
pub trait SelectionStorage: Send + Sync {
    /// Read the raw value stored under `key`.
    ///
    /// Returns `Ok(None)` when nothing is stored.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value under `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}
