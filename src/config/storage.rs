//! Selection storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where the selected cycle is persisted
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Storage backend
    #[serde(default)]
    pub backend: StorageBackend,

    /// JSON document backing the file store
    #[serde(default = "default_selection_path")]
    pub selection_path: PathBuf,

    /// Key the selection is stored under
    #[serde(default = "default_selection_key")]
    pub selection_key: String,
}

/// Storage backend type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Memory,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.selection_key.is_empty() {
            return Err(ValidationError::MissingRequired("storage.selection_key"));
        }
        if self.backend == StorageBackend::File && self.selection_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("storage.selection_path"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            selection_path: default_selection_path(),
            selection_key: default_selection_key(),
        }
    }
}

fn default_selection_path() -> PathBuf {
    PathBuf::from("./data/storage.json")
}

fn default_selection_key() -> String {
    "selectedCycle".to_string()
}
