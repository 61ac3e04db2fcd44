//! File-based Selection Storage Adapter
//!
//! Stores every key in one JSON document on disk, the equivalent of a
//! browser's local storage for a headless client. Writes go through a
//! temporary file and a rename so a crash never leaves a half-written
//! document behind.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::ports::{SelectionStorage, StorageError};

type Document = BTreeMap<String, String>;

/// File-backed key/value storage
#[derive(Debug)]
pub struct FileSelectionStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSelectionStorage {
    /// Create a storage backed by the JSON document at `path`
    ///
    /// The file and its parent directories are created on first write.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing document
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn load(&self) -> Result<Document, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Document::new()),
            Err(e) => return Err(StorageError::IoError(e.to_string())),
        };

        if contents.trim().is_empty() {
            return Ok(Document::new());
        }

        serde_json::from_str(&contents).map_err(|e| StorageError::Corrupt(e.to_string()))
    }

    /// Load the document for modification. A corrupt document is discarded so
    /// that writes keep working.
    fn load_for_update(&self) -> Result<Document, StorageError> {
        match self.load() {
            Err(StorageError::Corrupt(reason)) => {
                tracing::debug!(path = %self.path.display(), %reason, "Discarding corrupt storage document");
                Ok(Document::new())
            }
            other => other,
        }
    }

    fn save(&self, document: &Document) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StorageError::IoError(e.to_string()))?;
            }
        }

        let json = serde_json::to_string_pretty(document)
            .map_err(|e| StorageError::Corrupt(e.to_string()))?;

        let temp = self.temp_path();
        fs::write(&temp, json).map_err(|e| StorageError::IoError(e.to_string()))?;
        fs::rename(&temp, &self.path).map_err(|e| StorageError::IoError(e.to_string()))
    }

    fn update<F>(&self, apply: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut Document) -> bool,
    {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StorageError::Unavailable("storage lock poisoned".to_string()))?;

        let mut document = self.load_for_update()?;
        if apply(&mut document) {
            self.save(&document)?;
        }
        Ok(())
    }
}

impl SelectionStorage for FileSelectionStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|document| {
            document.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.update(|document| document.remove(key).is_some())
    }
}
