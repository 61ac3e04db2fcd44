//! Storage Adapters
//!
//! Implementations of the SelectionStorage port.
//!
//! ## Available Adapters
//!
//! - **FileSelectionStorage** - Stores keys in a JSON document on disk
//! - **InMemorySelectionStorage** - Stores keys in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileSelectionStorage, InMemorySelectionStorage};
//!
//! // Production: file-based storage
//! let storage = FileSelectionStorage::new("./data/storage.json");
//!
//! // Testing: in-memory storage
//! let storage = InMemorySelectionStorage::new();
//! ```

mod file_selection_storage;
mod in_memory_selection_storage;

pub use file_selection_storage::FileSelectionStorage;
pub use in_memory_selection_storage::InMemorySelectionStorage;
