//! Named blob stores.
//!
//! State is persisted as whole named blobs (last writer wins, no locking).
//! The trait is the injection seam: the engine and auth store take any
//! implementation, so tests run against [`MemoryStore`] while the CLI uses
//! [`JsonFileStore`] under the data directory.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::StorageError;
use crate::storage::data_dir;

/// Load/save access to named state blobs.
pub trait StateStore {
    /// Read a blob. `Ok(None)` means the blob has never been written.
    fn load(&self, name: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Write a blob, replacing any previous content.
    fn save(&self, name: &str, bytes: &[u8]) -> Result<(), StorageError>;
}

/// File-backed store writing one `<name>.json` per blob.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Store rooted at the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        JsonFileStore { dir: dir.into() }
    }

    /// Store rooted at the user data directory.
    pub fn open_default() -> Result<Self, StorageError> {
        Ok(Self::new(data_dir()?))
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }
}

impl StateStore for JsonFileStore {
    fn load(&self, name: &str) -> Result<Option<Vec<u8>>, StorageError> {
        match std::fs::read(self.file_path(name)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::ReadFailed {
                name: name.to_string(),
                source,
            }),
        }
    }

    fn save(&self, name: &str, bytes: &[u8]) -> Result<(), StorageError> {
        std::fs::write(self.file_path(name), bytes).map_err(|source| {
            StorageError::WriteFailed {
                name: name.to_string(),
                source,
            }
        })
    }
}

/// In-memory store for tests and ephemeral sessions.
///
/// Clones share the same underlying map, so a test can keep a handle while
/// handing another to an engine.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blobs: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a blob with this name has been written.
    pub fn contains(&self, name: &str) -> bool {
        self.blobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }
}

impl StateStore for MemoryStore {
    fn load(&self, name: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self
            .blobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned())
    }

    fn save(&self, name: &str, bytes: &[u8]) -> Result<(), StorageError> {
        self.blobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), bytes.to_vec());
        Ok(())
    }
}
