//! Local snapshot persistence.
//!
//! The store persists the entire sequence wholesale after every mutation
//! and restores it wholesale on demand, the analogue of keeping one
//! JSON-encoded array under a single key-value slot.

use crate::types::Todo;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;

/// Errors that can occur reading or writing snapshots.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// General I/O error.
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Whole-snapshot persistence abstraction.
///
/// Implementations must be `Send + Sync`; the environment holds
/// `Arc<dyn SnapshotStore>` and reducers create effects that capture it.
pub trait SnapshotStore: Send + Sync {
    /// Read the persisted snapshot, if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] when the snapshot exists but cannot be
    /// read or parsed. A missing snapshot is `Ok(None)`, not an error.
    fn load(&self) -> Result<Option<Vec<Todo>>, SnapshotError>;

    /// Replace the persisted snapshot with the given sequence.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] when the snapshot cannot be serialized or
    /// written.
    fn save(&self, todos: &[Todo]) -> Result<(), SnapshotError>;
}

/// Production [`SnapshotStore`] keeping the JSON-encoded sequence in a
/// single file.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store over the given file path. The file is created on the
    /// first save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Result<Option<Vec<Todo>>, SnapshotError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SnapshotError::Io(e.to_string())),
        };

        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|e| SnapshotError::Serialization(e.to_string()))
    }

    fn save(&self, todos: &[Todo]) -> Result<(), SnapshotError> {
        let json = serde_json::to_string(todos)
            .map_err(|e| SnapshotError::Serialization(e.to_string()))?;

        std::fs::write(&self.path, json).map_err(|e| SnapshotError::Io(e.to_string()))
    }
}

/// In-memory [`SnapshotStore`] for tests and demos.
///
/// Holds the serialized snapshot in a single string slot, mirroring the
/// production format.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    slot: Mutex<Option<String>>,
}

impl InMemorySnapshotStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn load(&self) -> Result<Option<Vec<Todo>>, SnapshotError> {
        let slot = self
            .slot
            .lock()
            .map_err(|_| SnapshotError::Io("snapshot slot lock poisoned".to_string()))?;

        match slot.as_deref() {
            None => Ok(None),
            Some(json) => serde_json::from_str(json)
                .map(Some)
                .map_err(|e| SnapshotError::Serialization(e.to_string())),
        }
    }

    fn save(&self, todos: &[Todo]) -> Result<(), SnapshotError> {
        let json = serde_json::to_string(todos)
            .map_err(|e| SnapshotError::Serialization(e.to_string()))?;

        let mut slot = self
            .slot
            .lock()
            .map_err(|_| SnapshotError::Io("snapshot slot lock poisoned".to_string()))?;
        *slot = Some(json);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TodoId;

    fn sample() -> Vec<Todo> {
        vec![
            Todo::new(TodoId::from_millis(1), "A".to_string()),
            Todo::new(TodoId::from_millis(2), "B".to_string()),
        ]
    }

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("todos.json"));

        store.save(&sample()).unwrap();
        let loaded = store.load().unwrap().unwrap();

        assert_eq!(loaded, sample());
    }

    #[test]
    fn file_store_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("absent.json"));

        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn file_store_corrupt_contents_surface_as_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todos.json");
        std::fs::write(&path, "not json").unwrap();

        let store = JsonFileStore::new(path);
        assert!(matches!(
            store.load(),
            Err(SnapshotError::Serialization(_))
        ));
    }

    #[test]
    fn in_memory_store_round_trip() {
        let store = InMemorySnapshotStore::new();
        assert!(store.load().unwrap().is_none());

        store.save(&sample()).unwrap();
        assert_eq!(store.load().unwrap().unwrap(), sample());
    }
}
