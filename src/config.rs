//! Store configuration.

use crate::error::TodoStoreError;
use std::path::PathBuf;

/// Default snapshot file path when `TODO_SNAPSHOT_PATH` is not set.
const DEFAULT_SNAPSHOT_PATH: &str = "todos.json";

/// Configuration for a production todo store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TodoConfig {
    /// Base URL of the remote endpoint; the todo list is read from
    /// `{api_base_url}/users/1/todos`.
    pub api_base_url: String,
    /// Path of the snapshot file.
    pub snapshot_path: PathBuf,
}

impl TodoConfig {
    /// Creates a configuration from explicit values.
    #[must_use]
    pub fn new(api_base_url: impl Into<String>, snapshot_path: impl Into<PathBuf>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            snapshot_path: snapshot_path.into(),
        }
    }

    /// Creates a configuration from the environment.
    ///
    /// Reads `TODO_API_BASE_URL` (required) and `TODO_SNAPSHOT_PATH`
    /// (optional, defaults to `todos.json`).
    ///
    /// # Errors
    ///
    /// Returns [`TodoStoreError::MissingBaseUrl`] if `TODO_API_BASE_URL` is
    /// not set.
    pub fn from_env() -> Result<Self, TodoStoreError> {
        let api_base_url =
            std::env::var("TODO_API_BASE_URL").map_err(|_| TodoStoreError::MissingBaseUrl)?;

        let snapshot_path = std::env::var_os("TODO_SNAPSHOT_PATH")
            .map_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_PATH), PathBuf::from);

        Ok(Self {
            api_base_url,
            snapshot_path,
        })
    }
}
