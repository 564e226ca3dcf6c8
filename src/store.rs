//! The todo store: the concrete runtime instantiation plus the operation
//! surface callers use.

use crate::api::HttpTodoApi;
use crate::config::TodoConfig;
use crate::environment::{SystemClock, TodoEnvironment};
use crate::error::TodoStoreError;
use crate::reducer::TodoReducer;
use crate::runtime::Store;
use crate::storage::JsonFileStore;
use crate::types::{Todo, TodoAction, TodoId, TodoPatch, TodoState};
use std::sync::Arc;

/// A todo list state container.
///
/// Holds the ordered sequence and the loading flag behind the store
/// runtime; every mutating operation persists the full sequence to the
/// snapshot store as a side effect. Construct one per session or test via
/// [`with_environment`](Self::with_environment) or
/// [`from_config`](Self::from_config) — there is no ambient instance.
pub type TodoStore = Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;

impl TodoStore {
    /// Creates an empty store over the given environment.
    #[must_use]
    pub fn with_environment(environment: TodoEnvironment) -> Self {
        Self::new(TodoState::new(), TodoReducer::new(), environment)
    }

    /// Creates an empty store with production dependencies: the system
    /// clock, the HTTP client against the configured base URL, and the
    /// JSON snapshot file at the configured path.
    #[must_use]
    pub fn from_config(config: &TodoConfig) -> Self {
        Self::with_environment(TodoEnvironment::new(
            Arc::new(SystemClock),
            Arc::new(HttpTodoApi::new(config.api_base_url.clone())),
            Arc::new(JsonFileStore::new(config.snapshot_path.clone())),
        ))
    }

    /// Appends a new todo with a fresh id, neither completed nor in
    /// progress, and persists the sequence.
    ///
    /// # Errors
    ///
    /// Returns [`TodoStoreError::Snapshot`] if persisting fails; the
    /// in-memory append is kept.
    pub async fn add_todo(&self, title: impl Into<String>) -> Result<(), TodoStoreError> {
        self.send(TodoAction::Add {
            title: title.into(),
        })
        .await
    }

    /// Applies the present fields of `patch` to the todo with the given id
    /// and persists the sequence.
    ///
    /// # Errors
    ///
    /// Returns [`TodoStoreError::NotFound`] if no todo has that id (the
    /// sequence is left unchanged) and [`TodoStoreError::Snapshot`] if
    /// persisting fails.
    pub async fn update_todo(&self, id: TodoId, patch: TodoPatch) -> Result<(), TodoStoreError> {
        self.send(TodoAction::Update { id, patch }).await
    }

    /// Removes the todo with the given id and persists the sequence.
    /// A no-op when the id is absent.
    ///
    /// # Errors
    ///
    /// Returns [`TodoStoreError::Snapshot`] if persisting fails.
    pub async fn delete_todo(&self, id: TodoId) -> Result<(), TodoStoreError> {
        self.send(TodoAction::Delete { id }).await
    }

    /// Removes every completed todo and persists the sequence.
    ///
    /// # Errors
    ///
    /// Returns [`TodoStoreError::Snapshot`] if persisting fails.
    pub async fn clear_completed(&self) -> Result<(), TodoStoreError> {
        self.send(TodoAction::ClearCompleted).await
    }

    /// Replaces the sequence with the remote todo list and persists it.
    ///
    /// The loading flag is set for the duration of the request and reset
    /// on every path. Overlapping fetches are not coordinated; the later
    /// response wins.
    ///
    /// # Errors
    ///
    /// Returns [`TodoStoreError::Fetch`] on any request, status, or parse
    /// failure; the sequence is left unchanged.
    pub async fn fetch_todos(&self) -> Result<(), TodoStoreError> {
        self.send(TodoAction::Fetch).await
    }

    /// Replaces the sequence with the persisted snapshot, verbatim. No
    /// change when no snapshot exists; loading does not re-persist.
    ///
    /// # Errors
    ///
    /// Returns [`TodoStoreError::Snapshot`] when a snapshot exists but
    /// cannot be read or parsed.
    pub async fn load_from_snapshot(&self) -> Result<(), TodoStoreError> {
        self.send(TodoAction::LoadSnapshot).await
    }

    /// Returns a clone of the current sequence, in order.
    pub async fn todos(&self) -> Vec<Todo> {
        self.state(|s| s.todos.clone()).await
    }

    /// Returns whether a remote fetch is in flight.
    pub async fn is_loading(&self) -> bool {
        self.state(|s| s.loading).await
    }
}
