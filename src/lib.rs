//! # Todo Store
//!
//! A minimal client-side to-do list state container built on a reducer
//! architecture: an explicit owned state (the ordered todo sequence plus a
//! loading flag), a pure reducer turning actions into state changes and
//! effect descriptions, and a store runtime that executes the effects
//! (snapshot persistence, the remote fetch) and notifies observers.
//!
//! ## Operations
//!
//! - Append a todo with a fresh timestamp id
//! - Patch a todo (title / completed / in-progress, with the two flags
//!   kept mutually exclusive)
//! - Delete a todo, or clear every completed one
//! - Replace the sequence from a remote endpoint
//! - Persist and restore the sequence through a snapshot store
//!
//! Every mutation persists the full sequence as a side effect. All
//! failures surface as typed [`TodoStoreError`] results; callers decide
//! retry policy.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use todo_store::testing::StubApi;
//! use todo_store::{
//!     InMemorySnapshotStore, SystemClock, TodoEnvironment, TodoPatch, TodoStore,
//! };
//!
//! # async fn example() -> Result<(), todo_store::TodoStoreError> {
//! let env = TodoEnvironment::new(
//!     Arc::new(SystemClock),
//!     Arc::new(StubApi::default()),
//!     Arc::new(InMemorySnapshotStore::new()),
//! );
//! let store = TodoStore::with_environment(env);
//!
//! store.add_todo("Buy milk").await?;
//!
//! let id = store.todos().await[0].id;
//! store.update_todo(id, TodoPatch::new().completed(true)).await?;
//! store.clear_completed().await?;
//! # Ok(())
//! # }
//! ```
//!
//! Production stores are built from a [`TodoConfig`] instead, wiring the
//! HTTP client and the JSON snapshot file.

pub mod api;
pub mod config;
pub mod environment;
pub mod error;
pub mod reducer;
pub mod runtime;
pub mod storage;
pub mod store;
pub mod testing;
pub mod types;

// Re-export commonly used types
pub use api::{ApiError, HttpTodoApi, RemoteTodo, TodoApi};
pub use config::TodoConfig;
pub use environment::{Clock, SystemClock, TodoEnvironment};
pub use error::TodoStoreError;
pub use reducer::TodoReducer;
pub use runtime::{Effect, Effects, Reducer, Store};
pub use smallvec::SmallVec;
pub use storage::{InMemorySnapshotStore, JsonFileStore, SnapshotError, SnapshotStore};
pub use store::TodoStore;
pub use types::{Todo, TodoAction, TodoId, TodoPatch, TodoState};
