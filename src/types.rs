//! Domain types for the todo state container.
//!
//! The container holds an ordered sequence of [`Todo`] records plus a
//! loading flag. Sequence order is insertion/fetch order; nothing sorts it.

use serde::{Deserialize, Serialize};

/// Unique identifier for a todo item.
///
/// Fresh ids are the creation timestamp in epoch milliseconds taken from the
/// injected clock. Two creations inside the same millisecond therefore
/// collide; this is an accepted limitation of the id scheme, not a guarded
/// invariant. Ids loaded from the remote endpoint are taken verbatim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(i64);

impl TodoId {
    /// Creates an id from an epoch-millisecond timestamp.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the raw id value.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo item.
///
/// Serialized with camelCase field names, so snapshots carry
/// `{"id", "title", "completed", "inProgress"}` records; `inProgress`
/// defaults to false when absent from a payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Unique identifier.
    pub id: TodoId,
    /// Title/description of the todo.
    pub title: String,
    /// Whether the todo is completed.
    pub completed: bool,
    /// Whether the todo is currently being worked on.
    #[serde(default)]
    pub in_progress: bool,
}

impl Todo {
    /// Creates a new todo, not completed and not in progress.
    #[must_use]
    pub const fn new(id: TodoId, title: String) -> Self {
        Self {
            id,
            title,
            completed: false,
            in_progress: false,
        }
    }

    /// Applies the present fields of a patch.
    ///
    /// `completed` and `in_progress` are intended to be mutually exclusive:
    /// fields are applied in the order `title`, `completed`, `in_progress`,
    /// and setting either flag true clears the other. A patch setting both
    /// flags true therefore ends with `in_progress == true` and
    /// `completed == false`.
    pub fn apply(&mut self, patch: &TodoPatch) {
        if let Some(title) = &patch.title {
            self.title.clone_from(title);
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
            if self.completed {
                self.in_progress = false;
            }
        }
        if let Some(in_progress) = patch.in_progress {
            self.in_progress = in_progress;
            if self.in_progress {
                self.completed = false;
            }
        }
    }
}

/// A partial update for a single todo; absent fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoPatch {
    /// New title, if present.
    pub title: Option<String>,
    /// New completed flag, if present.
    pub completed: Option<bool>,
    /// New in-progress flag, if present.
    pub in_progress: Option<bool>,
}

impl TodoPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title field.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the completed field.
    #[must_use]
    pub const fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Sets the in-progress field.
    #[must_use]
    pub const fn in_progress(mut self, in_progress: bool) -> Self {
        self.in_progress = Some(in_progress);
        self
    }
}

/// State of the todo container: the ordered sequence plus a loading flag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoState {
    /// All todos, in insertion/fetch order.
    pub todos: Vec<Todo>,
    /// Whether a remote fetch is in flight.
    pub loading: bool,
}

impl TodoState {
    /// Creates a new empty state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            todos: Vec::new(),
            loading: false,
        }
    }

    /// Returns the number of todos.
    #[must_use]
    pub fn count(&self) -> usize {
        self.todos.len()
    }

    /// Returns the number of completed todos.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.completed).count()
    }

    /// Returns the todo with the given id, if present. Linear scan.
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    /// Checks whether a todo with the given id exists.
    #[must_use]
    pub fn exists(&self, id: TodoId) -> bool {
        self.get(id).is_some()
    }
}

/// Actions processed by the todo reducer.
///
/// Commands express caller intent; the remaining variants are feedback
/// produced by effects (fetch outcome, snapshot outcome, persistence
/// outcome) and are fed back into the reducer by the store runtime.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoAction {
    /// Command: append a new todo with the given title.
    Add {
        /// Title of the new todo.
        title: String,
    },

    /// Command: patch the todo with the given id.
    Update {
        /// Todo to update.
        id: TodoId,
        /// Fields to apply.
        patch: TodoPatch,
    },

    /// Command: remove the todo with the given id. No-op if absent.
    Delete {
        /// Todo to delete.
        id: TodoId,
    },

    /// Command: remove every completed todo.
    ClearCompleted,

    /// Command: replace the sequence from the remote endpoint.
    Fetch,

    /// Command: replace the sequence from the persisted snapshot.
    LoadSnapshot,

    /// Feedback: the remote fetch succeeded.
    FetchSucceeded {
        /// Mapped remote records, in payload order.
        todos: Vec<Todo>,
    },

    /// Feedback: the remote fetch failed.
    FetchFailed {
        /// Description of the failure.
        reason: String,
    },

    /// Feedback: a persisted snapshot was found and parsed.
    SnapshotLoaded {
        /// Snapshot contents, taken verbatim.
        todos: Vec<Todo>,
    },

    /// Feedback: reading the persisted snapshot failed.
    SnapshotLoadFailed {
        /// Description of the failure.
        reason: String,
    },

    /// Feedback: writing the snapshot after a mutation failed.
    PersistFailed {
        /// Description of the failure.
        reason: String,
    },
}
