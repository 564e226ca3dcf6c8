//! Reducer logic for the todo container.
//!
//! Commands mutate the sequence in place and describe their side effects
//! (snapshot writes, the remote fetch, the snapshot read) as effect values;
//! the store runtime executes them and feeds outcome actions back in here.

use crate::environment::TodoEnvironment;
use crate::error::TodoStoreError;
use crate::runtime::{Effect, Effects, Reducer};
use crate::types::{Todo, TodoAction, TodoId, TodoState};
use smallvec::smallvec;
use std::sync::Arc;

/// Reducer for the todo container.
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Effect: write the given snapshot of the sequence.
    ///
    /// The snapshot is taken when the effect is built, so a concurrent
    /// mutation between reduce and execution cannot change what is written.
    fn persist(state: &TodoState, env: &TodoEnvironment) -> Effect<TodoAction> {
        let snapshots = Arc::clone(&env.snapshots);
        let todos = state.todos.clone();
        Effect::future(async move {
            match snapshots.save(&todos) {
                Ok(()) => None,
                Err(error) => {
                    tracing::warn!(%error, "failed to persist snapshot");
                    Some(TodoAction::PersistFailed {
                        reason: error.to_string(),
                    })
                }
            }
        })
    }

    /// Effect: fetch the remote list and feed the outcome back.
    fn fetch(env: &TodoEnvironment) -> Effect<TodoAction> {
        let api = Arc::clone(&env.api);
        Effect::future(async move {
            match api.fetch_todos().await {
                Ok(records) => Some(TodoAction::FetchSucceeded {
                    todos: records.into_iter().map(crate::api::RemoteTodo::into_todo).collect(),
                }),
                Err(error) => {
                    tracing::warn!(%error, "remote fetch failed");
                    Some(TodoAction::FetchFailed {
                        reason: error.to_string(),
                    })
                }
            }
        })
    }

    /// Effect: read the persisted snapshot and feed it back, if present.
    fn load_snapshot(env: &TodoEnvironment) -> Effect<TodoAction> {
        let snapshots = Arc::clone(&env.snapshots);
        Effect::future(async move {
            match snapshots.load() {
                Ok(Some(todos)) => Some(TodoAction::SnapshotLoaded { todos }),
                Ok(None) => {
                    tracing::debug!("no persisted snapshot, sequence unchanged");
                    None
                }
                Err(error) => {
                    tracing::warn!(%error, "failed to load snapshot");
                    Some(TodoAction::SnapshotLoadFailed {
                        reason: error.to_string(),
                    })
                }
            }
        })
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;
    type Error = TodoStoreError;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Result<Effects<Self::Action>, Self::Error> {
        match action {
            // ========== Commands ==========
            TodoAction::Add { title } => {
                let id = TodoId::from_millis(env.clock.now().timestamp_millis());
                state.todos.push(Todo::new(id, title));
                Ok(smallvec![Self::persist(state, env)])
            }

            TodoAction::Update { id, patch } => {
                let Some(todo) = state.todos.iter_mut().find(|t| t.id == id) else {
                    tracing::warn!(%id, "update target not found");
                    return Err(TodoStoreError::NotFound(id));
                };

                todo.apply(&patch);
                Ok(smallvec![Self::persist(state, env)])
            }

            TodoAction::Delete { id } => {
                let before = state.todos.len();
                state.todos.retain(|t| t.id != id);

                if state.todos.len() == before {
                    tracing::debug!(%id, "delete target not found, sequence unchanged");
                    return Ok(Effects::new());
                }
                Ok(smallvec![Self::persist(state, env)])
            }

            TodoAction::ClearCompleted => {
                state.todos.retain(|t| !t.completed);
                Ok(smallvec![Self::persist(state, env)])
            }

            TodoAction::Fetch => {
                state.loading = true;
                Ok(smallvec![Self::fetch(env)])
            }

            TodoAction::LoadSnapshot => Ok(smallvec![Self::load_snapshot(env)]),

            // ========== Effect feedback ==========
            TodoAction::FetchSucceeded { todos } => {
                state.todos = todos;
                state.loading = false;
                Ok(smallvec![Self::persist(state, env)])
            }

            TodoAction::FetchFailed { reason } => {
                // Sequence untouched; only the in-flight flag is reset.
                state.loading = false;
                Err(TodoStoreError::Fetch(reason))
            }

            TodoAction::SnapshotLoaded { todos } => {
                // Restoring does not re-persist what was just read.
                state.todos = todos;
                Ok(Effects::new())
            }

            TodoAction::SnapshotLoadFailed { reason } => Err(TodoStoreError::Snapshot(reason)),

            TodoAction::PersistFailed { reason } => Err(TodoStoreError::Snapshot(reason)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemorySnapshotStore;
    use crate::testing::{FixedClock, ReducerTest, SteppingClock, StubApi, assertions};
    use crate::types::TodoPatch;

    fn env_with_clock(clock: Arc<dyn crate::environment::Clock>) -> TodoEnvironment {
        TodoEnvironment::new(
            clock,
            Arc::new(StubApi::default()),
            Arc::new(InMemorySnapshotStore::new()),
        )
    }

    fn test_env() -> TodoEnvironment {
        env_with_clock(Arc::new(SteppingClock::starting_at(1_000)))
    }

    fn todo(id: i64, title: &str) -> Todo {
        Todo::new(TodoId::from_millis(id), title.to_string())
    }

    #[test]
    fn add_assigns_clock_millis_id() {
        ReducerTest::new(TodoReducer::new())
            .with_env(env_with_clock(Arc::new(FixedClock::at_millis(42_000))))
            .given_state(TodoState::new())
            .when_action(TodoAction::Add {
                title: "Buy milk".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.count(), 1);
                assert_eq!(state.todos[0].id, TodoId::from_millis(42_000));
                assert_eq!(state.todos[0].title, "Buy milk");
                assert!(!state.todos[0].completed);
                assert!(!state.todos[0].in_progress);
            })
            .then_effects(|effects| assertions::assert_effects_count(effects, 1))
            .run();
    }

    #[test]
    fn add_appends_in_call_order() {
        let env = test_env();
        let mut state = TodoState::new();
        let reducer = TodoReducer::new();

        for title in ["A", "B", "C"] {
            reducer
                .reduce(
                    &mut state,
                    TodoAction::Add {
                        title: title.to_string(),
                    },
                    &env,
                )
                .unwrap();
        }

        let titles: Vec<_> = state.todos.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["A", "B", "C"]);
        assert!(state.todos.iter().all(|t| !t.completed));
    }

    #[test]
    fn update_completed_clears_in_progress() {
        let mut existing = todo(1, "Write docs");
        existing.in_progress = true;

        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(TodoState {
                todos: vec![existing],
                loading: false,
            })
            .when_action(TodoAction::Update {
                id: TodoId::from_millis(1),
                patch: TodoPatch::new().completed(true),
            })
            .then_state(|state| {
                assert!(state.todos[0].completed);
                assert!(!state.todos[0].in_progress);
            })
            .then_effects(|effects| assertions::assert_effects_count(effects, 1))
            .run();
    }

    #[test]
    fn update_with_both_flags_ends_in_progress() {
        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(TodoState {
                todos: vec![todo(1, "Ambiguous")],
                loading: false,
            })
            .when_action(TodoAction::Update {
                id: TodoId::from_millis(1),
                patch: TodoPatch::new().completed(true).in_progress(true),
            })
            .then_state(|state| {
                assert!(state.todos[0].in_progress);
                assert!(!state.todos[0].completed);
            })
            .run();
    }

    #[test]
    fn update_missing_id_is_not_found() {
        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(TodoState {
                todos: vec![todo(1, "Only one")],
                loading: false,
            })
            .when_action(TodoAction::Update {
                id: TodoId::from_millis(9),
                patch: TodoPatch::new().title("Renamed"),
            })
            .then_state(|state| {
                // Sequence untouched
                assert_eq!(state.todos[0].title, "Only one");
            })
            .then_error(|error| {
                assert!(matches!(error, TodoStoreError::NotFound(id) if id.as_i64() == 9));
            })
            .run();
    }

    #[test]
    fn delete_removes_exactly_the_matching_entry() {
        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(TodoState {
                todos: vec![todo(1, "Keep"), todo(2, "Drop"), todo(3, "Keep too")],
                loading: false,
            })
            .when_action(TodoAction::Delete {
                id: TodoId::from_millis(2),
            })
            .then_state(|state| {
                let titles: Vec<_> = state.todos.iter().map(|t| t.title.as_str()).collect();
                assert_eq!(titles, ["Keep", "Keep too"]);
            })
            .then_effects(|effects| assertions::assert_effects_count(effects, 1))
            .run();
    }

    #[test]
    fn delete_absent_id_is_a_noop() {
        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(TodoState {
                todos: vec![todo(1, "Survivor")],
                loading: false,
            })
            .when_action(TodoAction::Delete {
                id: TodoId::from_millis(9),
            })
            .then_state(|state| assert_eq!(state.count(), 1))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn clear_completed_removes_all_and_only_completed() {
        let mut done = todo(2, "Done");
        done.completed = true;
        let mut also_done = todo(4, "Also done");
        also_done.completed = true;

        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(TodoState {
                todos: vec![todo(1, "Open"), done, todo(3, "Open too"), also_done],
                loading: false,
            })
            .when_action(TodoAction::ClearCompleted)
            .then_state(|state| {
                let titles: Vec<_> = state.todos.iter().map(|t| t.title.as_str()).collect();
                assert_eq!(titles, ["Open", "Open too"]);
            })
            .then_effects(|effects| assertions::assert_effects_count(effects, 1))
            .run();
    }

    #[test]
    fn fetch_sets_loading_and_describes_the_request() {
        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(TodoState::new())
            .when_action(TodoAction::Fetch)
            .then_state(|state| assert!(state.loading))
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }

    #[test]
    fn fetch_succeeded_replaces_sequence_and_persists() {
        let fetched = vec![todo(10, "Remote A"), todo(11, "Remote B")];

        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(TodoState {
                todos: vec![todo(1, "Local")],
                loading: true,
            })
            .when_action(TodoAction::FetchSucceeded {
                todos: fetched.clone(),
            })
            .then_state(move |state| {
                assert_eq!(state.todos, fetched);
                assert!(!state.loading);
            })
            .then_effects(|effects| assertions::assert_effects_count(effects, 1))
            .run();
    }

    #[test]
    fn fetch_failed_resets_loading_and_keeps_sequence() {
        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(TodoState {
                todos: vec![todo(1, "Local")],
                loading: true,
            })
            .when_action(TodoAction::FetchFailed {
                reason: "connection refused".to_string(),
            })
            .then_state(|state| {
                assert!(!state.loading);
                assert_eq!(state.count(), 1);
            })
            .then_error(|error| {
                assert!(matches!(error, TodoStoreError::Fetch(_)));
            })
            .run();
    }

    #[test]
    fn snapshot_loaded_replaces_sequence_without_persisting() {
        let restored = vec![todo(5, "Restored")];

        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(TodoState {
                todos: vec![todo(1, "Stale")],
                loading: false,
            })
            .when_action(TodoAction::SnapshotLoaded {
                todos: restored.clone(),
            })
            .then_state(move |state| assert_eq!(state.todos, restored))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn persist_failure_surfaces_as_snapshot_error() {
        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(TodoState::new())
            .when_action(TodoAction::PersistFailed {
                reason: "disk full".to_string(),
            })
            .then_error(|error| {
                assert!(matches!(error, TodoStoreError::Snapshot(_)));
            })
            .run();
    }
}
