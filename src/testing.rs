//! Test support: a Given-When-Then reducer harness, effect assertions, and
//! deterministic environment implementations.
//!
//! These types back both the crate's own tests and downstream tests that
//! construct stores with controlled dependencies.

#![allow(clippy::module_name_repetitions)]

use crate::api::{ApiError, RemoteTodo, TodoApi};
use crate::environment::Clock;
use crate::runtime::{Effect, Reducer};
use chrono::{DateTime, TimeZone, Utc};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicI64, Ordering};

/// Type alias for state assertion functions.
type StateAssertion<S> = Box<dyn FnOnce(&S)>;

/// Type alias for effect assertion functions.
type EffectAssertion<A> = Box<dyn FnOnce(&[Effect<A>])>;

/// Type alias for error assertion functions.
type ErrorAssertion<Err> = Box<dyn FnOnce(&Err)>;

/// Fluent API for testing reducers with Given-When-Then syntax.
///
/// # Example
///
/// ```ignore
/// ReducerTest::new(TodoReducer::new())
///     .with_env(test_environment())
///     .given_state(TodoState::new())
///     .when_action(TodoAction::Add { title: "Buy milk".to_string() })
///     .then_state(|state| assert_eq!(state.count(), 1))
///     .then_effects(|effects| assertions::assert_effects_count(effects, 1))
///     .run();
/// ```
///
/// When the reducer is expected to reject the action, assert on the typed
/// error instead with [`then_error`](Self::then_error).
pub struct ReducerTest<R, S, A, E, Err>
where
    R: Reducer<State = S, Action = A, Environment = E, Error = Err>,
{
    reducer: R,
    environment: Option<E>,
    initial_state: Option<S>,
    action: Option<A>,
    state_assertions: Vec<StateAssertion<S>>,
    effect_assertions: Vec<EffectAssertion<A>>,
    error_assertion: Option<ErrorAssertion<Err>>,
}

impl<R, S, A, E, Err> ReducerTest<R, S, A, E, Err>
where
    R: Reducer<State = S, Action = A, Environment = E, Error = Err>,
    Err: std::fmt::Debug,
{
    /// Create a new reducer test with the given reducer.
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            initial_state: None,
            action: None,
            state_assertions: Vec::new(),
            effect_assertions: Vec::new(),
            error_assertion: None,
        }
    }

    /// Set the environment for the test.
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.environment = Some(env);
        self
    }

    /// Set the initial state (Given).
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Set the action to test (When).
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.action = Some(action);
        self
    }

    /// Add an assertion about the resulting state (Then).
    ///
    /// State assertions run on both outcomes; reducers may legitimately
    /// change state and return an error (resetting a flag, for instance).
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the resulting effects (Then).
    #[must_use]
    pub fn then_effects<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&[Effect<A>]) + 'static,
    {
        self.effect_assertions.push(Box::new(assertion));
        self
    }

    /// Expect the reducer to return an error and assert on it (Then).
    #[must_use]
    pub fn then_error<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&Err) + 'static,
    {
        self.error_assertion = Some(Box::new(assertion));
        self
    }

    /// Run the test and execute all assertions.
    ///
    /// # Panics
    ///
    /// Panics if initial state, action, or environment is not set, if the
    /// reducer outcome (Ok/Err) does not match the registered assertions,
    /// or if any assertion fails.
    #[allow(clippy::panic)] // Test code can panic
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) {
        let mut state = self
            .initial_state
            .expect("Initial state must be set with given_state()");

        let action = self.action.expect("Action must be set with when_action()");

        let env = self
            .environment
            .expect("Environment must be set with with_env()");

        let outcome = self.reducer.reduce(&mut state, action, &env);

        for assertion in self.state_assertions {
            assertion(&state);
        }

        match (outcome, self.error_assertion) {
            (Ok(effects), None) => {
                for assertion in self.effect_assertions {
                    assertion(&effects);
                }
            }
            (Ok(_), Some(_)) => {
                panic!("Expected the reducer to return an error, but it succeeded")
            }
            (Err(error), Some(assertion)) => assertion(&error),
            (Err(error), None) => {
                panic!("Reducer returned an unexpected error: {error:?}")
            }
        }
    }
}

/// Helper assertions for effects.
pub mod assertions {
    use crate::runtime::Effect;

    /// Assert that there are no effects.
    ///
    /// # Panics
    ///
    /// Panics if effects is not empty.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_no_effects<A: std::fmt::Debug>(effects: &[Effect<A>]) {
        assert!(
            effects.is_empty() || matches!(effects, [Effect::None]),
            "Expected no effects, but found {}: {:?}",
            effects.len(),
            effects
        );
    }

    /// Assert the number of effects.
    ///
    /// # Panics
    ///
    /// Panics if the number of effects doesn't match expected.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_effects_count<A>(effects: &[Effect<A>], expected: usize) {
        assert_eq!(
            effects.len(),
            expected,
            "Expected {} effects, but found {}",
            expected,
            effects.len()
        );
    }

    /// Assert that effects contain at least one Future effect.
    ///
    /// # Panics
    ///
    /// Panics if no Future effect is found.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_has_future_effect<A>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().any(|e| matches!(e, Effect::Future(_))),
            "Expected at least one Future effect, but none found"
        );
    }
}

/// Deterministic [`Clock`] returning a fixed instant.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock {
    time: DateTime<Utc>,
}

impl FixedClock {
    /// Creates a clock pinned to the given instant.
    #[must_use]
    pub const fn at(time: DateTime<Utc>) -> Self {
        Self { time }
    }

    /// Creates a clock pinned to the given epoch-millisecond timestamp.
    ///
    /// # Panics
    ///
    /// Panics if `millis` is outside the representable date range.
    #[allow(clippy::unwrap_used)] // Test helper with caller-controlled input
    #[must_use]
    pub fn at_millis(millis: i64) -> Self {
        Self {
            time: Utc.timestamp_millis_opt(millis).single().unwrap(),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.time
    }
}

/// Deterministic [`Clock`] advancing one millisecond per reading.
///
/// Fresh todo ids come from the clock in milliseconds, so tests that create
/// several todos use this to keep ids unique and predictable.
#[derive(Debug)]
pub struct SteppingClock {
    next_millis: AtomicI64,
}

impl SteppingClock {
    /// Creates a clock whose first reading is the given timestamp.
    #[must_use]
    pub const fn starting_at(millis: i64) -> Self {
        Self {
            next_millis: AtomicI64::new(millis),
        }
    }
}

impl Clock for SteppingClock {
    #[allow(clippy::unwrap_used)] // Test helper with caller-controlled range
    fn now(&self) -> DateTime<Utc> {
        let millis = self.next_millis.fetch_add(1, Ordering::Relaxed);
        Utc.timestamp_millis_opt(millis).single().unwrap()
    }
}

/// [`TodoApi`] stub serving a canned payload.
#[derive(Clone, Debug, Default)]
pub struct StubApi {
    /// Records returned by every fetch.
    pub todos: Vec<RemoteTodo>,
}

impl StubApi {
    /// Creates a stub serving the given records.
    #[must_use]
    pub fn serving(todos: Vec<RemoteTodo>) -> Self {
        Self { todos }
    }
}

impl TodoApi for StubApi {
    fn fetch_todos(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RemoteTodo>, ApiError>> + Send + '_>> {
        let todos = self.todos.clone();
        Box::pin(async move { Ok(todos) })
    }
}

/// [`TodoApi`] stub failing every fetch.
#[derive(Clone, Debug)]
pub struct FailingApi {
    /// Message carried by the request failure.
    pub message: String,
}

impl FailingApi {
    /// Creates a stub failing with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl TodoApi for FailingApi {
    fn fetch_todos(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RemoteTodo>, ApiError>> + Send + '_>> {
        let message = self.message.clone();
        Box::pin(async move { Err(ApiError::RequestFailed(message)) })
    }
}
