//! The store runtime: owns state, dispatches actions, executes effects.

use super::effect::Effect;
use super::reducer::Reducer;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};

/// Default capacity of the action broadcast channel.
const DEFAULT_BROADCAST_CAPACITY: usize = 16;

/// The runtime that manages state and executes effects.
///
/// Stores are constructed explicitly (one per session or test) and handed
/// to consumers; there is no ambient global instance. Cloning a store is
/// cheap and shares the underlying state.
///
/// # Example
///
/// ```ignore
/// let store = Store::new(initial_state, my_reducer, environment);
///
/// store.send(Action::DoSomething).await?;
/// let value = store.state(|s| s.some_field).await;
/// ```
pub struct Store<S, A, E, R> {
    state: Arc<RwLock<S>>,
    reducer: R,
    environment: E,
    action_broadcast: broadcast::Sender<A>,
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
    S: Send + Sync + 'static,
    A: Clone + Send + 'static,
    E: Send + Sync + 'static,
{
    /// Create a new store with initial state, reducer, and environment.
    #[must_use]
    pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
        Self::with_broadcast_capacity(initial_state, reducer, environment, DEFAULT_BROADCAST_CAPACITY)
    }

    /// Create a new store with a custom action broadcast capacity.
    ///
    /// Increase the capacity if observers subscribed via
    /// [`subscribe_actions`](Self::subscribe_actions) frequently lag.
    #[must_use]
    pub fn with_broadcast_capacity(
        initial_state: S,
        reducer: R,
        environment: E,
        capacity: usize,
    ) -> Self {
        let (action_broadcast, _) = broadcast::channel(capacity);

        Self {
            state: Arc::new(RwLock::new(initial_state)),
            reducer,
            environment,
            action_broadcast,
        }
    }

    /// Send an action through the reducer and run its effects to completion.
    ///
    /// Effects are awaited in-line; a future effect resolving to a feedback
    /// action re-enters the reducer before `send` returns. Every
    /// successfully processed action (sent or fed back) is broadcast to
    /// observers.
    ///
    /// # Errors
    ///
    /// Propagates the reducer's typed error, both for the action itself and
    /// for any feedback action produced by its effects. State changes the
    /// reducer made before erroring are kept.
    #[tracing::instrument(skip(self, action), name = "store_send")]
    pub async fn send(&self, action: A) -> Result<(), R::Error> {
        let mut pending = VecDeque::new();
        pending.push_back(action);

        while let Some(action) = pending.pop_front() {
            let effects = {
                let mut state = self.state.write().await;
                self.reducer
                    .reduce(&mut state, action.clone(), &self.environment)?
            };
            tracing::trace!(effects = effects.len(), "reducer completed");

            // Change notification; send fails only when nobody listens.
            let _ = self.action_broadcast.send(action);

            for effect in effects {
                match effect {
                    Effect::None => {}
                    Effect::Future(future) => {
                        if let Some(feedback) = future.await {
                            pending.push_back(feedback);
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Read state through a projection function.
    ///
    /// Holds the read lock only for the duration of the closure.
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let state = self.state.read().await;
        f(&state)
    }

    /// Subscribe to all actions processed by this store.
    ///
    /// Returns a receiver that gets a clone of every action the reducer
    /// accepted, in processing order. If the receiver lags it skips old
    /// actions and observes a `Lagged` error.
    #[must_use]
    pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
        self.action_broadcast.subscribe()
    }
}

impl<S, A, E, R> Clone for Store<S, A, E, R>
where
    R: Clone,
    E: Clone,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            reducer: self.reducer.clone(),
            environment: self.environment.clone(),
            action_broadcast: self.action_broadcast.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::effect::Effects;
    use smallvec::smallvec;

    #[derive(Clone, Debug, Default)]
    struct CounterState {
        count: i32,
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    enum CounterAction {
        Increment,
        IncrementLater,
        Reject,
    }

    #[derive(Clone)]
    struct CounterReducer;

    impl Reducer for CounterReducer {
        type State = CounterState;
        type Action = CounterAction;
        type Environment = ();
        type Error = String;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> Result<Effects<Self::Action>, Self::Error> {
            match action {
                CounterAction::Increment => {
                    state.count += 1;
                    Ok(Effects::new())
                }
                CounterAction::IncrementLater => {
                    Ok(smallvec![Effect::future(async {
                        Some(CounterAction::Increment)
                    })])
                }
                CounterAction::Reject => Err("rejected".to_string()),
            }
        }
    }

    #[tokio::test]
    async fn send_applies_state_change() {
        let store = Store::new(CounterState::default(), CounterReducer, ());
        store.send(CounterAction::Increment).await.unwrap();
        assert_eq!(store.state(|s| s.count).await, 1);
    }

    #[tokio::test]
    async fn feedback_actions_re_enter_the_reducer() {
        let store = Store::new(CounterState::default(), CounterReducer, ());
        store.send(CounterAction::IncrementLater).await.unwrap();
        assert_eq!(store.state(|s| s.count).await, 1);
    }

    #[tokio::test]
    async fn reducer_errors_propagate() {
        let store = Store::new(CounterState::default(), CounterReducer, ());
        let result = store.send(CounterAction::Reject).await;
        assert_eq!(result, Err("rejected".to_string()));
        assert_eq!(store.state(|s| s.count).await, 0);
    }

    #[tokio::test]
    async fn observers_see_processed_actions() {
        let store = Store::new(CounterState::default(), CounterReducer, ());
        let mut rx = store.subscribe_actions();

        store.send(CounterAction::IncrementLater).await.unwrap();

        assert_eq!(rx.recv().await.unwrap(), CounterAction::IncrementLater);
        assert_eq!(rx.recv().await.unwrap(), CounterAction::Increment);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = Store::new(CounterState::default(), CounterReducer, ());
        let clone = store.clone();
        store.send(CounterAction::Increment).await.unwrap();
        assert_eq!(clone.state(|s| s.count).await, 1);
    }
}
