//! The reducer trait: pure business logic over owned state.

use super::effect::Effects;

/// Core abstraction for business logic.
///
/// A reducer is a pure function `(State, Action, Environment) ->
/// Result<Effects, Error>`:
///
/// 1. It validates the action against the current state.
/// 2. It updates state in place.
/// 3. It returns descriptions of side effects for the runtime to execute.
///
/// Validation failures are typed errors returned to the caller; state
/// changes made before an error are kept (a reducer that wants untouched
/// state on failure validates before mutating).
pub trait Reducer {
    /// The state type this reducer operates on.
    type State;

    /// The action type this reducer processes.
    type Action;

    /// The environment type with injected dependencies.
    type Environment;

    /// The error type surfaced to callers.
    type Error;

    /// Reduce an action into state changes and effects.
    ///
    /// # Errors
    ///
    /// Returns `Self::Error` when the action cannot be applied (for
    /// example, a target that does not exist) or when a feedback action
    /// reports a failed effect.
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Result<Effects<Self::Action>, Self::Error>;
}
