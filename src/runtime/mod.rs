//! Generic store runtime: reducer trait, effect descriptions, and the
//! `Store` that coordinates them.
//!
//! The architecture is unidirectional: callers send actions, a pure reducer
//! turns them into state changes plus effect descriptions, and the store
//! executes the effects, feeding any resulting actions back into the
//! reducer. Side effects are values returned by the reducer, never hidden
//! I/O inside it.

pub mod effect;
pub mod reducer;
pub mod store;

pub use effect::{Effect, Effects};
pub use reducer::Reducer;
pub use store::Store;
