//! Side effect descriptions returned by reducers.

use smallvec::SmallVec;
use std::future::Future;
use std::pin::Pin;

/// The effect list returned by a reducer. Most actions produce at most one
/// effect, so the list lives inline.
pub type Effects<A> = SmallVec<[Effect<A>; 4]>;

/// A side effect to be executed by the store runtime.
///
/// Effects are not executed when created. They are descriptions of what
/// should happen, returned from reducers and executed by the [`Store`]
/// after the reducer has run. A future effect may resolve to a feedback
/// action, which is dispatched back through the reducer.
///
/// [`Store`]: crate::runtime::Store
pub enum Effect<A> {
    /// No-op effect.
    None,

    /// Arbitrary async computation.
    ///
    /// Resolves to `Option<A>`; if `Some`, the action is fed back into the
    /// reducer. Dependencies the computation needs are captured from the
    /// environment when the reducer builds the effect.
    Future(Pin<Box<dyn Future<Output = Option<A>> + Send>>),
}

impl<A> Effect<A> {
    /// Boxes a future as an effect.
    pub fn future<F>(future: F) -> Self
    where
        F: Future<Output = Option<A>> + Send + 'static,
    {
        Self::Future(Box::pin(future))
    }
}

// Manual Debug implementation since Future doesn't implement Debug
impl<A> std::fmt::Debug for Effect<A>
where
    A: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "Effect::None"),
            Self::Future(_) => write!(f, "Effect::Future(<future>)"),
        }
    }
}
