//! Injected dependencies for the todo reducer.

use crate::api::TodoApi;
use crate::storage::SnapshotStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Clock trait - abstracts time operations for testability.
///
/// Fresh todo ids are derived from the clock, so tests inject a
/// deterministic implementation.
pub trait Clock: Send + Sync {
    /// Get the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Production [`Clock`] using the system time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Environment dependencies for the todo reducer.
///
/// All external concerns are behind traits: the clock (id assignment), the
/// remote endpoint, and the snapshot store. Production and test
/// implementations are swapped at construction time.
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Clock for assigning fresh ids.
    pub clock: Arc<dyn Clock>,
    /// Remote todo endpoint.
    pub api: Arc<dyn TodoApi>,
    /// Local snapshot persistence.
    pub snapshots: Arc<dyn SnapshotStore>,
}

impl TodoEnvironment {
    /// Creates a new environment from its dependencies.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        api: Arc<dyn TodoApi>,
        snapshots: Arc<dyn SnapshotStore>,
    ) -> Self {
        Self {
            clock,
            api,
            snapshots,
        }
    }
}
