//! Error types for the todo store boundary.

use crate::types::TodoId;
use thiserror::Error;

/// Errors surfaced by the todo store operations.
///
/// Every failure is returned to the caller as a typed value after being
/// logged at the point it occurred; nothing is silently swallowed, so
/// callers decide retry policy themselves.
#[derive(Error, Debug)]
pub enum TodoStoreError {
    /// The update target does not exist in the current sequence.
    ///
    /// The sequence is left unchanged.
    #[error("Todo not found: {0}")]
    NotFound(TodoId),

    /// The remote fetch failed (network, status, or non-JSON body).
    ///
    /// The sequence is left unchanged and the loading flag has been reset.
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// Reading or writing the persisted snapshot failed.
    ///
    /// On a failed write the in-memory mutation is kept; the store and the
    /// snapshot are not transactionally linked.
    #[error("Snapshot store failed: {0}")]
    Snapshot(String),

    /// Missing `TODO_API_BASE_URL` environment variable.
    #[error("Missing TODO_API_BASE_URL environment variable")]
    MissingBaseUrl,
}
