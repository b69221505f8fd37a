//! Engine error types.

use thiserror::Error;

/// Errors raised when building an engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifeError {
    /// Cycle detection compares against at least one earlier state, so the
    /// history must hold two or more snapshots.
    #[error("history limit must be greater than 1, got {limit}")]
    InvalidHistoryLimit { limit: usize },
}
