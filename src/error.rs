//! Engine Errors
//!
//! Every failure of a search is a value, never a panic. The three variants are
//! deterministic in the input: re-running with the same configuration
//! reproduces the same error, so nothing here is retried.

use thiserror::Error;

/// Failure of an optimization request
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Rejected at the boundary, before any search work
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Grid would exceed the hard cap; raised before the grid is allocated
    #[error("search space too large: {points} grid points exceed the limit of {limit}")]
    SearchSpaceTooLarge { points: u64, limit: u64 },

    /// Search ran, but no grid point satisfied the user bounds
    #[error("no candidate satisfies the configured constraints ({grid_size} evaluated)")]
    NoFeasibleCandidate { grid_size: usize },
}

impl EngineError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        EngineError::InvalidConfiguration(msg.into())
    }
}
