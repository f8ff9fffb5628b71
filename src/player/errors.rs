//! Player ledger error types.

use crate::store::StoreError;
use thiserror::Error;

/// Player ledger errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayerError {
    /// A take would drop the balance below zero
    #[error("Insufficient points")]
    InsufficientPoints,

    /// Failure surfaced unchanged from the persistence contract
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for player ledger operations
pub type PlayerResult<T> = Result<T, PlayerError>;
