//! Errors for the chain vocabulary.

use super::state::STATE_COUNT;
use thiserror::Error;

/// Errors raised when chain values are built from untrusted input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChainError {
    #[error("State index {index} out of range (the chain has {STATE_COUNT} states)")]
    StateIndexOutOfRange { index: usize },

    #[error("Transition log holds {len} entries, more than its capacity of {capacity}")]
    LogOverCapacity { len: usize, capacity: usize },
}
