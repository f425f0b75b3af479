//! Chain states of the contention Markov chain.
//!
//! Each state counts the consecutive transmission failures of the packet
//! at the head of the queue.

use super::error::ChainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of states in the chain.
pub const STATE_COUNT: usize = 3;

/// Position of the chain.
///
/// The chain has exactly three states. `TwoOrMore` is the boundary state:
/// further collisions keep the chain there, only a success leaves it.
///
/// # Example
///
/// ```rust
/// use aloha_dtmc::core::ChainState;
///
/// assert_eq!(ChainState::from_index(1), Some(ChainState::One));
/// assert_eq!(ChainState::TwoOrMore.index(), 2);
/// assert!(ChainState::from_index(3).is_none());
/// ```
#[derive(
    Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize,
)]
#[serde(into = "usize", try_from = "usize")]
pub enum ChainState {
    /// Fresh packet, no failures yet
    #[default]
    Zero,
    /// One failed attempt
    One,
    /// Two or more failed attempts
    TwoOrMore,
}

impl ChainState {
    /// All states in index order.
    pub const ALL: [ChainState; STATE_COUNT] =
        [ChainState::Zero, ChainState::One, ChainState::TwoOrMore];

    /// Index of the state in `0..STATE_COUNT`.
    pub fn index(self) -> usize {
        match self {
            Self::Zero => 0,
            Self::One => 1,
            Self::TwoOrMore => 2,
        }
    }

    /// State for an index, `None` outside `0..STATE_COUNT`.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Short name for display/logging.
    pub fn name(self) -> &'static str {
        match self {
            Self::Zero => "zero failures",
            Self::One => "one failure",
            Self::TwoOrMore => "two or more failures",
        }
    }

    /// Longer description of what the state models.
    pub fn description(self) -> &'static str {
        match self {
            Self::Zero => "Fresh packet, highest CP",
            Self::One => "1 failure, same CP (odd failure)",
            Self::TwoOrMore => "2+ failures, reduced CP (even failure)",
        }
    }

    /// Whether this is the boundary state that only a success leaves.
    pub fn is_boundary(self) -> bool {
        matches!(self, Self::TwoOrMore)
    }
}

impl fmt::Display for ChainState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

impl From<ChainState> for usize {
    fn from(state: ChainState) -> Self {
        state.index()
    }
}

impl TryFrom<usize> for ChainState {
    type Error = ChainError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::from_index(index).ok_or(ChainError::StateIndexOutOfRange { index })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_through_from_index() {
        for state in ChainState::ALL {
            assert_eq!(ChainState::from_index(state.index()), Some(state));
        }
    }

    #[test]
    fn from_index_rejects_out_of_range() {
        assert!(ChainState::from_index(3).is_none());
        assert!(ChainState::from_index(usize::MAX).is_none());
    }

    #[test]
    fn try_from_reports_the_bad_index() {
        assert_eq!(ChainState::try_from(1), Ok(ChainState::One));
        assert_eq!(
            ChainState::try_from(7),
            Err(ChainError::StateIndexOutOfRange { index: 7 })
        );
    }

    #[test]
    fn only_two_or_more_is_boundary() {
        assert!(!ChainState::Zero.is_boundary());
        assert!(!ChainState::One.is_boundary());
        assert!(ChainState::TwoOrMore.is_boundary());
    }

    #[test]
    fn default_is_zero() {
        assert_eq!(ChainState::default(), ChainState::Zero);
    }

    #[test]
    fn displays_as_index() {
        assert_eq!(ChainState::TwoOrMore.to_string(), "2");
    }

    #[test]
    fn serializes_as_index() {
        let json = serde_json::to_string(&ChainState::One).unwrap();
        assert_eq!(json, "1");

        let state: ChainState = serde_json::from_str("2").unwrap();
        assert_eq!(state, ChainState::TwoOrMore);

        assert!(serde_json::from_str::<ChainState>("7").is_err());
    }
}
