//! Transition rule table of the contention chain.
//!
//! The whole collision-backoff policy lives in one table keyed by
//! (current state, slot outcome). Everything else, from stepping the
//! simulator to shading edges, derives from it.

use super::event::TransitionEvent;
use super::state::{ChainState, STATE_COUNT};

use ChainState::{One, TwoOrMore, Zero};

/// Next state for each (state, event) pair.
///
/// Rows are indexed by [`ChainState::index`], columns by
/// [`TransitionEvent::index`] (success, collision, idle).
const NEXT_STATE: [[ChainState; 3]; STATE_COUNT] = [
    [Zero, One, Zero],
    [Zero, TwoOrMore, One],
    [Zero, TwoOrMore, TwoOrMore],
];

/// Resolve the state reached from `from` when `event` occurs.
///
/// # Example
///
/// ```rust
/// use aloha_dtmc::core::{next_state, ChainState, TransitionEvent};
///
/// assert_eq!(next_state(ChainState::Zero, TransitionEvent::Collision), ChainState::One);
/// assert_eq!(next_state(ChainState::TwoOrMore, TransitionEvent::Idle), ChainState::TwoOrMore);
/// ```
pub fn next_state(from: ChainState, event: TransitionEvent) -> ChainState {
    NEXT_STATE[from.index()][event.index()]
}

/// Events that carry the chain from `from` to `to`.
///
/// Empty when the edge is not part of the chain's support.
pub fn events_between(from: ChainState, to: ChainState) -> impl Iterator<Item = TransitionEvent> {
    TransitionEvent::ALL
        .into_iter()
        .filter(move |event| next_state(from, *event) == to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use TransitionEvent::{Collision, Idle, Success};

    #[test]
    fn success_always_returns_to_zero() {
        for state in ChainState::ALL {
            assert_eq!(next_state(state, Success), Zero);
        }
    }

    #[test]
    fn collision_moves_toward_boundary() {
        assert_eq!(next_state(Zero, Collision), One);
        assert_eq!(next_state(One, Collision), TwoOrMore);
        assert_eq!(next_state(TwoOrMore, Collision), TwoOrMore);
    }

    #[test]
    fn idle_is_a_self_loop() {
        for state in ChainState::ALL {
            assert_eq!(next_state(state, Idle), state);
        }
    }

    #[test]
    fn events_between_lists_merged_edges() {
        let zero_loop: Vec<_> = events_between(Zero, Zero).collect();
        assert_eq!(zero_loop, vec![Success, Idle]);

        let boundary_loop: Vec<_> = events_between(TwoOrMore, TwoOrMore).collect();
        assert_eq!(boundary_loop, vec![Collision, Idle]);
    }

    #[test]
    fn events_between_is_empty_outside_support() {
        assert_eq!(events_between(Zero, TwoOrMore).count(), 0);
        assert_eq!(events_between(TwoOrMore, One).count(), 0);
    }
}
