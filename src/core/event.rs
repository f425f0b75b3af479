//! Slot outcomes that drive the chain.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of one contention slot.
///
/// Success always returns the chain to state 0. Collision moves it toward
/// the boundary state. Idle leaves it where it is.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionEvent {
    /// The packet was delivered
    Success,
    /// The packet collided with another transmission
    Collision,
    /// No transmission attempt in this slot
    Idle,
}

impl TransitionEvent {
    /// All events in threshold order.
    pub const ALL: [TransitionEvent; 3] = [
        TransitionEvent::Success,
        TransitionEvent::Collision,
        TransitionEvent::Idle,
    ];

    /// Column of the event in the rule table.
    pub fn index(self) -> usize {
        match self {
            Self::Success => 0,
            Self::Collision => 1,
            Self::Idle => 2,
        }
    }

    /// Lowercase label, as shown in transition logs.
    pub fn label(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Collision => "collision",
            Self::Idle => "idle",
        }
    }

    /// Map a uniform draw in `[0, 1)` onto an outcome.
    ///
    /// The interval is split as `[0, success)`, `[success, success + collision)`
    /// and the remainder, which is idle. The caller must pass probabilities
    /// that partition the unit interval; anything past the first two bands
    /// is classified as idle.
    ///
    /// # Example
    ///
    /// ```rust
    /// use aloha_dtmc::core::TransitionEvent;
    ///
    /// assert_eq!(TransitionEvent::classify(0.03, 0.071486, 0.053514), TransitionEvent::Success);
    /// assert_eq!(TransitionEvent::classify(0.10, 0.071486, 0.053514), TransitionEvent::Collision);
    /// assert_eq!(TransitionEvent::classify(0.50, 0.071486, 0.053514), TransitionEvent::Idle);
    /// ```
    pub fn classify(draw: f64, success: f64, collision: f64) -> Self {
        if draw < success {
            Self::Success
        } else if draw < success + collision {
            Self::Collision
        } else {
            Self::Idle
        }
    }
}

impl fmt::Display for TransitionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_respects_band_boundaries() {
        assert_eq!(TransitionEvent::classify(0.0, 0.2, 0.3), TransitionEvent::Success);
        assert_eq!(TransitionEvent::classify(0.2, 0.2, 0.3), TransitionEvent::Collision);
        assert_eq!(TransitionEvent::classify(0.499, 0.2, 0.3), TransitionEvent::Collision);
        assert_eq!(TransitionEvent::classify(0.5, 0.2, 0.3), TransitionEvent::Idle);
        assert_eq!(TransitionEvent::classify(0.999, 0.2, 0.3), TransitionEvent::Idle);
    }

    #[test]
    fn zero_width_bands_are_skipped() {
        assert_eq!(TransitionEvent::classify(0.0, 0.0, 0.0), TransitionEvent::Idle);
        assert_eq!(TransitionEvent::classify(0.0, 0.0, 0.4), TransitionEvent::Collision);
    }

    #[test]
    fn indices_follow_threshold_order() {
        for (i, event) in TransitionEvent::ALL.iter().enumerate() {
            assert_eq!(event.index(), i);
        }
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&TransitionEvent::Collision).unwrap();
        assert_eq!(json, "\"collision\"");
        assert_eq!(TransitionEvent::Idle.to_string(), "idle");
    }
}
