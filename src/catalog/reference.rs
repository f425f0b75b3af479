//! Reference parameter sets shipped with the crate.
//!
//! Probabilities come from the slotted-Aloha analysis of the 802.15.6
//! contention access period for the lowest and a high user priority.

use super::class::{ProtocolClass, StateParams};
use super::priority::UserPriority;

/// UP0, the lowest priority: CP between 1/16 and 1/8.
pub fn up0() -> ProtocolClass {
    ProtocolClass {
        id: UserPriority::Up0,
        name: "UP0 (Low Priority)".to_string(),
        color: "#ef4444".to_string(),
        contention_probability_max: 0.125,
        contention_probability_min: 0.0625,
        states: [
            StateParams::new(0.125, 0.071486, 0.053514, 0.875),
            StateParams::new(0.125, 0.071486, 0.053514, 0.875),
            StateParams::new(0.0625, 0.035743, 0.026757, 0.9375),
        ],
        steady_state: [0.869814, 0.093019, 0.037167],
    }
}

/// UP5, a high priority: CP between 3/16 and 3/8.
pub fn up5() -> ProtocolClass {
    ProtocolClass {
        id: UserPriority::Up5,
        name: "UP5 (High Priority)".to_string(),
        color: "#3b82f6".to_string(),
        contention_probability_max: 0.375,
        contention_probability_min: 0.1875,
        states: [
            StateParams::new(0.375, 0.299956, 0.075044, 0.625),
            StateParams::new(0.375, 0.299956, 0.075044, 0.625),
            StateParams::new(0.1875, 0.149978, 0.037522, 0.8125),
        ],
        steady_state: [0.852357, 0.127947, 0.019696],
    }
}

/// Every reference class, lowest priority first.
pub fn all() -> Vec<ProtocolClass> {
    vec![up0(), up5()]
}
