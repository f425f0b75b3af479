//! Serializable view of a running session.

use super::machine::ChainSimulator;
use super::source::UniformSource;
use crate::catalog::{StateParams, UserPriority};
use crate::core::{ChainState, TransitionRecord, STATE_COUNT};
use serde::Serialize;

/// Everything a presentation layer needs to draw one frame.
#[derive(Clone, Debug, Serialize)]
pub struct SimulationSnapshot {
    pub class: UserPriority,
    pub class_name: String,
    pub color: String,
    pub current_state: ChainState,
    pub step_count: u64,
    pub running: bool,
    /// Parameters of the current state
    pub params: StateParams,
    /// Stored steady-state distribution of the active class
    pub steady_state: [f64; STATE_COUNT],
    /// Edge weights indexed `[from][to]`
    pub edge_weights: [[f64; STATE_COUNT]; STATE_COUNT],
    /// Kept transitions, oldest first
    pub transitions: Vec<TransitionRecord>,
}

impl SimulationSnapshot {
    pub(crate) fn capture<U: UniformSource>(sim: &ChainSimulator<U>) -> Self {
        let class = sim.active_class();
        Self {
            class: class.id,
            class_name: class.name.clone(),
            color: class.color.clone(),
            current_state: sim.current_state(),
            step_count: sim.step_count(),
            running: sim.is_running(),
            params: *sim.current_params(),
            steady_state: class.steady_state,
            edge_weights: class.transition_matrix(),
            transitions: sim.transition_log().to_vec(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
