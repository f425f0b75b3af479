//! Simulator configuration.

use crate::catalog::UserPriority;
use crate::core::DEFAULT_LOG_CAPACITY;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default period between automatic steps while playing.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Settings applied when a simulator is built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Class active when the session starts
    pub initial_class: UserPriority,
    /// Number of transitions kept in the log
    pub log_capacity: usize,
    /// Period between automatic steps while playing
    pub tick_interval: Duration,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            initial_class: UserPriority::Up0,
            log_capacity: DEFAULT_LOG_CAPACITY,
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }
}
