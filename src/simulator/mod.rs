//! Chain simulator for the contention Markov chain.
//!
//! The simulator owns one session: the active protocol class, the current
//! chain state, a step counter, a bounded transition log and the `running`
//! flag that playback polls.
//!
//! # Key Concepts
//!
//! - **Stepping**: one uniform draw per step, mapped through the rule table
//! - **Sources**: draws come from a [`UniformSource`], normally an
//!   entropy-seeded `StdRng`, or a [`ScriptedSource`] for fixed sequences
//! - **Configuration**: [`SimulatorConfig`] applied through [`SimulatorBuilder`]

mod builder;
mod config;
mod error;
mod machine;
mod snapshot;
mod source;

pub use builder::SimulatorBuilder;
pub use config::{SimulatorConfig, DEFAULT_TICK_INTERVAL};
pub use error::{BuildError, SourceError};
pub use machine::{ChainSimulator, SimulationState, EDGE_OPACITY_SCALE};
pub use snapshot::SimulationSnapshot;
pub use source::{RngSource, ScriptedSource, UniformSource};
