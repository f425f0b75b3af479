//! Aloha DTMC: a discrete-time Markov chain simulator for IEEE 802.15.6
//! slotted-Aloha contention.
//!
//! A packet's consecutive transmission failures are modeled as a three-state
//! chain. Each slot ends in success (back to state 0), collision (one state
//! further, saturating at state 2) or idle (stay put). Priority classes
//! differ only in their per-state outcome probabilities.
//!
//! # Core Concepts
//!
//! - **Catalog**: validated, read-only registry of priority classes
//! - **Simulator**: one session advancing the chain one uniform draw at a time
//! - **Playback**: a cancellable tokio task stepping a shared simulator
//!
//! # Example
//!
//! ```rust
//! use aloha_dtmc::catalog::ModelCatalog;
//! use aloha_dtmc::core::{ChainState, TransitionEvent};
//! use aloha_dtmc::simulator::{ChainSimulator, ScriptedSource};
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(ModelCatalog::reference().unwrap());
//! let source = ScriptedSource::new(vec![0.10, 0.10, 0.50]).unwrap();
//! let mut sim = ChainSimulator::with_source(catalog, source).unwrap();
//!
//! sim.step();
//! sim.step();
//! let record = sim.step();
//!
//! assert_eq!(record.event, TransitionEvent::Idle);
//! assert_eq!(sim.current_state(), ChainState::TwoOrMore);
//!
//! sim.set_active_class("UP5").unwrap();
//! assert_eq!(sim.step_count(), 0);
//! ```

pub mod catalog;
pub mod core;
pub mod playback;
pub mod simulator;

// Re-export commonly used types
pub use crate::catalog::{CatalogError, ModelCatalog, ProtocolClass, StateParams, UserPriority};
pub use crate::core::{ChainError, ChainState, TransitionEvent, TransitionLog, TransitionRecord};
pub use crate::playback::{PlaybackHandle, SharedSimulator};
pub use crate::simulator::{
    BuildError, ChainSimulator, SimulatorBuilder, SimulatorConfig, SourceError,
};
