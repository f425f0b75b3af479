//! Core chain vocabulary and logic.
//!
//! This module contains the pieces shared by the catalog and the simulator:
//! - The three chain states and the slot outcomes
//! - The transition rule table
//! - The bounded transition log
//!
//! Nothing in here draws random numbers or reads the clock except when a
//! record is stamped by its caller.

mod error;
mod event;
mod history;
mod rule;
mod state;

pub use error::ChainError;
pub use event::TransitionEvent;
pub use history::{TransitionLog, TransitionRecord, DEFAULT_LOG_CAPACITY};
pub use rule::{events_between, next_state};
pub use state::{ChainState, STATE_COUNT};
