//! Catalog error types.

use super::priority::UserPriority;
use crate::core::ChainState;
use thiserror::Error;

/// Errors raised while building or querying a model catalog.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    /// The requested class identifier is not registered
    #[error("Unknown protocol class '{id}'")]
    UnknownClass { id: String },

    /// One or more class definitions broke a model invariant
    #[error(
        "Invalid model definition ({} violation(s)): {}",
        .violations.len(),
        join_violations(.violations)
    )]
    InvalidModelDefinition { violations: Vec<ModelViolation> },

    /// The same class was registered twice
    #[error("Protocol class {id} registered more than once")]
    DuplicateClass { id: UserPriority },

    /// No class was registered
    #[error("Catalog has no protocol classes. Register at least one")]
    EmptyCatalog,
}

/// A single broken invariant in a protocol class definition.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ModelViolation {
    #[error("{class} state {state}: contention probability {value} outside (0, 1]")]
    ContentionOutOfRange {
        class: UserPriority,
        state: ChainState,
        value: f64,
    },

    #[error("{class}: contention probability bound {value} outside (0, 1]")]
    ContentionBoundOutOfRange { class: UserPriority, value: f64 },

    #[error("{class} state {state}: {outcome} probability {value} is negative or not finite")]
    InvalidOutcomeProbability {
        class: UserPriority,
        state: ChainState,
        outcome: &'static str,
        value: f64,
    },

    #[error("{class} state {state}: outcome probabilities sum to {sum}, expected 1")]
    OutcomesNotNormalized {
        class: UserPriority,
        state: ChainState,
        sum: f64,
    },

    #[error("{class}: steady-state entry {state} is {value}, negative or not finite")]
    InvalidSteadyStateEntry {
        class: UserPriority,
        state: ChainState,
        value: f64,
    },

    #[error("{class}: steady-state distribution sums to {sum}, expected 1")]
    SteadyStateNotNormalized { class: UserPriority, sum: f64 },
}

fn join_violations(violations: &[ModelViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
