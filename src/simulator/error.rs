//! Build errors for simulators.

use crate::catalog::CatalogError;
use thiserror::Error;

/// Errors that can occur when building a simulator.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("Transition log capacity must be at least 1")]
    ZeroLogCapacity,

    #[error("Tick interval must be non-zero")]
    ZeroTickInterval,

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Errors that can occur when building a scripted draw source.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SourceError {
    #[error("Scripted source needs at least one draw")]
    EmptyScript,

    #[error("Draw {position} is {draw}, outside [0, 1)")]
    DrawOutOfRange { position: usize, draw: f64 },
}
