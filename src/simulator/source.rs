//! Sources of uniform draws for the simulator.

use super::error::SourceError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Supplies independent uniform values in `[0, 1)`.
pub trait UniformSource {
    fn next_uniform(&mut self) -> f64;
}

/// Uniform draws from a `rand` generator.
#[derive(Clone, Debug)]
pub struct RngSource<R> {
    rng: R,
}

impl RngSource<StdRng> {
    /// Generator seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> UniformSource for RngSource<R> {
    fn next_uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed sequence of draws, starting over when exhausted.
///
/// # Example
///
/// ```rust
/// use aloha_dtmc::simulator::{ScriptedSource, UniformSource};
///
/// let mut source = ScriptedSource::new(vec![0.03, 0.10]).unwrap();
/// assert_eq!(source.next_uniform(), 0.03);
/// assert_eq!(source.next_uniform(), 0.10);
/// assert_eq!(source.next_uniform(), 0.03);
/// ```
#[derive(Clone, Debug)]
pub struct ScriptedSource {
    draws: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    /// Fails if `draws` is empty or holds a value outside `[0, 1)`.
    pub fn new(draws: Vec<f64>) -> Result<Self, SourceError> {
        if draws.is_empty() {
            return Err(SourceError::EmptyScript);
        }
        if let Some((position, &draw)) = draws
            .iter()
            .enumerate()
            .find(|(_, u)| !(0.0..1.0).contains(*u))
        {
            return Err(SourceError::DrawOutOfRange { position, draw });
        }
        Ok(Self { draws, cursor: 0 })
    }

    /// Number of draws handed out so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl UniformSource for ScriptedSource {
    fn next_uniform(&mut self) -> f64 {
        let draw = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        draw
    }
}
