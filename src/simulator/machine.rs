//! Chain simulator that advances the contention chain one slot at a time.

use super::builder::SimulatorBuilder;
use super::config::SimulatorConfig;
use super::error::BuildError;
use super::snapshot::SimulationSnapshot;
use super::source::{RngSource, UniformSource};
use crate::catalog::{CatalogError, ModelCatalog, ProtocolClass, StateParams, UserPriority};
use crate::core::{next_state, ChainState, TransitionLog, TransitionRecord};
use chrono::Utc;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use std::sync::Arc;
use tokio::sync::watch;

/// Opacity applied to the heaviest possible edge when shading the diagram.
pub const EDGE_OPACITY_SCALE: f64 = 0.8;

/// Mutable session state of one simulator.
///
/// Only the owning [`ChainSimulator`] mutates it; everyone else gets
/// read access.
#[derive(Clone, Debug)]
pub struct SimulationState {
    active_class: ProtocolClass,
    current: ChainState,
    step_count: u64,
    log: TransitionLog,
    running: bool,
}

impl SimulationState {
    pub(crate) fn new(active_class: ProtocolClass, log_capacity: usize) -> Self {
        Self {
            active_class,
            current: ChainState::Zero,
            step_count: 0,
            log: TransitionLog::with_capacity(log_capacity),
            running: false,
        }
    }

    fn reset(&mut self) {
        self.current = ChainState::Zero;
        self.step_count = 0;
        self.log.clear();
        self.running = false;
    }

    pub fn active_class(&self) -> &ProtocolClass {
        &self.active_class
    }

    pub fn current_state(&self) -> ChainState {
        self.current
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn transition_log(&self) -> &TransitionLog {
        &self.log
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

/// Discrete-time simulator of the three-state contention chain.
///
/// Each [`step`](Self::step) draws one uniform value, classifies it against
/// the current state's success/collision/idle thresholds and moves the
/// chain through the rule table. The simulator is synchronous and assumes
/// a single caller; periodic stepping belongs to [`crate::playback`].
///
/// Precondition for stepping: the active class's outcome probabilities
/// partition `[0, 1)`. Catalog validation guarantees this.
///
/// # Example
///
/// ```rust
/// use aloha_dtmc::catalog::ModelCatalog;
/// use aloha_dtmc::core::{ChainState, TransitionEvent};
/// use aloha_dtmc::simulator::{ChainSimulator, ScriptedSource};
/// use std::sync::Arc;
///
/// let catalog = Arc::new(ModelCatalog::reference().unwrap());
/// let source = ScriptedSource::new(vec![0.10, 0.03]).unwrap();
/// let mut sim = ChainSimulator::with_source(catalog, source).unwrap();
///
/// let record = sim.step();
/// assert_eq!(record.event, TransitionEvent::Collision);
/// assert_eq!(sim.current_state(), ChainState::One);
///
/// let record = sim.step();
/// assert_eq!(record.event, TransitionEvent::Success);
/// assert_eq!(sim.current_state(), ChainState::Zero);
/// assert_eq!(sim.step_count(), 2);
/// ```
#[derive(Debug)]
pub struct ChainSimulator<U> {
    catalog: Arc<ModelCatalog>,
    config: SimulatorConfig,
    state: SimulationState,
    source: U,
    run_generation: watch::Sender<u64>,
}

impl ChainSimulator<RngSource<StdRng>> {
    /// Build a simulator over `catalog` with default configuration and an
    /// entropy-seeded generator.
    pub fn new(catalog: Arc<ModelCatalog>) -> Result<Self, BuildError> {
        SimulatorBuilder::new(catalog).build()
    }
}

impl<U: UniformSource> ChainSimulator<U> {
    pub(crate) fn from_parts(
        catalog: Arc<ModelCatalog>,
        config: SimulatorConfig,
        initial_class: ProtocolClass,
        source: U,
    ) -> Self {
        let state = SimulationState::new(initial_class, config.log_capacity);
        let (run_generation, _) = watch::channel(0);
        Self {
            catalog,
            config,
            state,
            source,
            run_generation,
        }
    }

    /// Build a simulator over `catalog` driven by `source`, with default
    /// configuration.
    pub fn with_source(
        catalog: Arc<ModelCatalog>,
        source: U,
    ) -> Result<Self, BuildError> {
        SimulatorBuilder::new(catalog).source(source).build()
    }

    /// Advance the chain by one slot using a fresh draw.
    pub fn step(&mut self) -> TransitionRecord {
        let draw = self.source.next_uniform();
        self.apply_draw(draw)
    }

    /// Advance the chain by one slot using the supplied draw in `[0, 1)`.
    ///
    /// Draws outside the unit interval are not rejected; anything at or
    /// above success + collision is classified as idle.
    pub fn apply_draw(&mut self, draw: f64) -> TransitionRecord {
        let from = self.state.current;
        let event = self.current_params().classify(draw);
        let to = next_state(from, event);

        self.state.current = to;
        self.state.step_count += 1;

        let record = TransitionRecord {
            from,
            to,
            event,
            step: self.state.step_count,
            at: Utc::now(),
        };
        self.state.log.record(record.clone());

        debug!(
            "{} step {}: {} -> {} ({}, u={:.6})",
            self.state.active_class.id, record.step, from, to, event, draw
        );
        record
    }

    /// Switch the active class by textual identifier.
    ///
    /// The identifier must match a registered tag exactly. Anything else
    /// fails with `UnknownClass` and leaves the session untouched. On
    /// success the session is reset first.
    pub fn set_active_class(&mut self, id: &str) -> Result<(), CatalogError> {
        let class = match self.catalog.lookup(id) {
            Ok(class) => class.clone(),
            Err(err) => {
                warn!("Rejected protocol class selection '{}': {}", id, err);
                return Err(err);
            }
        };
        self.activate(class);
        Ok(())
    }

    /// Switch the active class by priority. See [`Self::set_active_class`].
    pub fn set_active_priority(&mut self, id: UserPriority) -> Result<(), CatalogError> {
        let class = match self.catalog.get(id) {
            Ok(class) => class.clone(),
            Err(err) => {
                warn!("Rejected protocol class selection {}: {}", id, err);
                return Err(err);
            }
        };
        self.activate(class);
        Ok(())
    }

    fn activate(&mut self, class: ProtocolClass) {
        self.reset();
        info!("Active protocol class set to {}", class.id);
        self.state.active_class = class;
    }

    /// Return to state 0 with an empty log, step 0 and playback stopped.
    /// The active class is kept.
    pub fn reset(&mut self) {
        self.state.reset();
        self.end_run();
        info!("Simulation reset ({})", self.state.active_class.id);
    }

    /// Toggle automatic advancement. Stepping itself is driven externally.
    pub fn set_running(&mut self, running: bool) {
        if self.state.running != running {
            info!(
                "Simulation {}",
                if running { "running" } else { "paused" }
            );
        }
        self.state.running = running;
        if !running {
            self.end_run();
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// Generation of the current playback run.
    ///
    /// Starting playback, pausing and resetting each move to a new
    /// generation. A playback task only steps while the generation it
    /// started under is current.
    pub fn run_generation(&self) -> u64 {
        *self.run_generation.borrow()
    }

    /// Open a new run generation, mark the simulator running and return a
    /// receiver that changes as soon as this run is superseded.
    pub(crate) fn begin_run(&mut self) -> watch::Receiver<u64> {
        self.run_generation.send_modify(|generation| *generation += 1);
        self.set_running(true);
        self.run_generation.subscribe()
    }

    fn end_run(&mut self) {
        self.run_generation.send_modify(|generation| *generation += 1);
    }

    /// Probability mass of the edge between two state indices under the
    /// active class, for display shading.
    ///
    /// Pairs outside the chain's support, including out-of-range indices,
    /// weigh 0. `visible == false` forces 0 without touching simulation.
    pub fn transition_weight(&self, from: usize, to: usize, visible: bool) -> f64 {
        if !visible {
            return 0.0;
        }
        match (ChainState::from_index(from), ChainState::from_index(to)) {
            (Some(from), Some(to)) => self.active_class().edge_weight(from, to),
            _ => 0.0,
        }
    }

    /// Edge opacity used when drawing the state diagram.
    pub fn transition_opacity(&self, from: usize, to: usize, visible: bool) -> f64 {
        self.transition_weight(from, to, visible) * EDGE_OPACITY_SCALE
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    /// Record of the active class.
    pub fn active_class(&self) -> &ProtocolClass {
        &self.state.active_class
    }

    pub fn current_state(&self) -> ChainState {
        self.state.current
    }

    pub fn step_count(&self) -> u64 {
        self.state.step_count
    }

    pub fn transition_log(&self) -> &TransitionLog {
        &self.state.log
    }

    /// The last `n` transitions, oldest first.
    pub fn recent_transitions(&self, n: usize) -> Vec<&TransitionRecord> {
        self.state.log.recent(n)
    }

    /// Parameters of the current state under the active class.
    pub fn current_params(&self) -> &StateParams {
        self.active_class().params(self.state.current)
    }

    /// Stored steady-state probability of the current state.
    pub fn current_steady_state(&self) -> f64 {
        self.active_class().steady_state_of(self.state.current)
    }

    /// Serializable view of everything a presentation layer shows.
    pub fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot::capture(self)
    }
}
