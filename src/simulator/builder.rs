//! Builder for chain simulators.

use super::config::SimulatorConfig;
use super::error::BuildError;
use super::machine::ChainSimulator;
use super::source::{RngSource, UniformSource};
use crate::catalog::{ModelCatalog, UserPriority};
use log::debug;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::Duration;

/// Builder for constructing simulators with a fluent API.
///
/// # Example
///
/// ```rust
/// use aloha_dtmc::catalog::{ModelCatalog, UserPriority};
/// use aloha_dtmc::simulator::SimulatorBuilder;
/// use std::sync::Arc;
///
/// let catalog = Arc::new(ModelCatalog::reference().unwrap());
/// let sim = SimulatorBuilder::new(catalog)
///     .initial_class(UserPriority::Up5)
///     .log_capacity(20)
///     .build()
///     .unwrap();
///
/// assert_eq!(sim.active_class().id, UserPriority::Up5);
/// assert_eq!(sim.transition_log().capacity(), 20);
/// ```
pub struct SimulatorBuilder<U> {
    catalog: Arc<ModelCatalog>,
    config: SimulatorConfig,
    source: U,
}

impl SimulatorBuilder<RngSource<StdRng>> {
    /// Create a builder with default configuration and an entropy-seeded
    /// generator.
    pub fn new(catalog: Arc<ModelCatalog>) -> Self {
        Self {
            catalog,
            config: SimulatorConfig::default(),
            source: RngSource::from_entropy(),
        }
    }
}

impl<U: UniformSource> SimulatorBuilder<U> {
    /// Replace the whole configuration.
    pub fn config(mut self, config: SimulatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the class active when the session starts.
    pub fn initial_class(mut self, id: UserPriority) -> Self {
        self.config.initial_class = id;
        self
    }

    /// Set how many transitions the log keeps.
    pub fn log_capacity(mut self, capacity: usize) -> Self {
        self.config.log_capacity = capacity;
        self
    }

    /// Set the playback period.
    pub fn tick_interval(mut self, interval: Duration) -> Self {
        self.config.tick_interval = interval;
        self
    }

    /// Drive the simulator from a different uniform source.
    pub fn source<V: UniformSource>(self, source: V) -> SimulatorBuilder<V> {
        SimulatorBuilder {
            catalog: self.catalog,
            config: self.config,
            source,
        }
    }

    /// Build the simulator.
    ///
    /// Fails if the initial class is not in the catalog or the
    /// configuration is degenerate.
    pub fn build(self) -> Result<ChainSimulator<U>, BuildError> {
        if self.config.log_capacity == 0 {
            return Err(BuildError::ZeroLogCapacity);
        }
        if self.config.tick_interval.is_zero() {
            return Err(BuildError::ZeroTickInterval);
        }

        let initial = self.catalog.get(self.config.initial_class)?.clone();
        debug!(
            "Building simulator: class {}, log capacity {}, tick {:?}",
            initial.id, self.config.log_capacity, self.config.tick_interval
        );

        Ok(ChainSimulator::from_parts(
            self.catalog,
            self.config,
            initial,
            self.source,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogError;
    use crate::simulator::ScriptedSource;

    fn catalog() -> Arc<ModelCatalog> {
        Arc::new(ModelCatalog::reference().unwrap())
    }

    #[test]
    fn builder_rejects_zero_log_capacity() {
        let result = SimulatorBuilder::new(catalog()).log_capacity(0).build();
        assert!(matches!(result, Err(BuildError::ZeroLogCapacity)));
    }

    #[test]
    fn builder_rejects_zero_tick_interval() {
        let result = SimulatorBuilder::new(catalog())
            .tick_interval(Duration::ZERO)
            .build();
        assert!(matches!(result, Err(BuildError::ZeroTickInterval)));
    }

    #[test]
    fn builder_rejects_unregistered_initial_class() {
        let result = SimulatorBuilder::new(catalog())
            .initial_class(UserPriority::Up2)
            .build();
        assert!(matches!(
            result,
            Err(BuildError::Catalog(CatalogError::UnknownClass { .. }))
        ));
    }

    #[test]
    fn whole_config_can_be_supplied() {
        let config = SimulatorConfig {
            initial_class: UserPriority::Up5,
            log_capacity: 4,
            tick_interval: Duration::from_millis(250),
        };

        let sim = SimulatorBuilder::new(catalog())
            .config(config.clone())
            .source(ScriptedSource::new(vec![0.5]).unwrap())
            .build()
            .unwrap();

        assert_eq!(sim.config(), &config);
        assert_eq!(sim.transition_log().capacity(), 4);
    }
}
