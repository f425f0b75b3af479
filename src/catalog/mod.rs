//! Model catalog of protocol priority classes.
//!
//! The catalog is a read-only registry mapping a [`UserPriority`] to the
//! parameter record of its class. It is validated once when built and
//! never mutated afterwards.
//!
//! # Example
//!
//! ```rust
//! use aloha_dtmc::catalog::{CatalogError, ModelCatalog, UserPriority};
//!
//! let catalog = ModelCatalog::reference().unwrap();
//!
//! let up0 = catalog.lookup("UP0").unwrap();
//! assert_eq!(up0.id, UserPriority::Up0);
//!
//! assert!(matches!(
//!     catalog.lookup("UP3"),
//!     Err(CatalogError::UnknownClass { .. })
//! ));
//! ```

mod builder;
mod class;
mod error;
mod priority;
pub mod reference;

pub use builder::CatalogBuilder;
pub use class::{ProtocolClass, StateParams, TransitionMatrix, PROBABILITY_TOLERANCE};
pub use error::{CatalogError, ModelViolation};
pub use priority::UserPriority;

use std::collections::BTreeMap;

/// Validated, immutable registry of protocol classes.
#[derive(Clone, Debug)]
pub struct ModelCatalog {
    classes: BTreeMap<UserPriority, ProtocolClass>,
}

impl ModelCatalog {
    /// Catalog with the shipped UP0 and UP5 classes.
    pub fn reference() -> Result<Self, CatalogError> {
        CatalogBuilder::new().classes(reference::all()).build()
    }

    /// Start building a custom catalog.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Look up a class by its exact textual identifier, e.g. `"UP5"`.
    ///
    /// Identifiers are not trimmed or case-folded.
    pub fn lookup(&self, id: &str) -> Result<&ProtocolClass, CatalogError> {
        let priority: UserPriority = id.parse()?;
        self.classes
            .get(&priority)
            .ok_or_else(|| CatalogError::UnknownClass { id: id.to_string() })
    }

    /// Look up a class by priority.
    pub fn get(&self, id: UserPriority) -> Result<&ProtocolClass, CatalogError> {
        self.classes
            .get(&id)
            .ok_or_else(|| CatalogError::UnknownClass { id: id.to_string() })
    }

    pub fn contains(&self, id: UserPriority) -> bool {
        self.classes.contains_key(&id)
    }

    /// Registered priorities in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = UserPriority> + '_ {
        self.classes.keys().copied()
    }

    /// Registered classes in ascending priority order.
    pub fn classes(&self) -> impl Iterator<Item = &ProtocolClass> {
        self.classes.values()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ChainState;

    #[test]
    fn reference_catalog_ships_two_classes() {
        let catalog = ModelCatalog::reference().unwrap();
        let ids: Vec<_> = catalog.ids().collect();
        assert_eq!(ids, vec![UserPriority::Up0, UserPriority::Up5]);
    }

    #[test]
    fn reference_classes_hold_model_invariants() {
        let catalog = ModelCatalog::reference().unwrap();
        for class in catalog.classes() {
            assert_eq!(class.states.len(), 3);
            for state in ChainState::ALL {
                let p = class.params(state);
                let sum = p.success_probability + p.collision_probability + p.idle_probability;
                assert!((sum - 1.0).abs() < 1e-6, "{} state {state}", class.id);
            }
            assert!(class.steady_state.iter().all(|v| *v >= 0.0));
            let sum: f64 = class.steady_state.iter().sum();
            assert!((sum - 1.0).abs() < 1e-6, "{} steady state", class.id);
        }
    }

    #[test]
    fn lookup_by_text_and_priority_agree() {
        let catalog = ModelCatalog::reference().unwrap();
        let by_text = catalog.lookup("UP5").unwrap();
        let by_priority = catalog.get(UserPriority::Up5).unwrap();
        assert_eq!(by_text, by_priority);
        assert_eq!(by_text.name, "UP5 (High Priority)");
    }

    #[test]
    fn lookup_rejects_unknown_identifiers() {
        let catalog = ModelCatalog::reference().unwrap();

        assert_eq!(
            catalog.lookup("nonexistent-id"),
            Err(CatalogError::UnknownClass {
                id: "nonexistent-id".to_string()
            })
        );
        assert_eq!(
            catalog.get(UserPriority::Up7),
            Err(CatalogError::UnknownClass {
                id: "UP7".to_string()
            })
        );
    }

    #[test]
    fn stored_steady_states_are_display_values() {
        let catalog = ModelCatalog::reference().unwrap();
        let up0 = catalog.get(UserPriority::Up0).unwrap();
        assert_eq!(up0.steady_state_of(ChainState::Zero), 0.869814);
        assert_eq!(up0.steady_state_of(ChainState::TwoOrMore), 0.037167);
    }
}
