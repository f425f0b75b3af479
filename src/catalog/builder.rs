//! Builder for model catalogs.

use super::class::ProtocolClass;
use super::error::{CatalogError, ModelViolation};
use super::ModelCatalog;
use log::debug;
use std::collections::BTreeMap;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder that registers protocol classes and validates them eagerly.
///
/// Validation runs once, in [`CatalogBuilder::build`], and reports every
/// broken invariant of every class together.
///
/// # Example
///
/// ```rust
/// use aloha_dtmc::catalog::{reference, CatalogBuilder, UserPriority};
///
/// let catalog = CatalogBuilder::new()
///     .class(reference::up0())
///     .build()
///     .unwrap();
///
/// assert!(catalog.contains(UserPriority::Up0));
/// assert!(!catalog.contains(UserPriority::Up5));
/// ```
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    classes: Vec<ProtocolClass>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class.
    pub fn class(mut self, class: ProtocolClass) -> Self {
        self.classes.push(class);
        self
    }

    /// Register several classes at once.
    pub fn classes(mut self, classes: impl IntoIterator<Item = ProtocolClass>) -> Self {
        self.classes.extend(classes);
        self
    }

    /// Build the catalog.
    ///
    /// Fails with `EmptyCatalog` when nothing was registered, with
    /// `DuplicateClass` when an id appears twice, and with
    /// `InvalidModelDefinition` listing all violations otherwise.
    pub fn build(self) -> Result<ModelCatalog, CatalogError> {
        if self.classes.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }

        let checks: Vec<Validation<(), NonEmptyVec<ModelViolation>>> =
            self.classes.iter().map(ProtocolClass::validate).collect();

        if let Validation::Failure(errors) = Validation::all_vec(checks) {
            return Err(CatalogError::InvalidModelDefinition {
                violations: errors.iter().cloned().collect(),
            });
        }

        let mut classes = BTreeMap::new();
        for class in self.classes {
            let id = class.id;
            if classes.insert(id, class).is_some() {
                return Err(CatalogError::DuplicateClass { id });
            }
            debug!("Registered protocol class {}", id);
        }

        Ok(ModelCatalog { classes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{reference, StateParams, UserPriority};

    #[test]
    fn builder_requires_classes() {
        let result = CatalogBuilder::new().build();
        assert!(matches!(result, Err(CatalogError::EmptyCatalog)));
    }

    #[test]
    fn builder_rejects_duplicates() {
        let result = CatalogBuilder::new()
            .class(reference::up0())
            .class(reference::up0())
            .build();

        assert!(matches!(
            result,
            Err(CatalogError::DuplicateClass {
                id: UserPriority::Up0
            })
        ));
    }

    #[test]
    fn builder_reports_violations_across_classes() {
        let mut broken_up0 = reference::up0();
        broken_up0.states[0] = StateParams::new(0.125, 0.5, 0.5, 0.5);
        let mut broken_up5 = reference::up5();
        broken_up5.steady_state = [0.2, 0.2, 0.2];

        let result = CatalogBuilder::new()
            .class(broken_up0)
            .class(broken_up5)
            .build();

        match result {
            Err(CatalogError::InvalidModelDefinition { violations }) => {
                assert_eq!(violations.len(), 2);
                assert!(violations.iter().any(|v| matches!(
                    v,
                    ModelViolation::OutcomesNotNormalized {
                        class: UserPriority::Up0,
                        ..
                    }
                )));
                assert!(violations.iter().any(|v| matches!(
                    v,
                    ModelViolation::SteadyStateNotNormalized {
                        class: UserPriority::Up5,
                        ..
                    }
                )));
            }
            other => panic!("Expected InvalidModelDefinition, got {other:?}"),
        }
    }

    #[test]
    fn builder_accepts_extension_classes() {
        let mut up3 = reference::up0();
        up3.id = UserPriority::Up3;
        up3.name = "UP3".to_string();

        let catalog = CatalogBuilder::new()
            .classes(reference::all())
            .class(up3)
            .build()
            .unwrap();

        assert_eq!(catalog.len(), 3);
        assert!(catalog.contains(UserPriority::Up3));
    }

    #[test]
    fn invalid_definition_message_lists_violations() {
        let mut broken = reference::up0();
        broken.steady_state = [1.0, 1.0, 1.0];

        let err = CatalogBuilder::new().class(broken).build().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("1 violation"));
        assert!(message.contains("UP0: steady-state distribution sums to 3"));
    }
}
