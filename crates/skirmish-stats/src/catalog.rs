//! Registry of statistic type definitions.
//!
//! The catalog holds what the factory layer authored: every static statistic,
//! variable statistic and status effect, shared behind `Arc`. Characters only
//! store identifiers and numbers; dispatchers resolve identifiers back to
//! definitions (and their hooks) through the catalog.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::StatError;
use crate::id::{StatisticKey, StatisticTypeId};
use crate::statistic::{StaticStatisticType, StatisticType, StatusEffectType, VariableStatisticType};

/// Statistic definitions keyed by identifier.
///
/// Identifiers are unique across the three variants. Iteration runs in
/// ascending identifier order.
#[derive(Debug, Clone, Default)]
pub struct StatisticCatalog {
    statics: BTreeMap<StatisticTypeId, Arc<StaticStatisticType>>,
    variables: BTreeMap<StatisticTypeId, Arc<VariableStatisticType>>,
    status_effects: BTreeMap<StatisticTypeId, Arc<StatusEffectType>>,
}

impl StatisticCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_unused(&self, id: StatisticTypeId) -> Result<(), StatError> {
        if self.statics.contains_key(&id)
            || self.variables.contains_key(&id)
            || self.status_effects.contains_key(&id)
        {
            return Err(StatError::DuplicateStatistic(id));
        }
        Ok(())
    }

    /// Registers a static statistic.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::DuplicateStatistic`] if the identifier is taken.
    pub fn register_static(
        &mut self,
        kind: StaticStatisticType,
    ) -> Result<Arc<StaticStatisticType>, StatError> {
        self.ensure_unused(kind.id)?;
        let kind = Arc::new(kind);
        self.statics.insert(kind.id, Arc::clone(&kind));
        Ok(kind)
    }

    /// Registers a variable statistic.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::DuplicateStatistic`] if the identifier is taken.
    pub fn register_variable(
        &mut self,
        kind: VariableStatisticType,
    ) -> Result<Arc<VariableStatisticType>, StatError> {
        self.ensure_unused(kind.id)?;
        let kind = Arc::new(kind);
        self.variables.insert(kind.id, Arc::clone(&kind));
        Ok(kind)
    }

    /// Registers a status effect.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::DuplicateStatistic`] if the identifier is taken.
    pub fn register_status_effect(
        &mut self,
        kind: StatusEffectType,
    ) -> Result<Arc<StatusEffectType>, StatError> {
        self.ensure_unused(kind.id)?;
        let kind = Arc::new(kind);
        self.status_effects.insert(kind.id, Arc::clone(&kind));
        Ok(kind)
    }

    /// Looks up a static statistic.
    #[must_use]
    pub fn static_statistic(&self, id: StatisticTypeId) -> Option<&Arc<StaticStatisticType>> {
        self.statics.get(&id)
    }

    /// Looks up a variable statistic.
    #[must_use]
    pub fn variable(&self, id: StatisticTypeId) -> Option<&Arc<VariableStatisticType>> {
        self.variables.get(&id)
    }

    /// Looks up a status effect.
    #[must_use]
    pub fn status_effect(&self, id: StatisticTypeId) -> Option<&Arc<StatusEffectType>> {
        self.status_effects.get(&id)
    }

    /// Resolves a key to its definition.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::UnknownStatistic`] if nothing is registered under
    /// the key's identifier and variant.
    pub fn resolve(&self, key: StatisticKey) -> Result<StatisticType, StatError> {
        let resolved = match key {
            StatisticKey::Static(id) => self.statics.get(&id).cloned().map(StatisticType::Static),
            StatisticKey::Variable(id) => {
                self.variables.get(&id).cloned().map(StatisticType::Variable)
            }
            StatisticKey::StatusEffect(id) => self
                .status_effects
                .get(&id)
                .cloned()
                .map(StatisticType::StatusEffect),
        };
        resolved.ok_or(StatError::UnknownStatistic(key))
    }

    /// Static statistics in identifier order.
    pub fn statics(&self) -> impl Iterator<Item = &Arc<StaticStatisticType>> {
        self.statics.values()
    }

    /// Variable statistics in identifier order.
    pub fn variables(&self) -> impl Iterator<Item = &Arc<VariableStatisticType>> {
        self.variables.values()
    }

    /// Status effects in identifier order.
    pub fn status_effects(&self) -> impl Iterator<Item = &Arc<StatusEffectType>> {
        self.status_effects.values()
    }

    /// Total number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.statics.len() + self.variables.len() + self.status_effects.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resist() -> StatisticKey {
        StatisticKey::Static(StatisticTypeId::new(100))
    }

    #[test]
    fn registered_definitions_resolve() {
        let mut catalog = StatisticCatalog::new();
        catalog
            .register_variable(VariableStatisticType::new(StatisticTypeId::new(1), "hp"))
            .unwrap();
        catalog
            .register_status_effect(StatusEffectType::new(StatisticTypeId::new(2), "burning", resist()))
            .unwrap();

        let hp = catalog.resolve(StatisticKey::Variable(StatisticTypeId::new(1))).unwrap();
        assert_eq!(hp.name(), "hp");
        assert_eq!(catalog.len(), 2);
        assert!(catalog.status_effect(StatisticTypeId::new(2)).is_some());
    }

    #[test]
    fn identifiers_are_unique_across_variants() {
        let mut catalog = StatisticCatalog::new();
        catalog
            .register_static(StaticStatisticType::new(StatisticTypeId::new(1), "might"))
            .unwrap();
        let duplicate =
            catalog.register_variable(VariableStatisticType::new(StatisticTypeId::new(1), "hp"));
        assert_eq!(
            duplicate.unwrap_err(),
            StatError::DuplicateStatistic(StatisticTypeId::new(1))
        );
    }

    #[test]
    fn resolving_wrong_variant_fails() {
        let mut catalog = StatisticCatalog::new();
        catalog
            .register_static(StaticStatisticType::new(StatisticTypeId::new(1), "might"))
            .unwrap();
        let key = StatisticKey::Variable(StatisticTypeId::new(1));
        assert_eq!(catalog.resolve(key).unwrap_err(), StatError::UnknownStatistic(key));
    }

    #[test]
    fn iteration_is_ordered_by_identifier() {
        let mut catalog = StatisticCatalog::new();
        for id in [5, 2, 9] {
            catalog
                .register_variable(VariableStatisticType::new(StatisticTypeId::new(id), "v"))
                .unwrap();
        }
        let ids: Vec<u64> = catalog.variables().map(|v| v.id.as_u64()).collect();
        assert_eq!(ids, vec![2, 5, 9]);
        assert!(!catalog.is_empty());
    }
}
