//! Statistic type definitions.
//!
//! A statistic type is one of three variants:
//!
//! - [`StaticStatisticType`]: a value derived purely from the character's base
//!   values and abilities (strength, fire resistance, combat priority)
//! - [`VariableStatisticType`]: a value with a current amount that effects push
//!   around (health, mana); its calculated value is the maximum
//! - [`StatusEffectType`]: a level on the character (burning, haste)
//!
//! Every variant may carry three hooks, one per dispatch boundary. Which
//! boundary fires which hook is decided by the combat engine.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::effect::{RoundEndEffects, TurnEffects};
use crate::id::{StatisticKey, StatisticTypeId};

// =============================================================================
// Hooks
// =============================================================================

/// The optional effect hooks of a statistic type.
#[derive(Debug, Clone, Default)]
pub struct StatisticHooks {
    /// Fired once per round for every active character.
    pub on_round_end: Option<Arc<RoundEndEffects>>,
    /// Fired when the owning character starts its turn.
    pub on_turn_start: Option<Arc<TurnEffects>>,
    /// Fired when the owning character ends its turn.
    pub on_turn_end: Option<Arc<TurnEffects>>,
}

impl StatisticHooks {
    /// Hooks with nothing attached.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Attaches a round-end hook.
    #[must_use]
    pub fn with_round_end(mut self, effects: RoundEndEffects) -> Self {
        self.on_round_end = Some(Arc::new(effects));
        self
    }

    /// Attaches a turn-start hook.
    #[must_use]
    pub fn with_turn_start(mut self, effects: TurnEffects) -> Self {
        self.on_turn_start = Some(Arc::new(effects));
        self
    }

    /// Attaches a turn-end hook.
    #[must_use]
    pub fn with_turn_end(mut self, effects: TurnEffects) -> Self {
        self.on_turn_end = Some(Arc::new(effects));
        self
    }
}

// =============================================================================
// Elements
// =============================================================================

/// A damage element and the statistic holding resistance to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Element {
    /// Display name.
    pub name: String,
    /// Resistance percentage statistic.
    pub resistance: StatisticKey,
}

impl Element {
    /// Creates an element.
    #[must_use]
    pub fn new(name: &str, resistance: StatisticKey) -> Self {
        Self {
            name: name.to_string(),
            resistance,
        }
    }
}

// =============================================================================
// Statistic Variants
// =============================================================================

/// A statistic with no current value.
#[derive(Debug, Clone)]
pub struct StaticStatisticType {
    /// Identifier.
    pub id: StatisticTypeId,
    /// Display name.
    pub name: String,
    /// Effect hooks.
    pub hooks: StatisticHooks,
}

impl StaticStatisticType {
    /// Creates a static statistic without hooks.
    #[must_use]
    pub fn new(id: StatisticTypeId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            hooks: StatisticHooks::none(),
        }
    }

    /// Replaces the hooks.
    #[must_use]
    pub fn with_hooks(mut self, hooks: StatisticHooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// Key referencing this statistic.
    #[must_use]
    pub const fn key(&self) -> StatisticKey {
        StatisticKey::Static(self.id)
    }
}

/// A statistic with a current value.
#[derive(Debug, Clone)]
pub struct VariableStatisticType {
    /// Identifier.
    pub id: StatisticTypeId,
    /// Display name.
    pub name: String,
    /// Effect hooks.
    pub hooks: StatisticHooks,
}

impl VariableStatisticType {
    /// Creates a variable statistic without hooks.
    #[must_use]
    pub fn new(id: StatisticTypeId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            hooks: StatisticHooks::none(),
        }
    }

    /// Replaces the hooks.
    #[must_use]
    pub fn with_hooks(mut self, hooks: StatisticHooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// Key referencing this statistic.
    #[must_use]
    pub const fn key(&self) -> StatisticKey {
        StatisticKey::Variable(self.id)
    }
}

/// A status effect, present on a character with a level.
#[derive(Debug, Clone)]
pub struct StatusEffectType {
    /// Identifier.
    pub id: StatisticTypeId,
    /// Display name.
    pub name: String,
    /// Statistic holding the resistance percentage against this status.
    pub resistance: StatisticKey,
    /// Effect hooks.
    pub hooks: StatisticHooks,
}

impl StatusEffectType {
    /// Creates a status effect without hooks.
    #[must_use]
    pub fn new(id: StatisticTypeId, name: &str, resistance: StatisticKey) -> Self {
        Self {
            id,
            name: name.to_string(),
            resistance,
            hooks: StatisticHooks::none(),
        }
    }

    /// Replaces the hooks.
    #[must_use]
    pub fn with_hooks(mut self, hooks: StatisticHooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// Key referencing this status effect.
    #[must_use]
    pub const fn key(&self) -> StatisticKey {
        StatisticKey::StatusEffect(self.id)
    }
}

/// Any statistic type.
#[derive(Debug, Clone)]
pub enum StatisticType {
    /// See [`StaticStatisticType`].
    Static(Arc<StaticStatisticType>),
    /// See [`VariableStatisticType`].
    Variable(Arc<VariableStatisticType>),
    /// See [`StatusEffectType`].
    StatusEffect(Arc<StatusEffectType>),
}

impl StatisticType {
    /// Identifier of the wrapped definition.
    #[must_use]
    pub fn id(&self) -> StatisticTypeId {
        match self {
            Self::Static(kind) => kind.id,
            Self::Variable(kind) => kind.id,
            Self::StatusEffect(kind) => kind.id,
        }
    }

    /// Key referencing the wrapped definition.
    #[must_use]
    pub fn key(&self) -> StatisticKey {
        match self {
            Self::Static(kind) => kind.key(),
            Self::Variable(kind) => kind.key(),
            Self::StatusEffect(kind) => kind.key(),
        }
    }

    /// Display name of the wrapped definition.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Static(kind) => &kind.name,
            Self::Variable(kind) => &kind.name,
            Self::StatusEffect(kind) => &kind.name,
        }
    }

    /// Hooks of the wrapped definition.
    #[must_use]
    pub fn hooks(&self) -> &StatisticHooks {
        match self {
            Self::Static(kind) => &kind.hooks,
            Self::Variable(kind) => &kind.hooks,
            Self::StatusEffect(kind) => &kind.hooks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::StatisticChangeMagnitude;

    #[test]
    fn keys_match_variant() {
        let id = StatisticTypeId::new(3);
        let resist = StatisticKey::Static(StatisticTypeId::new(30));

        assert_eq!(StaticStatisticType::new(id, "might").key(), StatisticKey::Static(id));
        assert_eq!(VariableStatisticType::new(id, "hp").key(), StatisticKey::Variable(id));
        assert_eq!(
            StatusEffectType::new(id, "burning", resist).key(),
            StatisticKey::StatusEffect(id)
        );
    }

    #[test]
    fn statistic_type_delegates_to_variant() {
        let id = StatisticTypeId::new(5);
        let hooks = StatisticHooks::none().with_turn_start(TurnEffects::silent(
            "pulse",
            1,
            vec![StatisticChangeMagnitude::value()],
        ));
        let kind = StatisticType::Variable(Arc::new(
            VariableStatisticType::new(id, "focus").with_hooks(hooks),
        ));

        assert_eq!(kind.id(), id);
        assert_eq!(kind.name(), "focus");
        assert!(kind.hooks().on_turn_start.is_some());
        assert!(kind.hooks().on_round_end.is_none());
        assert!(kind.hooks().on_turn_end.is_none());
    }

    #[test]
    fn element_serializes_resistance_key() {
        let element = Element::new("frost", StatisticKey::Static(StatisticTypeId::new(12)));
        let json = serde_json::to_string(&element).unwrap();
        assert_eq!(json, r#"{"name":"frost","resistance":{"kind":"Static","id":12}}"#);
    }
}
