//! Effect sources and priority ordering.
//!
//! Every dispatched hook is paired with the statistic that owns it. The owner
//! supplies the level or value that per-level magnitude ranges scale with.

use std::cmp::Reverse;
use std::sync::Arc;

use skirmish_stats::{
    Character, EffectsOnCharacter, StaticStatisticType, StatisticCalculation, StatisticHooks,
    StatisticKey, StatisticType, StatusEffectType, VariableStatisticType,
};

// =============================================================================
// Effect Source
// =============================================================================

/// The statistic owning a hook, with its level or value on one character.
#[derive(Debug, Clone)]
pub enum EffectSource {
    /// A status effect and its level.
    StatusEffect {
        /// Definition.
        kind: Arc<StatusEffectType>,
        /// Level on the character.
        level: i32,
    },
    /// A variable statistic and its current value.
    Variable {
        /// Definition.
        kind: Arc<VariableStatisticType>,
        /// Current value on the character.
        value: i32,
    },
    /// A static statistic and its calculated value.
    Static {
        /// Definition.
        kind: Arc<StaticStatisticType>,
        /// Calculated value on the character.
        level: i32,
    },
}

impl EffectSource {
    /// Reads the owner's level or value from `character`.
    ///
    /// Status levels and variable values come from the character; static
    /// statistics go through `calculation`.
    #[must_use]
    pub fn resolve(
        kind: &StatisticType,
        character: &Character,
        calculation: &dyn StatisticCalculation,
    ) -> Self {
        match kind {
            StatisticType::StatusEffect(kind) => Self::StatusEffect {
                level: character.status_level(kind.id),
                kind: Arc::clone(kind),
            },
            StatisticType::Variable(kind) => Self::Variable {
                value: character.variable_value(kind.id),
                kind: Arc::clone(kind),
            },
            StatisticType::Static(kind) => Self::Static {
                level: calculation.calculate(character, kind.key()),
                kind: Arc::clone(kind),
            },
        }
    }

    /// The level or value per-level ranges scale with.
    #[must_use]
    pub fn level_or_value(&self) -> i32 {
        match self {
            Self::StatusEffect { level, .. } | Self::Static { level, .. } => *level,
            Self::Variable { value, .. } => *value,
        }
    }

    /// Key of the owning statistic.
    #[must_use]
    pub fn key(&self) -> StatisticKey {
        match self {
            Self::StatusEffect { kind, .. } => kind.key(),
            Self::Variable { kind, .. } => kind.key(),
            Self::Static { kind, .. } => kind.key(),
        }
    }

    /// Hooks of the owning statistic.
    #[must_use]
    pub fn hooks(&self) -> &StatisticHooks {
        match self {
            Self::StatusEffect { kind, .. } => &kind.hooks,
            Self::Variable { kind, .. } => &kind.hooks,
            Self::Static { kind, .. } => &kind.hooks,
        }
    }
}

// =============================================================================
// Priority Ordering
// =============================================================================

/// Anything dispatched in priority order.
pub trait Prioritized {
    /// Dispatch priority; higher runs earlier.
    fn priority(&self) -> i32;
}

impl<L: ?Sized> Prioritized for EffectsOnCharacter<L> {
    fn priority(&self) -> i32 {
        EffectsOnCharacter::priority(self)
    }
}

impl<T: Prioritized + ?Sized> Prioritized for Arc<T> {
    fn priority(&self) -> i32 {
        (**self).priority()
    }
}

/// Sorts by descending priority, keeping the order of equal priorities.
pub fn sort_by_priority<T: Prioritized>(items: &mut [T]) {
    items.sort_by_key(|item| Reverse(item.priority()));
}
