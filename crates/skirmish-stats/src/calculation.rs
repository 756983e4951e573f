//! Statistic calculation contract.
//!
//! The aggregation formula that folds abilities, equipment and status effects
//! into an effective statistic value belongs to the surrounding game. The
//! combat engine only consumes [`StatisticCalculation`].

use crate::character::Character;
use crate::id::StatisticKey;

/// Computes the effective integer value of a statistic on a character.
///
/// Implementations must be pure: no side effects, same answer for the same
/// character state. The engine calls this often (priorities, alacrity,
/// resistances, percentage magnitudes).
pub trait StatisticCalculation: Send + Sync {
    /// Effective value of `statistic` on `character`.
    ///
    /// For variable statistics this is the maximum, not the current value.
    fn calculate(&self, character: &Character, statistic: StatisticKey) -> i32;
}

/// Reads stored values straight off the character.
///
/// - static and variable keys: the base value (zero if absent)
/// - status-effect keys: the current level
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseStatisticCalculation;

impl StatisticCalculation for BaseStatisticCalculation {
    fn calculate(&self, character: &Character, statistic: StatisticKey) -> i32 {
        match statistic {
            StatisticKey::Static(id) | StatisticKey::Variable(id) => {
                character.base_value(id).unwrap_or(0)
            }
            StatisticKey::StatusEffect(id) => character.status_level(id),
        }
    }
}
