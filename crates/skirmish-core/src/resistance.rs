//! Resistance mitigation.
//!
//! Two calculators mitigate a change by a resistance percentage:
//!
//! - [`DamageResistanceCalculation`]: negative deltas against the element's
//!   resistance statistic; non-negative deltas pass through untouched
//! - [`StatusEffectResistanceCalculation`]: status-level deltas against the
//!   higher of the element's and the status type's resistance, optionally
//!   clamped by the character's current level
//!
//! Mitigation is `trunc(amount * (100 - resistance) / 100)`, computed in 64-bit
//! integers so it truncates toward zero. Resistances above 100 flip the sign
//! of the change; resistances below 0 amplify it.

use std::sync::Arc;

use skirmish_stats::{Character, Element, StatisticCalculation, StatusEffectType};

use crate::error::CombatError;

/// Applies a resistance percentage to an amount, truncating toward zero.
#[must_use]
pub fn mitigate(amount: i32, resistance: i32) -> i32 {
    let mitigated = i64::from(amount) * (100 - i64::from(resistance)) / 100;
    saturate(mitigated)
}

#[allow(clippy::cast_possible_truncation)]
fn saturate(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

// =============================================================================
// Damage Resistance
// =============================================================================

/// Mitigates damage by elemental resistance.
#[derive(Clone)]
pub struct DamageResistanceCalculation {
    calculation: Arc<dyn StatisticCalculation>,
}

impl DamageResistanceCalculation {
    /// Creates a calculator reading resistances through `calculation`.
    #[must_use]
    pub fn new(calculation: Arc<dyn StatisticCalculation>) -> Self {
        Self { calculation }
    }

    /// Returns the change after elemental resistance.
    ///
    /// Amounts of zero or more are returned unchanged without looking up any
    /// resistance.
    ///
    /// # Errors
    ///
    /// Returns [`CombatError::EntityDeleted`] if the character was removed
    /// from play.
    pub fn calculate_effective_change(
        &self,
        character: &Character,
        base_amount: i32,
        element: &Element,
    ) -> Result<i32, CombatError> {
        if character.is_deleted() {
            return Err(CombatError::EntityDeleted(character.id()));
        }
        if base_amount >= 0 {
            return Ok(base_amount);
        }

        let resistance = self.calculation.calculate(character, element.resistance);
        let change = mitigate(base_amount, resistance);
        tracing::trace!(
            character = %character.id(),
            element = %element.name,
            base_amount,
            resistance,
            change,
            "damage mitigated"
        );
        Ok(change)
    }
}

// =============================================================================
// Status Effect Resistance
// =============================================================================

/// Mitigates status-level changes by elemental or status resistance.
#[derive(Clone)]
pub struct StatusEffectResistanceCalculation {
    calculation: Arc<dyn StatisticCalculation>,
}

impl StatusEffectResistanceCalculation {
    /// Creates a calculator reading resistances through `calculation`.
    #[must_use]
    pub fn new(calculation: Arc<dyn StatisticCalculation>) -> Self {
        Self { calculation }
    }

    /// Returns the level change after resistance.
    ///
    /// The stronger of the two resistances applies. With `stop_at_zero`, the
    /// result is bounded by the negated current level: raised to at least
    /// `-level` when the level is negative, lowered to at most `-level` when
    /// it is positive.
    #[must_use]
    pub fn calculate_effective_change(
        &self,
        character: &Character,
        status_effect: &StatusEffectType,
        base_amount: i32,
        stop_at_zero: bool,
        element: &Element,
    ) -> i32 {
        let elemental = self.calculation.calculate(character, element.resistance);
        let specific = self.calculation.calculate(character, status_effect.resistance);
        let resistance = elemental.max(specific);
        let mut change = mitigate(base_amount, resistance);

        if stop_at_zero {
            let level = character.status_level(status_effect.id);
            let bound = level.saturating_neg();
            if level < 0 {
                change = change.max(bound);
            } else if level > 0 {
                change = change.min(bound);
            }
        }

        tracing::trace!(
            character = %character.id(),
            status = %status_effect.name,
            base_amount,
            resistance,
            stop_at_zero,
            change,
            "status change mitigated"
        );
        change
    }
}
