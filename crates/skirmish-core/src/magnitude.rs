//! Magnitude resolution.
//!
//! [`StatisticMagnitudeEffectCalculation`] turns a declarative
//! [`StatisticChangeMagnitude`] into one integer delta for one character:
//!
//! 1. Sample the base amount: one draw from the absolute range plus one draw
//!    from the per-level range for every point of the source's level or value
//! 2. Scale it by the amount type and round half up
//! 3. Mitigate it by elemental resistance if the magnitude is damage
//!
//! Every draw comes from the caller's [`RandomSource`] via `next_f64`.

use std::sync::Arc;

use skirmish_stats::{
    AmountType, Character, EffectType, MagnitudeRange, Number, RandomSource,
    StatisticCalculation, StatisticChangeMagnitude, StatisticKey,
};

use crate::error::CombatError;
use crate::resistance::DamageResistanceCalculation;

/// Rounds half up and saturates at the `i32` bounds.
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn round_half_up(value: f64) -> i32 {
    // Float-to-int casts saturate; NaN becomes 0.
    (value + 0.5).floor() as i32
}

fn draw<T: Number>(range: &MagnitudeRange<T>, rng: &mut dyn RandomSource) -> f64 {
    range.sample(rng.next_f64())
}

/// Resolves magnitudes into deltas.
#[derive(Clone)]
pub struct StatisticMagnitudeEffectCalculation {
    calculation: Arc<dyn StatisticCalculation>,
    damage: DamageResistanceCalculation,
}

impl StatisticMagnitudeEffectCalculation {
    /// Creates a calculation; damage resistance reads through the same
    /// statistic calculation.
    #[must_use]
    pub fn new(calculation: Arc<dyn StatisticCalculation>) -> Self {
        let damage = DamageResistanceCalculation::new(Arc::clone(&calculation));
        Self {
            calculation,
            damage,
        }
    }

    /// The statistic calculation used for maxima and resistances.
    #[must_use]
    pub fn calculation(&self) -> &Arc<dyn StatisticCalculation> {
        &self.calculation
    }

    /// Samples the unscaled base amount of a magnitude.
    ///
    /// A negative `level_or_value` draws nothing from the per-level range.
    pub fn base_effect<T: Number>(
        magnitude: &StatisticChangeMagnitude<T>,
        level_or_value: i32,
        rng: &mut dyn RandomSource,
    ) -> f64 {
        let mut base = 0.0;
        if let Some(range) = &magnitude.absolute {
            base += draw(range, rng);
        }
        if let Some(range) = &magnitude.per_level {
            for _ in 0..level_or_value.max(0) {
                base += draw(range, rng);
            }
        }
        base
    }

    /// Computes the delta one magnitude produces on `character`.
    ///
    /// # Arguments
    ///
    /// * `source` - Statistic owning the hook the magnitude belongs to
    /// * `magnitude` - The declarative change
    /// * `level_or_value` - The source's status level, current value or
    ///   calculated value
    /// * `character` - Character the delta is computed for
    /// * `rng` - Source of every draw
    ///
    /// # Errors
    ///
    /// Returns [`CombatError::InvalidArgument`] if a percentage magnitude has
    /// no effected statistic, and [`CombatError::EntityDeleted`] if damage is
    /// computed for a deleted character.
    pub fn get_effect<T: Number>(
        &self,
        source: StatisticKey,
        magnitude: &StatisticChangeMagnitude<T>,
        level_or_value: i32,
        character: &Character,
        rng: &mut dyn RandomSource,
    ) -> Result<i32, CombatError> {
        let scaled_by = match (magnitude.amount_type, magnitude.effected) {
            (AmountType::Value, _) => None,
            (_, Some(effected)) => Some(effected),
            (amount_type, None) => {
                return Err(CombatError::invalid_argument(format!(
                    "{amount_type:?} magnitude of {source} names no effected statistic"
                )));
            }
        };

        let base = Self::base_effect(magnitude, level_or_value, rng);
        let amount = match (magnitude.amount_type, scaled_by) {
            (AmountType::PercentOfCurrent, Some(effected)) => {
                round_half_up(f64::from(character.current_value(effected)) * base)
            }
            (AmountType::PercentOfMaximum, Some(effected)) => {
                let maximum = self.calculation.calculate(character, effected);
                round_half_up(f64::from(maximum) * base)
            }
            _ => round_half_up(base),
        };

        let delta = match &magnitude.effect_type {
            EffectType::Alteration => amount,
            EffectType::Damage { element } => {
                self.damage.calculate_effective_change(character, amount, element)?
            }
        };

        tracing::trace!(
            source = %source,
            character = %character.id(),
            level_or_value,
            base,
            amount,
            delta,
            "magnitude resolved"
        );
        Ok(delta)
    }
}
