//! Turn order and action points.
//!
//! [`ActiveCharactersProvider`] produces the acting order of a round:
//!
//! 1. Drop characters flagged inactive
//! 2. Compute each character's combat priority and action points
//! 3. Bucket by priority, highest bucket first
//! 4. Shuffle ties: every member of a bucket with more than one character
//!    draws one `next_f32`, and the bucket is emitted by descending draw
//!
//! Action points are the base statistic plus a bonus earned from alacrity in
//! tiers. A tier pays out unconditionally once alacrity reaches its upper
//! bound and otherwise pays out with probability proportional to how far
//! alacrity reaches into it. Every following tier starts at half the previous
//! upper bound and ends at twice it, so returns diminish without a cap.
//!
//! # Draw order
//!
//! All bonus draws happen first, in ascending character id order. Tie-break
//! draws follow, bucket by bucket from the highest priority down.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use skirmish_stats::{CharacterId, GameZone, RandomSource, StatisticCalculation};

use crate::config::{ActionPointTier, RoundConfig};
use crate::error::CombatError;

// =============================================================================
// Round Data
// =============================================================================

/// Per-character state of one round.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoundData {
    combat_priority: i32,
    action_points: i32,
    /// Game-specific per-round counters.
    #[serde(default)]
    entries: BTreeMap<String, i32>,
}

impl RoundData {
    /// Creates round data with no extra entries.
    #[must_use]
    pub fn new(combat_priority: i32, action_points: i32) -> Self {
        Self {
            combat_priority,
            action_points,
            entries: BTreeMap::new(),
        }
    }

    /// Combat priority the turn order was built from.
    #[must_use]
    pub fn combat_priority(&self) -> i32 {
        self.combat_priority
    }

    /// Action points left this round.
    #[must_use]
    pub fn action_points(&self) -> i32 {
        self.action_points
    }

    /// Spends action points.
    ///
    /// # Errors
    ///
    /// Returns [`CombatError::InvalidArgument`] if `amount` is negative or
    /// exceeds the points left.
    pub fn spend_action_points(&mut self, amount: i32) -> Result<(), CombatError> {
        if amount < 0 {
            return Err(CombatError::invalid_argument(format!(
                "cannot spend a negative amount of action points ({amount})"
            )));
        }
        if amount > self.action_points {
            return Err(CombatError::invalid_argument(format!(
                "spending {amount} action points with {} left",
                self.action_points
            )));
        }
        self.action_points -= amount;
        Ok(())
    }

    /// Reads an extra entry.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<i32> {
        self.entries.get(key).copied()
    }

    /// Writes an extra entry, returning the previous value.
    pub fn set(&mut self, key: &str, value: i32) -> Option<i32> {
        self.entries.insert(key.to_string(), value)
    }
}

/// One entry of the turn order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnSlot {
    /// The acting character.
    pub character: CharacterId,
    /// Its data for this round.
    pub round: RoundData,
}

// =============================================================================
// Provider
// =============================================================================

/// Produces the turn order of a round.
#[derive(Clone)]
pub struct ActiveCharactersProvider {
    config: RoundConfig,
    calculation: Arc<dyn StatisticCalculation>,
}

impl ActiveCharactersProvider {
    /// Creates a provider.
    ///
    /// # Errors
    ///
    /// Returns [`CombatError::InvalidArgument`] if the configuration's tier
    /// bounds are invalid.
    pub fn new(
        config: RoundConfig,
        calculation: Arc<dyn StatisticCalculation>,
    ) -> Result<Self, CombatError> {
        config.validate()?;
        Ok(Self {
            config,
            calculation,
        })
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    /// Produces the active characters of `zone` in acting order.
    pub fn generate_in_turn_order(
        &self,
        zone: &GameZone,
        rng: &mut dyn RandomSource,
    ) -> Vec<TurnSlot> {
        let mut buckets: BTreeMap<i32, Vec<TurnSlot>> = BTreeMap::new();
        for character in zone.characters().filter(|c| !c.is_inactive()) {
            let priority = self.calculation.calculate(character, self.config.combat_priority);
            let alacrity = self.calculation.calculate(character, self.config.alacrity);
            let base = self.calculation.calculate(character, self.config.base_action_points);
            let bonus = bonus_action_points(alacrity, self.config.action_point_tier, rng);

            tracing::trace!(
                character = %character.id(),
                priority,
                alacrity,
                base,
                bonus,
                "round data computed"
            );
            buckets.entry(priority).or_default().push(TurnSlot {
                character: character.id(),
                round: RoundData::new(priority, base.saturating_add(bonus)),
            });
        }

        let mut order = Vec::with_capacity(zone.len());
        for (priority, bucket) in buckets.into_iter().rev() {
            if bucket.len() == 1 {
                order.extend(bucket);
                continue;
            }

            let mut drawn: Vec<(f32, TurnSlot)> =
                bucket.into_iter().map(|slot| (rng.next_f32(), slot)).collect();
            drawn.sort_by(|a, b| b.0.total_cmp(&a.0));
            tracing::trace!(priority, tied = drawn.len(), "priority tie broken");
            order.extend(drawn.into_iter().map(|(_, slot)| slot));
        }

        tracing::debug!(
            active = order.len(),
            skipped = zone.len() - order.len(),
            "turn order produced"
        );
        order
    }
}

/// Bonus action points earned from `alacrity`.
///
/// Draws one `next_f32` for every tier alacrity reaches into without filling
/// it. Alacrity at or below the first tier's minimum draws nothing.
#[allow(clippy::cast_precision_loss)]
pub fn bonus_action_points(
    alacrity: i32,
    tier: ActionPointTier,
    rng: &mut dyn RandomSource,
) -> i32 {
    let alacrity = i64::from(alacrity);
    let mut range_min = tier.range_min;
    let mut range_max = tier.range_max;
    let mut bonus = 0;

    while alacrity > range_min {
        if alacrity >= range_max {
            bonus += 1;
        } else {
            let reach = (alacrity - range_min) as f32 / (range_max - range_min) as f32;
            if reach >= rng.next_f32() {
                bonus += 1;
            }
        }
        range_min = range_max / 2;
        range_max = range_max.saturating_mul(2);
    }
    bonus
}
