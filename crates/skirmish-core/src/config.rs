//! Round configuration.
//!
//! The statistics that drive turn order and action points are game content,
//! so they are named here rather than hard-coded in the engine. The struct
//! deserializes from whatever format the host loads its rules from.
//!
//! # Example
//!
//! ```
//! use skirmish_core::config::{ActionPointTier, RoundConfig};
//! use skirmish_stats::{StatisticKey, StatisticTypeId};
//!
//! let config = RoundConfig {
//!     alacrity: StatisticKey::Static(StatisticTypeId::new(21)),
//!     action_point_tier: ActionPointTier::new(0, 20),
//!     ..RoundConfig::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};
use skirmish_stats::{StatisticKey, StatisticTypeId};

use crate::error::CombatError;

/// Default statistic identifier of combat priority.
pub const DEFAULT_COMBAT_PRIORITY: StatisticTypeId = StatisticTypeId::new(1);
/// Default statistic identifier of alacrity.
pub const DEFAULT_ALACRITY: StatisticTypeId = StatisticTypeId::new(2);
/// Default statistic identifier of base action points.
pub const DEFAULT_BASE_ACTION_POINTS: StatisticTypeId = StatisticTypeId::new(3);

/// Bounds of the first bonus action point tier.
///
/// Each following tier starts at half the previous upper bound and ends at
/// twice it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPointTier {
    /// Alacrity above which the first tier starts paying out.
    pub range_min: i64,
    /// Alacrity at which the first tier pays out unconditionally.
    pub range_max: i64,
}

impl ActionPointTier {
    /// Creates tier bounds.
    #[must_use]
    pub const fn new(range_min: i64, range_max: i64) -> Self {
        Self {
            range_min,
            range_max,
        }
    }
}

impl Default for ActionPointTier {
    fn default() -> Self {
        Self::new(0, 10)
    }
}

/// Statistics and tiers used when a round's turn order is produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    /// Sort key of the turn order; higher acts first.
    pub combat_priority: StatisticKey,
    /// Converted into bonus action points.
    pub alacrity: StatisticKey,
    /// Action points every character gets before the bonus.
    pub base_action_points: StatisticKey,
    /// First bonus tier.
    pub action_point_tier: ActionPointTier,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            combat_priority: StatisticKey::Static(DEFAULT_COMBAT_PRIORITY),
            alacrity: StatisticKey::Static(DEFAULT_ALACRITY),
            base_action_points: StatisticKey::Static(DEFAULT_BASE_ACTION_POINTS),
            action_point_tier: ActionPointTier::default(),
        }
    }
}

impl RoundConfig {
    /// Checks the tier bounds.
    ///
    /// # Errors
    ///
    /// Returns [`CombatError::InvalidArgument`] if `range_min` is negative or
    /// `range_max` does not exceed it. Either would keep the tier loop from
    /// terminating.
    pub fn validate(&self) -> Result<(), CombatError> {
        let tier = self.action_point_tier;
        if tier.range_min < 0 {
            return Err(CombatError::invalid_argument(format!(
                "action point tier minimum must not be negative, got {}",
                tier.range_min
            )));
        }
        if tier.range_max <= tier.range_min {
            return Err(CombatError::invalid_argument(format!(
                "action point tier maximum {} must exceed minimum {}",
                tier.range_max, tier.range_min
            )));
        }
        Ok(())
    }
}
