//! Characters taking part in combat.
//!
//! A [`Character`] is plain data: base values for static statistics and
//! variable maxima, current values of variable statistics, status-effect
//! levels, passive ability names and a free-form data bag. All combat
//! mutations go through [`Character::alter`].
//!
//! # Example
//!
//! ```
//! use skirmish_stats::character::{Character, CharacterFlags};
//! use skirmish_stats::id::{CharacterId, StatisticKey, StatisticTypeId};
//!
//! let hp = StatisticTypeId::new(1);
//! let mut hero = Character::new(CharacterId::new(1), "Ayla")
//!     .with_base_value(hp, 40)
//!     .with_variable_value(hp, 40)
//!     .with_flags(CharacterFlags::PLAYER_CONTROLLED);
//!
//! hero.alter(StatisticKey::Variable(hp), -12).unwrap();
//! assert_eq!(hero.variable_value(hp), 28);
//! assert!(hero.is_player_controlled());
//! ```

use std::collections::BTreeMap;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::StatError;
use crate::id::{CharacterId, StatisticKey, StatisticTypeId};

bitflags! {
    /// Lifecycle and control flags of a character.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct CharacterFlags: u8 {
        /// Skipped when a round's turn order is produced.
        const INACTIVE = 1;
        /// Removed from play; resistance lookups on it fail.
        const DELETED = 1 << 1;
        /// Turns are handed to the player instead of the AI.
        const PLAYER_CONTROLLED = 1 << 2;
    }
}

/// A combat participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    id: CharacterId,
    name: String,
    #[serde(default)]
    flags: CharacterFlags,
    /// Static statistic values and variable statistic maxima.
    #[serde(default)]
    base_values: BTreeMap<StatisticTypeId, i32>,
    #[serde(default)]
    variable_values: BTreeMap<StatisticTypeId, i32>,
    #[serde(default)]
    status_levels: BTreeMap<StatisticTypeId, i32>,
    #[serde(default)]
    abilities: Vec<String>,
    #[serde(default)]
    data: BTreeMap<String, serde_json::Value>,
}

impl Character {
    /// Creates a character with no statistics.
    #[must_use]
    pub fn new(id: CharacterId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            flags: CharacterFlags::empty(),
            base_values: BTreeMap::new(),
            variable_values: BTreeMap::new(),
            status_levels: BTreeMap::new(),
            abilities: Vec::new(),
            data: BTreeMap::new(),
        }
    }

    // ========================================================================
    // Builders
    // ========================================================================

    /// Sets a base value.
    #[must_use]
    pub fn with_base_value(mut self, id: StatisticTypeId, value: i32) -> Self {
        self.base_values.insert(id, value);
        self
    }

    /// Sets the current value of a variable statistic.
    #[must_use]
    pub fn with_variable_value(mut self, id: StatisticTypeId, value: i32) -> Self {
        self.variable_values.insert(id, value);
        self
    }

    /// Sets a status-effect level.
    #[must_use]
    pub fn with_status_level(mut self, id: StatisticTypeId, level: i32) -> Self {
        self.set_status_level(id, level);
        self
    }

    /// Replaces the flags.
    #[must_use]
    pub fn with_flags(mut self, flags: CharacterFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Adds a passive ability.
    #[must_use]
    pub fn with_ability(mut self, ability: &str) -> Self {
        self.abilities.push(ability.to_string());
        self
    }

    // ========================================================================
    // Identity and Flags
    // ========================================================================

    /// Identifier.
    #[must_use]
    pub fn id(&self) -> CharacterId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current flags.
    #[must_use]
    pub fn flags(&self) -> CharacterFlags {
        self.flags
    }

    /// Sets or clears a flag.
    pub fn set_flag(&mut self, flag: CharacterFlags, value: bool) {
        self.flags.set(flag, value);
    }

    /// Returns true if the character sits this round out.
    #[must_use]
    pub fn is_inactive(&self) -> bool {
        self.flags.contains(CharacterFlags::INACTIVE)
    }

    /// Returns true if the character was removed from play.
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.flags.contains(CharacterFlags::DELETED)
    }

    /// Returns true if the player controls this character.
    #[must_use]
    pub fn is_player_controlled(&self) -> bool {
        self.flags.contains(CharacterFlags::PLAYER_CONTROLLED)
    }

    /// Passive ability names.
    #[must_use]
    pub fn abilities(&self) -> &[String] {
        &self.abilities
    }

    // ========================================================================
    // Statistics
    // ========================================================================

    /// Base value of a static statistic or maximum of a variable one.
    #[must_use]
    pub fn base_value(&self, id: StatisticTypeId) -> Option<i32> {
        self.base_values.get(&id).copied()
    }

    /// Base values in identifier order.
    pub fn base_values(&self) -> impl Iterator<Item = (StatisticTypeId, i32)> + '_ {
        self.base_values.iter().map(|(id, value)| (*id, *value))
    }

    /// Current value of a variable statistic, zero if absent.
    #[must_use]
    pub fn variable_value(&self, id: StatisticTypeId) -> i32 {
        self.variable_values.get(&id).copied().unwrap_or(0)
    }

    /// Variable statistics in identifier order.
    pub fn variable_values(&self) -> impl Iterator<Item = (StatisticTypeId, i32)> + '_ {
        self.variable_values.iter().map(|(id, value)| (*id, *value))
    }

    /// Level of a status effect, zero if absent.
    #[must_use]
    pub fn status_level(&self, id: StatisticTypeId) -> i32 {
        self.status_levels.get(&id).copied().unwrap_or(0)
    }

    /// Status effects in identifier order.
    pub fn status_levels(&self) -> impl Iterator<Item = (StatisticTypeId, i32)> + '_ {
        self.status_levels.iter().map(|(id, level)| (*id, *level))
    }

    /// Sets a status-effect level; level zero removes the status.
    pub fn set_status_level(&mut self, id: StatisticTypeId, level: i32) {
        if level == 0 {
            self.status_levels.remove(&id);
        } else {
            self.status_levels.insert(id, level);
        }
    }

    /// The stored value behind a key: current value, level or base value.
    #[must_use]
    pub fn current_value(&self, key: StatisticKey) -> i32 {
        match key {
            StatisticKey::Static(id) => self.base_value(id).unwrap_or(0),
            StatisticKey::Variable(id) => self.variable_value(id),
            StatisticKey::StatusEffect(id) => self.status_level(id),
        }
    }

    /// Adds `delta` to the current value of a variable statistic.
    ///
    /// Absent variable statistics start at zero.
    pub fn alter_current_value(&mut self, id: StatisticTypeId, delta: i32) {
        let value = self.variable_values.entry(id).or_insert(0);
        *value = value.saturating_add(delta);
    }

    /// Applies a delta to the statistic behind `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::StaticNotAlterable`] for static statistics.
    pub fn alter(&mut self, key: StatisticKey, delta: i32) -> Result<(), StatError> {
        match key {
            StatisticKey::Static(id) => return Err(StatError::StaticNotAlterable(id)),
            StatisticKey::Variable(id) => self.alter_current_value(id, delta),
            StatisticKey::StatusEffect(id) => {
                let level = self.status_level(id).saturating_add(delta);
                self.set_status_level(id, level);
            }
        }
        Ok(())
    }

    // ========================================================================
    // Data Bag
    // ========================================================================

    /// Looks up a data bag entry.
    #[must_use]
    pub fn data(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key)
    }

    /// Stores a data bag entry, returning the previous value.
    pub fn set_data(&mut self, key: &str, value: serde_json::Value) -> Option<serde_json::Value> {
        self.data.insert(key.to_string(), value)
    }

    /// Removes a data bag entry.
    pub fn remove_data(&mut self, key: &str) -> Option<serde_json::Value> {
        self.data.remove(key)
    }
}
