//! Identifier types for characters, statistics and effect hooks.
//!
//! Definitions loaded by the factory layer reference each other by identifier
//! rather than by owning pointer. A status effect whose round-end hook lowers
//! its own level would otherwise form a reference cycle.
//!
//! # Example
//!
//! ```
//! use skirmish_stats::id::{CharacterId, StatisticKey, StatisticTypeId};
//!
//! let hp = StatisticKey::Variable(StatisticTypeId::new(1));
//! assert_eq!(hp.id().as_u64(), 1);
//! assert!(CharacterId::new(1) < CharacterId::new(2));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Character Identification
// =============================================================================

/// Unique identifier for a character within a game zone.
///
/// Character IDs are ordered by their numeric value. The zone iterates
/// characters in that order, which keeps every random draw sequence
/// reproducible under a fixed seed.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CharacterId(u64);

impl CharacterId {
    /// Creates a new `CharacterId` from a raw `u64` value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` value of this identifier.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CharacterId({})", self.0)
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CharacterId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

// =============================================================================
// Statistic Identification
// =============================================================================

/// Identifier of a statistic type definition.
///
/// Unique across all three statistic variants in a catalog.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StatisticTypeId(u64);

impl StatisticTypeId {
    /// Creates a new `StatisticTypeId` from a raw `u64` value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` value of this identifier.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for StatisticTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StatisticTypeId({})", self.0)
    }
}

impl fmt::Display for StatisticTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for StatisticTypeId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

/// Reference to a statistic together with its variant.
///
/// The variant decides how a statistic is read and altered on a character:
/// static statistics only have a base value, variable statistics have a
/// current value that moves between zero and a calculated maximum, and
/// status effects have a level.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id")]
pub enum StatisticKey {
    /// A static statistic (strength, fire resistance, ...).
    Static(StatisticTypeId),
    /// A variable statistic with a current value (health, mana, ...).
    Variable(StatisticTypeId),
    /// A status effect with a level (burning, haste, ...).
    StatusEffect(StatisticTypeId),
}

impl StatisticKey {
    /// Returns the identifier of the referenced statistic.
    #[must_use]
    pub const fn id(self) -> StatisticTypeId {
        match self {
            Self::Static(id) | Self::Variable(id) | Self::StatusEffect(id) => id,
        }
    }
}

impl fmt::Display for StatisticKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(id) => write!(f, "static:{id}"),
            Self::Variable(id) => write!(f, "variable:{id}"),
            Self::StatusEffect(id) => write!(f, "status:{id}"),
        }
    }
}

// =============================================================================
// Effect Identification
// =============================================================================

/// Name of an effect hook.
///
/// Turn-phase dispatch de-duplicates hooks by this identifier, so a hook shared
/// by several statistics on the same character fires once.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EffectId(String);

impl EffectId {
    /// Creates a new `EffectId` from a string.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    /// Returns the effect ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EffectId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for EffectId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
