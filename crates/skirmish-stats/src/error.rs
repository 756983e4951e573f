//! Errors raised by the data model.

use thiserror::Error;

use crate::id::{CharacterId, StatisticKey, StatisticTypeId};

/// Error type for statistic lookups and character mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatError {
    /// Static statistics have no current value to alter.
    #[error("static statistic {0} cannot be altered")]
    StaticNotAlterable(StatisticTypeId),

    /// The catalog holds no definition for the referenced statistic.
    #[error("unknown statistic {0}")]
    UnknownStatistic(StatisticKey),

    /// A definition with the same identifier is already registered.
    #[error("statistic {0} is already registered")]
    DuplicateStatistic(StatisticTypeId),

    /// A character with the same identifier already lives in the zone.
    #[error("character {0} is already in the zone")]
    DuplicateCharacter(CharacterId),
}
