//! Error type for combat resolution.
//!
//! Every failure aborts the dispatch call it happened in. Round-end dispatch
//! writes statistics as it goes, so characters processed before the failure
//! keep their changes.

use skirmish_stats::{CharacterId, StatError};
use thiserror::Error;

/// Error raised by the resolution engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CombatError {
    /// A required input is missing, empty or out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation targeted a character that was removed from play.
    #[error("character {0} is deleted")]
    EntityDeleted(CharacterId),

    /// A data-model operation failed.
    #[error(transparent)]
    Stat(#[from] StatError),
}

impl CombatError {
    /// Creates an [`CombatError::InvalidArgument`] error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Returns true for errors caused by the targeted entity's state rather
    /// than by the caller's input.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::EntityDeleted(_))
    }
}
