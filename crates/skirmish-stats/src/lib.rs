//! # Skirmish Stats
//!
//! Character, statistic and effect data model for the Skirmish combat ruleset.
//!
//! This crate holds everything the combat engine consumes but does not own:
//!
//! - **Definitions**: statistic variants, elements, magnitudes and effect hooks,
//!   registered in a [`StatisticCatalog`]
//! - **State**: [`Character`]s living in a [`GameZone`]
//! - **Contracts**: [`StatisticCalculation`] and [`RandomSource`]
//!
//! ## Usage
//!
//! ```
//! use skirmish_stats::{
//!     BaseStatisticCalculation, Character, CharacterId, GameZone, StatisticCalculation,
//!     StatisticKey, StatisticTypeId,
//! };
//!
//! let hp = StatisticTypeId::new(1);
//! let mut zone = GameZone::new();
//! let id = zone.spawn(|id| Character::new(id, "Ayla").with_base_value(hp, 40));
//!
//! let calc = BaseStatisticCalculation;
//! let character = zone.get(id).unwrap();
//! assert_eq!(calc.calculate(character, StatisticKey::Variable(hp)), 40);
//! assert_eq!(id, CharacterId::new(0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod calculation;
pub mod catalog;
pub mod character;
pub mod effect;
pub mod error;
pub mod id;
pub mod random;
pub mod statistic;
pub mod zone;

// Re-exports for convenience
pub use calculation::{BaseStatisticCalculation, StatisticCalculation};
pub use catalog::StatisticCatalog;
pub use character::{Character, CharacterFlags};
pub use effect::{
    AmountType, EffectOutcome, EffectType, EffectsOnCharacter, MagnitudeRange, NoopListener,
    Number, RoundEndEffects, RoundEndListener, StatisticChangeMagnitude, TurnEffectListener,
    TurnEffects,
};
pub use error::StatError;
pub use id::{CharacterId, EffectId, StatisticKey, StatisticTypeId};
pub use random::{RandomSource, SeededRandom};
pub use statistic::{
    Element, StaticStatisticType, StatisticHooks, StatisticType, StatusEffectType,
    VariableStatisticType,
};
pub use zone::GameZone;
