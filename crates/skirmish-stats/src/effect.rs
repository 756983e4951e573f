//! Magnitudes and effect hooks.
//!
//! An effect hook ([`EffectsOnCharacter`]) bundles a dispatch priority, an
//! ordered list of [`StatisticChangeMagnitude`] entries and a listener. The
//! combat engine turns each magnitude into a concrete integer delta and hands
//! the deltas to the listener; the listener owns every game-specific reaction
//! (floating text, removing an expired status, AI bookkeeping).
//!
//! Two listener flavours exist because round-end dispatch knows whether the
//! round counter advances and additionally reports the whole batch once all
//! characters are processed:
//!
//! - [`TurnEffectListener`] for turn-start and turn-end hooks
//! - [`RoundEndListener`] for round-end hooks
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use skirmish_stats::effect::{RoundEndEffects, StatisticChangeMagnitude};
//! use skirmish_stats::id::{StatisticKey, StatisticTypeId};
//!
//! let hp = StatisticKey::Variable(StatisticTypeId::new(1));
//! let regeneration = RoundEndEffects::silent(
//!     "regeneration",
//!     5,
//!     vec![StatisticChangeMagnitude::value().with_absolute(1.0, 3.0).affecting(hp)],
//! );
//!
//! assert_eq!(regeneration.priority(), 5);
//! assert_eq!(regeneration.magnitudes().len(), 1);
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::character::Character;
use crate::id::{EffectId, StatisticKey};
use crate::statistic::Element;

// =============================================================================
// Magnitude Ranges
// =============================================================================

/// Numeric types a magnitude range can be authored in.
pub trait Number: Copy + Into<f64> {}

impl<T: Copy + Into<f64>> Number for T {}

/// Inclusive-exclusive sampling range `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MagnitudeRange<T> {
    /// Lower bound of a draw.
    pub min: T,
    /// Upper bound of a draw (never reached).
    pub max: T,
}

impl<T: Number> MagnitudeRange<T> {
    /// Creates a range from its bounds.
    #[must_use]
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// Width of the range (`max - min`).
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max.into() - self.min.into()
    }

    /// Maps a unit draw `r` in `[0, 1)` onto the range.
    #[must_use]
    pub fn sample(&self, r: f64) -> f64 {
        self.min.into() + r * self.span()
    }
}

// =============================================================================
// Amount and Effect Types
// =============================================================================

/// How the sampled base amount turns into a delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AmountType {
    /// The base amount is the delta.
    #[default]
    Value,
    /// The base amount is a fraction of the effected statistic's current value.
    PercentOfCurrent,
    /// The base amount is a fraction of the effected statistic's calculated value.
    PercentOfMaximum,
}

impl AmountType {
    /// Returns true if this amount type scales an effected statistic.
    #[must_use]
    pub const fn is_percentage(self) -> bool {
        matches!(self, Self::PercentOfCurrent | Self::PercentOfMaximum)
    }
}

/// Whether a magnitude is plain alteration or damage subject to resistance.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EffectType {
    /// Applied as computed.
    #[default]
    Alteration,
    /// Negative results are mitigated by the element's resistance.
    Damage {
        /// Element whose resistance statistic mitigates the damage.
        element: Element,
    },
}

impl EffectType {
    /// Returns the damage element, if any.
    #[must_use]
    pub const fn element(&self) -> Option<&Element> {
        match self {
            Self::Alteration => None,
            Self::Damage { element } => Some(element),
        }
    }
}

// =============================================================================
// Statistic Change Magnitude
// =============================================================================

/// Declarative, randomized description of one statistic change.
///
/// The base amount is the sum of one draw from `absolute` and one draw from
/// `per_level` for every point of the reference level or value supplied at
/// calculation time. Either range may be absent.
///
/// A draw lands in `[min, max)`: `min` is an offset added to `r * (max - min)`,
/// not a bound on the random part alone. A range of `(2, 6)` yields values
/// in `[2, 6)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticChangeMagnitude<T = f64> {
    /// Range drawn once.
    pub absolute: Option<MagnitudeRange<T>>,
    /// Range drawn once per point of level or value.
    pub per_level: Option<MagnitudeRange<T>>,
    /// How the base amount becomes a delta.
    pub amount_type: AmountType,
    /// Alteration or damage.
    pub effect_type: EffectType,
    /// Statistic the resulting delta is applied to.
    pub effected: Option<StatisticKey>,
}

impl<T> StatisticChangeMagnitude<T> {
    /// A `Value` alteration with no ranges and no effected statistic.
    #[must_use]
    pub fn value() -> Self {
        Self {
            absolute: None,
            per_level: None,
            amount_type: AmountType::Value,
            effect_type: EffectType::Alteration,
            effected: None,
        }
    }

    /// An alteration scaled by the current value of `effected`.
    #[must_use]
    pub fn percent_of_current(effected: StatisticKey) -> Self {
        Self {
            amount_type: AmountType::PercentOfCurrent,
            effected: Some(effected),
            ..Self::value()
        }
    }

    /// An alteration scaled by the calculated value of `effected`.
    #[must_use]
    pub fn percent_of_maximum(effected: StatisticKey) -> Self {
        Self {
            amount_type: AmountType::PercentOfMaximum,
            effected: Some(effected),
            ..Self::value()
        }
    }

    /// Sets the range drawn once.
    #[must_use]
    pub fn with_absolute(mut self, min: T, max: T) -> Self {
        self.absolute = Some(MagnitudeRange { min, max });
        self
    }

    /// Sets the range drawn once per point of level or value.
    #[must_use]
    pub fn with_per_level(mut self, min: T, max: T) -> Self {
        self.per_level = Some(MagnitudeRange { min, max });
        self
    }

    /// Sets the statistic the delta is applied to.
    #[must_use]
    pub fn affecting(mut self, effected: StatisticKey) -> Self {
        self.effected = Some(effected);
        self
    }

    /// Turns this magnitude into damage of the given element.
    #[must_use]
    pub fn as_damage(mut self, element: Element) -> Self {
        self.effect_type = EffectType::Damage { element };
        self
    }
}

// =============================================================================
// Listeners
// =============================================================================

/// Extension hooks of a turn-start or turn-end effect.
///
/// Every method defaults to doing nothing.
pub trait TurnEffectListener: Send + Sync {
    /// Called with all deltas of the effect before anything else happens.
    fn accompany_effect(&self, _deltas: &[i32], _character: &Character) {}

    /// Called after the deltas were surfaced; may mutate the character.
    fn other_effects(&self, _deltas: &[i32], _character: &mut Character) {}
}

/// One character's share of a round-end effect.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectOutcome<'a> {
    /// The character after the deltas were applied.
    pub character: &'a Character,
    /// Deltas in magnitude order.
    pub deltas: Vec<i32>,
}

/// Extension hooks of a round-end effect.
///
/// Every method defaults to doing nothing.
pub trait RoundEndListener: Send + Sync {
    /// Called with all deltas of the effect once every magnitude was computed.
    ///
    /// Round-end deltas are written as they are computed, so the character
    /// already reflects them here.
    fn accompany_effect(&self, _deltas: &[i32], _character: &Character, _advancing_rounds: bool) {}

    /// Called after [`accompany_effect`](Self::accompany_effect); may mutate
    /// the character.
    fn other_effects(&self, _deltas: &[i32], _character: &mut Character, _advancing_rounds: bool) {}

    /// Called once per effect after every character was processed.
    fn accompany_all_effects(&self, _outcomes: &[EffectOutcome<'_>], _advancing_rounds: bool) {}
}

/// Listener that ignores every hook.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl TurnEffectListener for NoopListener {}

impl RoundEndListener for NoopListener {}

// =============================================================================
// Effects On Character
// =============================================================================

/// An effect hook: priority, magnitudes and listener.
///
/// Higher priorities dispatch first.
pub struct EffectsOnCharacter<L: ?Sized> {
    id: EffectId,
    priority: i32,
    magnitudes: Vec<StatisticChangeMagnitude>,
    listener: Arc<L>,
}

/// Hook bound to a turn-start or turn-end boundary.
pub type TurnEffects = EffectsOnCharacter<dyn TurnEffectListener>;

/// Hook bound to the end of a round.
pub type RoundEndEffects = EffectsOnCharacter<dyn RoundEndListener>;

impl<L: ?Sized> EffectsOnCharacter<L> {
    /// Creates a hook with an explicit listener.
    #[must_use]
    pub fn new(
        id: impl Into<EffectId>,
        priority: i32,
        magnitudes: Vec<StatisticChangeMagnitude>,
        listener: Arc<L>,
    ) -> Self {
        Self {
            id: id.into(),
            priority,
            magnitudes,
            listener,
        }
    }

    /// Identifier of this hook.
    #[must_use]
    pub fn id(&self) -> &EffectId {
        &self.id
    }

    /// Dispatch priority; higher runs earlier.
    #[must_use]
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Magnitudes in declaration order.
    #[must_use]
    pub fn magnitudes(&self) -> &[StatisticChangeMagnitude] {
        &self.magnitudes
    }

    /// The injected listener.
    #[must_use]
    pub fn listener(&self) -> &L {
        &self.listener
    }
}

impl TurnEffects {
    /// Creates a turn hook whose listener does nothing.
    #[must_use]
    pub fn silent(
        id: impl Into<EffectId>,
        priority: i32,
        magnitudes: Vec<StatisticChangeMagnitude>,
    ) -> Self {
        Self::new(id, priority, magnitudes, Arc::new(NoopListener))
    }
}

impl RoundEndEffects {
    /// Creates a round-end hook whose listener does nothing.
    #[must_use]
    pub fn silent(
        id: impl Into<EffectId>,
        priority: i32,
        magnitudes: Vec<StatisticChangeMagnitude>,
    ) -> Self {
        Self::new(id, priority, magnitudes, Arc::new(NoopListener))
    }
}

impl<L: ?Sized> Clone for EffectsOnCharacter<L> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            priority: self.priority,
            magnitudes: self.magnitudes.clone(),
            listener: Arc::clone(&self.listener),
        }
    }
}

impl<L: ?Sized> fmt::Debug for EffectsOnCharacter<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectsOnCharacter")
            .field("id", &self.id)
            .field("priority", &self.priority)
            .field("magnitudes", &self.magnitudes)
            .finish_non_exhaustive()
    }
}
