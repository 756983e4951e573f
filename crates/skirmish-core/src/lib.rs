//! # Skirmish Core
//!
//! Combat round resolution for the Skirmish tactical ruleset.
//!
//! The engine turns declarative statistic effects into concrete changes on
//! characters, in a deterministic order driven by one injected random source:
//!
//! - **Turn order**: [`ActiveCharactersProvider`] sorts active characters by
//!   combat priority, breaks ties by draw and hands out action points
//! - **Turn hooks**: [`TurnHandling`] fires turn-start and turn-end effects
//!   around each character's action and only reports their deltas
//! - **Round end**: [`RoundEndHandling`] fires round-end effects on every
//!   active character and writes their deltas
//! - **Magnitudes**: [`StatisticMagnitudeEffectCalculation`] samples and scales
//!   a magnitude into an integer delta, mitigating damage by resistance
//!
//! [`CombatRound`] runs all of it for one round.
//!
//! ## Determinism
//!
//! Every draw goes through the caller's [`RandomSource`](skirmish_stats::RandomSource).
//! Characters live in a `BTreeMap`-backed zone and hooks are stably sorted, so
//! a seeded source replays a round exactly.
//!
//! ## Logging
//!
//! Dispatch boundaries emit `tracing` events at `debug`, individual deltas and
//! draws at `trace`. No subscriber is installed here.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod magnitude;
pub mod resistance;
pub mod round;
pub mod round_end;
pub mod source;
pub mod turn;
pub mod turn_order;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use config::{ActionPointTier, RoundConfig};
pub use error::CombatError;
pub use magnitude::StatisticMagnitudeEffectCalculation;
pub use resistance::{DamageResistanceCalculation, StatusEffectResistanceCalculation};
pub use round::{CombatRound, RoundReport};
pub use round_end::RoundEndHandling;
pub use source::{sort_by_priority, EffectSource, Prioritized};
pub use turn::{TurnControl, TurnHandling, TurnPhase};
pub use turn_order::{ActiveCharactersProvider, RoundData, TurnSlot};
