//! Round driver.
//!
//! [`CombatRound`] runs one full round over a zone: the turn order, every
//! ordered character's turn, then round end.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use skirmish_core::{
//!     ActiveCharactersProvider, CombatRound, RoundConfig, RoundData, RoundEndHandling,
//!     StatisticMagnitudeEffectCalculation, TurnControl, TurnHandling,
//! };
//! use skirmish_stats::{
//!     BaseStatisticCalculation, Character, GameZone, SeededRandom, StatisticCatalog,
//! };
//!
//! struct Idle;
//!
//! impl TurnControl for Idle {
//!     fn pass_to_player(&mut self, _: &mut Character, _: &mut RoundData) {}
//!     fn act(&mut self, _: &mut Character, _: &mut RoundData) {}
//! }
//!
//! let calculation = Arc::new(BaseStatisticCalculation);
//! let catalog = Arc::new(StatisticCatalog::new());
//! let magnitudes = StatisticMagnitudeEffectCalculation::new(calculation.clone());
//! let provider = ActiveCharactersProvider::new(RoundConfig::default(), calculation).unwrap();
//!
//! let round = CombatRound::new(
//!     TurnHandling::new(catalog.clone(), magnitudes.clone()),
//!     RoundEndHandling::from_catalog(&catalog, provider, magnitudes),
//! );
//!
//! let mut zone = GameZone::new();
//! zone.spawn(|id| Character::new(id, "Ayla"));
//! zone.spawn(|id| Character::new(id, "Brom"));
//!
//! let report = round.run(&mut zone, &mut SeededRandom::new(42), &mut Idle, true).unwrap();
//! assert_eq!(report.turns.len(), 2);
//! ```

use serde::{Deserialize, Serialize};
use skirmish_stats::{CharacterId, GameZone, RandomSource};

use crate::error::CombatError;
use crate::round_end::RoundEndHandling;
use crate::turn::{TurnControl, TurnHandling};
use crate::turn_order::TurnSlot;

/// What happened during one round.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoundReport {
    /// Characters that took their turn, in acting order, with their round
    /// data as the turn left it.
    pub turns: Vec<TurnSlot>,
    /// Characters in the turn order whose turn was skipped because they were
    /// deleted, flagged inactive or gone from the zone when it came up.
    pub skipped: Vec<CharacterId>,
}

/// Runs whole rounds.
pub struct CombatRound {
    turns: TurnHandling,
    round_end: RoundEndHandling,
}

impl CombatRound {
    /// Creates a round driver.
    #[must_use]
    pub fn new(turns: TurnHandling, round_end: RoundEndHandling) -> Self {
        Self { turns, round_end }
    }

    /// Runs one round over `zone`.
    ///
    /// # Errors
    ///
    /// Propagates the first failure of a turn or of round end. Changes made
    /// before the failure are kept.
    pub fn run(
        &self,
        zone: &mut GameZone,
        rng: &mut dyn RandomSource,
        control: &mut dyn TurnControl,
        advancing_rounds: bool,
    ) -> Result<RoundReport, CombatError> {
        let order = self.round_end.provider().generate_in_turn_order(zone, rng);
        tracing::debug!(characters = order.len(), advancing_rounds, "round started");

        let mut report = RoundReport::default();
        for TurnSlot { character, mut round } in order {
            let Some(actor) = zone
                .get_mut(character)
                .filter(|actor| !actor.is_deleted() && !actor.is_inactive())
            else {
                tracing::debug!(character = %character, "turn skipped");
                report.skipped.push(character);
                continue;
            };

            self.turns.run_turn(actor, &mut round, control, rng)?;
            report.turns.push(TurnSlot { character, round });
        }

        self.round_end.run_round_end(zone, rng, advancing_rounds)?;
        tracing::debug!(
            acted = report.turns.len(),
            skipped = report.skipped.len(),
            "round finished"
        );
        Ok(report)
    }
}
