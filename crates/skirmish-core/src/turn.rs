//! Turn dispatch.
//!
//! A turn runs the character's turn-start hooks, hands control to the player
//! or the AI, then runs the turn-end hooks. Hooks are gathered from the
//! character itself each phase: every status effect it carries, every variable
//! statistic it has a current value for and every static statistic it has a
//! base value for.
//!
//! Turn hooks only surface their deltas to the listener. Nothing is written to
//! the character here; a listener that wants the change applied does so in
//! `other_effects`.

use std::collections::BTreeSet;
use std::sync::Arc;

use skirmish_stats::{
    Character, RandomSource, StatError, StatisticCatalog, StatisticHooks, StatisticKey,
    StatisticType, TurnEffects,
};

use crate::error::CombatError;
use crate::magnitude::StatisticMagnitudeEffectCalculation;
use crate::source::{sort_by_priority, EffectSource, Prioritized};
use crate::turn_order::RoundData;

// =============================================================================
// Turn Control
// =============================================================================

/// Who acts between the turn-start and turn-end hooks.
pub trait TurnControl {
    /// Hands the turn to the player controlling `character`.
    fn pass_to_player(&mut self, character: &mut Character, round: &mut RoundData);

    /// Lets the AI act for `character`.
    fn act(&mut self, character: &mut Character, round: &mut RoundData);
}

/// A turn boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnPhase {
    /// Before the character acts.
    Start,
    /// After the character acted.
    End,
}

impl TurnPhase {
    /// The hook bound to this phase.
    #[must_use]
    pub fn hook(self, hooks: &StatisticHooks) -> Option<&Arc<TurnEffects>> {
        match self {
            Self::Start => hooks.on_turn_start.as_ref(),
            Self::End => hooks.on_turn_end.as_ref(),
        }
    }
}

// =============================================================================
// Turn Handling
// =============================================================================

#[derive(Debug, Clone)]
struct TurnEntry {
    effect: Arc<TurnEffects>,
    source: EffectSource,
}

impl Prioritized for TurnEntry {
    fn priority(&self) -> i32 {
        self.effect.priority()
    }
}

/// Runs turns.
pub struct TurnHandling {
    catalog: Arc<StatisticCatalog>,
    magnitudes: StatisticMagnitudeEffectCalculation,
}

impl TurnHandling {
    /// Creates turn handling resolving statistics through `catalog`.
    #[must_use]
    pub fn new(
        catalog: Arc<StatisticCatalog>,
        magnitudes: StatisticMagnitudeEffectCalculation,
    ) -> Self {
        Self {
            catalog,
            magnitudes,
        }
    }

    /// Runs one turn of `character`.
    ///
    /// # Errors
    ///
    /// Returns [`CombatError::EntityDeleted`] for a deleted character and
    /// propagates the first failure of a hook.
    pub fn run_turn(
        &self,
        character: &mut Character,
        round: &mut RoundData,
        control: &mut dyn TurnControl,
        rng: &mut dyn RandomSource,
    ) -> Result<(), CombatError> {
        if character.is_deleted() {
            return Err(CombatError::EntityDeleted(character.id()));
        }
        tracing::debug!(
            character = %character.id(),
            action_points = round.action_points(),
            "turn started"
        );

        self.run_phase(TurnPhase::Start, character, rng)?;
        if character.is_player_controlled() {
            control.pass_to_player(character, round);
        } else {
            control.act(character, round);
        }
        self.run_phase(TurnPhase::End, character, rng)?;

        tracing::debug!(character = %character.id(), "turn finished");
        Ok(())
    }

    /// Fires the hooks of one phase.
    ///
    /// # Errors
    ///
    /// Returns [`CombatError::Stat`] if the character carries a status effect
    /// or variable statistic missing from the catalog, and propagates
    /// magnitude failures.
    pub fn run_phase(
        &self,
        phase: TurnPhase,
        character: &mut Character,
        rng: &mut dyn RandomSource,
    ) -> Result<(), CombatError> {
        let entries = self.collect(phase, character)?;
        tracing::debug!(
            character = %character.id(),
            ?phase,
            hooks = entries.len(),
            "turn phase"
        );

        for entry in &entries {
            let effect = &entry.effect;
            let level_or_value = entry.source.level_or_value();
            let deltas = effect
                .magnitudes()
                .iter()
                .map(|magnitude| {
                    self.magnitudes.get_effect(
                        entry.source.key(),
                        magnitude,
                        level_or_value,
                        character,
                        rng,
                    )
                })
                .collect::<Result<Vec<_>, _>>()?;

            tracing::trace!(
                effect = %effect.id(),
                character = %character.id(),
                deltas = ?deltas,
                "turn effect resolved"
            );
            effect.listener().accompany_effect(&deltas, character);
            effect.listener().other_effects(&deltas, character);
        }
        Ok(())
    }

    /// Gathers the phase's hooks in dispatch order, each hook once.
    fn collect(&self, phase: TurnPhase, character: &Character) -> Result<Vec<TurnEntry>, CombatError> {
        let calculation = self.magnitudes.calculation().as_ref();
        let mut kinds = Vec::new();
        for (id, _) in character.status_levels() {
            let kind = self
                .catalog
                .status_effect(id)
                .ok_or(StatError::UnknownStatistic(StatisticKey::StatusEffect(id)))?;
            kinds.push(StatisticType::StatusEffect(Arc::clone(kind)));
        }
        for (id, _) in character.variable_values() {
            let kind = self
                .catalog
                .variable(id)
                .ok_or(StatError::UnknownStatistic(StatisticKey::Variable(id)))?;
            kinds.push(StatisticType::Variable(Arc::clone(kind)));
        }
        // Base values also hold variable maxima, so only statics are picked.
        for (id, _) in character.base_values() {
            if let Some(kind) = self.catalog.static_statistic(id) {
                kinds.push(StatisticType::Static(Arc::clone(kind)));
            }
        }

        let mut seen = BTreeSet::new();
        let mut entries = Vec::new();
        for kind in &kinds {
            let Some(effect) = phase.hook(kind.hooks()) else {
                continue;
            };
            if seen.insert(effect.id().clone()) {
                entries.push(TurnEntry {
                    effect: Arc::clone(effect),
                    source: EffectSource::resolve(kind, character, calculation),
                });
            }
        }
        sort_by_priority(&mut entries);
        Ok(entries)
    }
}
