//! Round-end dispatch.
//!
//! Round-end hooks are collected once, at construction, from the statistic
//! definitions of the ruleset. Each round they fire for every active
//! character, in turn order, and unlike turn hooks their deltas are written
//! to the characters.
//!
//! For one effect and one character the sequence is:
//!
//! 1. For each magnitude in declaration order, read the source's level or
//!    value, compute the delta and alter the effected statistic right away,
//!    so later magnitudes observe earlier writes
//! 2. `accompany_effect` with all deltas
//! 3. `other_effects` with all deltas
//!
//! Once every character was processed, `accompany_all_effects` receives the
//! whole batch.

use std::sync::Arc;

use skirmish_stats::{
    EffectOutcome, GameZone, RandomSource, RoundEndEffects, StaticStatisticType,
    StatisticCatalog, StatisticType, StatusEffectType, VariableStatisticType,
};

use crate::error::CombatError;
use crate::magnitude::StatisticMagnitudeEffectCalculation;
use crate::source::{sort_by_priority, EffectSource, Prioritized};
use crate::turn_order::{ActiveCharactersProvider, TurnSlot};

/// A round-end hook together with the statistic owning it.
#[derive(Debug, Clone)]
struct RoundEndEntry {
    effect: Arc<RoundEndEffects>,
    source: StatisticType,
}

impl Prioritized for RoundEndEntry {
    fn priority(&self) -> i32 {
        self.effect.priority()
    }
}

/// Dispatches round-end hooks.
pub struct RoundEndHandling {
    entries: Vec<RoundEndEntry>,
    provider: ActiveCharactersProvider,
    magnitudes: StatisticMagnitudeEffectCalculation,
}

impl RoundEndHandling {
    /// Collects the round-end hooks of the given status effects and variable
    /// statistics.
    ///
    /// Hooks are ordered by descending priority. Equal priorities keep the
    /// order status effects first, then variables, each in slice order.
    #[must_use]
    pub fn new(
        status_effects: &[Arc<StatusEffectType>],
        variables: &[Arc<VariableStatisticType>],
        provider: ActiveCharactersProvider,
        magnitudes: StatisticMagnitudeEffectCalculation,
    ) -> Self {
        let status = status_effects
            .iter()
            .map(|kind| StatisticType::StatusEffect(Arc::clone(kind)));
        let variable = variables
            .iter()
            .map(|kind| StatisticType::Variable(Arc::clone(kind)));

        let mut handling = Self {
            entries: Vec::new(),
            provider,
            magnitudes,
        };
        handling.collect(status.chain(variable));
        handling
    }

    /// Collects every round-end hook registered in `catalog`, including the
    /// hooks of static statistics.
    #[must_use]
    pub fn from_catalog(
        catalog: &StatisticCatalog,
        provider: ActiveCharactersProvider,
        magnitudes: StatisticMagnitudeEffectCalculation,
    ) -> Self {
        let status: Vec<_> = catalog.status_effects().cloned().collect();
        let variables: Vec<_> = catalog.variables().cloned().collect();
        let statics: Vec<_> = catalog.statics().cloned().collect();
        Self::new(&status, &variables, provider, magnitudes).with_static_statistics(&statics)
    }

    /// Adds the round-end hooks of static statistics.
    ///
    /// Their level is the statistic's calculated value on each character.
    #[must_use]
    pub fn with_static_statistics(mut self, statics: &[Arc<StaticStatisticType>]) -> Self {
        self.collect(
            statics
                .iter()
                .map(|kind| StatisticType::Static(Arc::clone(kind))),
        );
        self
    }

    fn collect(&mut self, kinds: impl Iterator<Item = StatisticType>) {
        for kind in kinds {
            if let Some(effect) = &kind.hooks().on_round_end {
                self.entries.push(RoundEndEntry {
                    effect: Arc::clone(effect),
                    source: kind.clone(),
                });
            }
        }
        sort_by_priority(&mut self.entries);
    }

    /// Hooks in dispatch order.
    pub fn effects(&self) -> impl Iterator<Item = &RoundEndEffects> {
        self.entries.iter().map(|entry| entry.effect.as_ref())
    }

    /// Number of collected hooks.
    #[must_use]
    pub fn effect_count(&self) -> usize {
        self.entries.len()
    }

    /// The provider producing the order characters are processed in.
    #[must_use]
    pub fn provider(&self) -> &ActiveCharactersProvider {
        &self.provider
    }

    /// Fires every round-end hook on every active character of `zone`.
    ///
    /// The turn order is produced afresh and consumes draws from `rng`.
    /// Deleted characters keep their draws but are left out of dispatch.
    ///
    /// # Errors
    ///
    /// Aborts on the first failing magnitude. Writes made before the failure
    /// are kept.
    pub fn run_round_end(
        &self,
        zone: &mut GameZone,
        rng: &mut dyn RandomSource,
        advancing_rounds: bool,
    ) -> Result<(), CombatError> {
        let order: Vec<TurnSlot> = self
            .provider
            .generate_in_turn_order(zone, rng)
            .into_iter()
            .filter(|slot| {
                let deleted = zone.get(slot.character).is_some_and(|c| c.is_deleted());
                if deleted {
                    tracing::debug!(character = %slot.character, "round end skipped");
                }
                !deleted
            })
            .collect();
        tracing::debug!(
            effects = self.entries.len(),
            characters = order.len(),
            advancing_rounds,
            "round end started"
        );

        for entry in &self.entries {
            self.dispatch(entry, zone, &order, rng, advancing_rounds)?;
        }

        tracing::debug!("round end finished");
        Ok(())
    }

    fn dispatch(
        &self,
        entry: &RoundEndEntry,
        zone: &mut GameZone,
        order: &[TurnSlot],
        rng: &mut dyn RandomSource,
        advancing_rounds: bool,
    ) -> Result<(), CombatError> {
        let effect = &entry.effect;
        let listener = effect.listener();
        tracing::debug!(effect = %effect.id(), priority = effect.priority(), "round-end effect");

        let mut processed = Vec::with_capacity(order.len());
        for slot in order {
            let character = zone.get_mut(slot.character).ok_or_else(|| {
                CombatError::invalid_argument(format!(
                    "character {} left the zone during round end",
                    slot.character
                ))
            })?;

            let mut deltas = Vec::with_capacity(effect.magnitudes().len());
            for magnitude in effect.magnitudes() {
                let effected = magnitude.effected.ok_or_else(|| {
                    CombatError::invalid_argument(format!(
                        "round-end effect {} has a magnitude without effected statistic",
                        effect.id()
                    ))
                })?;
                // Re-read each time, an earlier magnitude may have moved it.
                let source = EffectSource::resolve(
                    &entry.source,
                    character,
                    self.magnitudes.calculation().as_ref(),
                );
                let delta = self.magnitudes.get_effect(
                    source.key(),
                    magnitude,
                    source.level_or_value(),
                    character,
                    rng,
                )?;
                character.alter(effected, delta)?;
                tracing::trace!(
                    effect = %effect.id(),
                    character = %slot.character,
                    statistic = %effected,
                    delta,
                    "round-end delta applied"
                );
                deltas.push(delta);
            }

            listener.accompany_effect(&deltas, character, advancing_rounds);
            listener.other_effects(&deltas, character, advancing_rounds);
            processed.push((slot.character, deltas));
        }

        let outcomes: Vec<EffectOutcome<'_>> = processed
            .into_iter()
            .filter_map(|(id, deltas)| zone.get(id).map(|character| EffectOutcome { character, deltas }))
            .collect();
        listener.accompany_all_effects(&outcomes, advancing_rounds);
        Ok(())
    }
}
