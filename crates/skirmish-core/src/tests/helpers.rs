//! Test helper functions for setting up characters, catalogs and rounds.
//!
//! Randomness is scripted through [`ScriptedRandom`] so tests state the exact
//! draws they expect, and listeners record what they were handed.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use mockall::mock;
use skirmish_stats::{
    BaseStatisticCalculation, Character, CharacterFlags, CharacterId, EffectOutcome, Element,
    RandomSource, RoundEndListener, StaticStatisticType, StatisticCalculation, StatisticCatalog,
    StatisticHooks, StatisticKey, StatisticTypeId, StatusEffectType, TurnEffectListener,
    VariableStatisticType,
};

use crate::config::{
    RoundConfig, DEFAULT_ALACRITY, DEFAULT_BASE_ACTION_POINTS, DEFAULT_COMBAT_PRIORITY,
};
use crate::magnitude::StatisticMagnitudeEffectCalculation;
use crate::round::CombatRound;
use crate::round_end::RoundEndHandling;
use crate::turn::{TurnControl, TurnHandling};
use crate::turn_order::{ActiveCharactersProvider, RoundData};

// =============================================================================
// Statistics
// =============================================================================

/// Combat priority, as read by the default round configuration.
pub const PRIORITY: StatisticKey = StatisticKey::Static(DEFAULT_COMBAT_PRIORITY);
/// Alacrity, as read by the default round configuration.
pub const ALACRITY: StatisticKey = StatisticKey::Static(DEFAULT_ALACRITY);
/// Base action points, as read by the default round configuration.
pub const BASE_AP: StatisticKey = StatisticKey::Static(DEFAULT_BASE_ACTION_POINTS);
/// Health.
pub const HP: StatisticKey = StatisticKey::Variable(StatisticTypeId::new(10));
/// Fire resistance percentage.
pub const FIRE_RESIST: StatisticKey = StatisticKey::Static(StatisticTypeId::new(20));
/// Poison resistance percentage.
pub const POISON_RESIST: StatisticKey = StatisticKey::Static(StatisticTypeId::new(21));
/// Poison status.
pub const POISON: StatisticTypeId = StatisticTypeId::new(30);
/// Burning status.
pub const BURNING: StatisticTypeId = StatisticTypeId::new(31);

/// A character with no statistics.
pub fn make_character(id: u64) -> Character {
    Character::new(CharacterId::new(id), &format!("fighter-{id}"))
}

/// The fire element.
pub fn fire_element() -> Element {
    Element::new("fire", FIRE_RESIST)
}

/// Poison without hooks.
pub fn poison_type() -> StatusEffectType {
    StatusEffectType::new(POISON, "poison", POISON_RESIST)
}

mock! {
    pub Calculation {}

    impl StatisticCalculation for Calculation {
        fn calculate(&self, character: &Character, statistic: StatisticKey) -> i32;
    }
}

// =============================================================================
// Random Sources
// =============================================================================

/// Random source replaying scripted draws and counting them.
///
/// Panics when the script runs out and no fallback is set, so a test fails
/// loudly on an unexpected draw.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    script: VecDeque<f64>,
    fallback: Option<f64>,
    draws: usize,
}

impl ScriptedRandom {
    /// Every draw returns `value`.
    pub fn fixed(value: f64) -> Self {
        Self {
            fallback: Some(value),
            ..Self::default()
        }
    }

    /// Draws return `values` in order, then panic.
    pub fn sequence(values: &[f64]) -> Self {
        Self {
            script: values.iter().copied().collect(),
            ..Self::default()
        }
    }

    /// Returns `value` once the script is used up.
    pub fn then(mut self, value: f64) -> Self {
        self.fallback = Some(value);
        self
    }

    /// Number of draws taken so far.
    pub fn draws(&self) -> usize {
        self.draws
    }

    fn next(&mut self) -> f64 {
        self.draws += 1;
        self.script
            .pop_front()
            .or(self.fallback)
            .unwrap_or_else(|| panic!("random script exhausted at draw {}", self.draws))
    }
}

impl RandomSource for ScriptedRandom {
    #[allow(clippy::cast_possible_truncation)]
    fn next_f32(&mut self) -> f32 {
        self.next() as f32
    }

    fn next_f64(&mut self) -> f64 {
        self.next()
    }
}

// =============================================================================
// Recording Listeners
// =============================================================================

#[derive(Debug, Default)]
struct TurnLog {
    accompanied: Vec<(String, Vec<i32>)>,
    other_calls: usize,
}

/// Turn listener recording the deltas it receives, tagged with a label.
///
/// Listeners made through [`labelled`](Self::labelled) share one log, so the
/// dispatch order across effects is visible.
#[derive(Debug, Default)]
pub struct RecordingTurnListener {
    label: String,
    log: Arc<Mutex<TurnLog>>,
}

impl RecordingTurnListener {
    /// A listener writing to this listener's log under `label`.
    pub fn labelled(&self, label: &str) -> Arc<Self> {
        Arc::new(Self {
            label: label.to_string(),
            log: Arc::clone(&self.log),
        })
    }

    /// Labels and deltas in the order `accompany_effect` saw them.
    pub fn accompanied(&self) -> Vec<(String, Vec<i32>)> {
        self.log.lock().unwrap().accompanied.clone()
    }

    /// How often `other_effects` ran.
    pub fn other_calls(&self) -> usize {
        self.log.lock().unwrap().other_calls
    }
}

impl TurnEffectListener for RecordingTurnListener {
    fn accompany_effect(&self, deltas: &[i32], _character: &Character) {
        self.log
            .lock()
            .unwrap()
            .accompanied
            .push((self.label.clone(), deltas.to_vec()));
    }

    fn other_effects(&self, _deltas: &[i32], _character: &mut Character) {
        self.log.lock().unwrap().other_calls += 1;
    }
}

/// Round-end listener recording per-character deltas and batches.
#[derive(Debug, Default)]
pub struct RecordingRoundEndListener {
    accompanied: Mutex<Vec<(u64, Vec<i32>, bool)>>,
    batches: Mutex<Vec<Vec<(u64, i32)>>>,
}

impl RecordingRoundEndListener {
    /// `(character, deltas, advancing_rounds)` per `accompany_effect` call.
    pub fn accompanied(&self) -> Vec<(u64, Vec<i32>, bool)> {
        self.accompanied.lock().unwrap().clone()
    }

    /// `(character, health)` per character of each batch.
    pub fn batches(&self) -> Vec<Vec<(u64, i32)>> {
        self.batches.lock().unwrap().clone()
    }
}

impl RoundEndListener for RecordingRoundEndListener {
    fn accompany_effect(&self, deltas: &[i32], character: &Character, advancing_rounds: bool) {
        self.accompanied.lock().unwrap().push((
            character.id().as_u64(),
            deltas.to_vec(),
            advancing_rounds,
        ));
    }

    fn accompany_all_effects(&self, outcomes: &[EffectOutcome<'_>], _advancing_rounds: bool) {
        let batch = outcomes
            .iter()
            .map(|outcome| {
                (
                    outcome.character.id().as_u64(),
                    outcome.character.variable_value(HP.id()),
                )
            })
            .collect();
        self.batches.lock().unwrap().push(batch);
    }
}

// =============================================================================
// Turn Control
// =============================================================================

/// Turn control recording who acted and optionally doing something.
#[derive(Debug, Default)]
pub struct ScriptedControl {
    player_turns: Vec<u64>,
    ai_turns: Vec<u64>,
    status_on_act: Option<(StatisticTypeId, i32)>,
    spend_on_act: i32,
    deleting: Vec<u64>,
}

impl ScriptedControl {
    /// Alters a status level of the acting character.
    pub fn applying_on_act(mut self, status: StatisticTypeId, delta: i32) -> Self {
        self.status_on_act = Some((status, delta));
        self
    }

    /// Spends action points of the acting character.
    pub fn spending_on_act(mut self, amount: i32) -> Self {
        self.spend_on_act = amount;
        self
    }

    /// Flags `character` deleted when it acts.
    pub fn deleting_on_act(mut self, character: u64) -> Self {
        self.deleting.push(character);
        self
    }

    /// Characters whose turn went to the player.
    pub fn player_turns(&self) -> Vec<u64> {
        self.player_turns.clone()
    }

    /// Characters whose turn went to the AI.
    pub fn ai_turns(&self) -> Vec<u64> {
        self.ai_turns.clone()
    }

    fn perform(&self, character: &mut Character, round: &mut RoundData) {
        if let Some((status, delta)) = self.status_on_act {
            character
                .alter(StatisticKey::StatusEffect(status), delta)
                .unwrap();
        }
        if self.spend_on_act > 0 {
            round.spend_action_points(self.spend_on_act).unwrap();
        }
        if self.deleting.contains(&character.id().as_u64()) {
            character.set_flag(CharacterFlags::DELETED, true);
        }
    }
}

impl TurnControl for ScriptedControl {
    fn pass_to_player(&mut self, character: &mut Character, round: &mut RoundData) {
        self.player_turns.push(character.id().as_u64());
        self.perform(character, round);
    }

    fn act(&mut self, character: &mut Character, round: &mut RoundData) {
        self.ai_turns.push(character.id().as_u64());
        self.perform(character, round);
    }
}

// =============================================================================
// Scenarios
// =============================================================================

/// Ready-made catalogs and round drivers.
pub mod scenario {
    use super::*;

    /// Round statistics, resistances and health, all without hooks.
    pub fn catalog() -> StatisticCatalog {
        catalog_with_health(StatisticHooks::none())
    }

    /// Like [`catalog`], with `hooks` attached to health.
    pub fn catalog_with_health(hooks: StatisticHooks) -> StatisticCatalog {
        let mut catalog = StatisticCatalog::new();
        for (key, name) in [
            (PRIORITY, "combat priority"),
            (ALACRITY, "alacrity"),
            (BASE_AP, "action points"),
            (FIRE_RESIST, "fire resistance"),
            (POISON_RESIST, "poison resistance"),
        ] {
            catalog
                .register_static(StaticStatisticType::new(key.id(), name))
                .unwrap();
        }
        catalog
            .register_variable(VariableStatisticType::new(HP.id(), "health").with_hooks(hooks))
            .unwrap();
        catalog
    }

    /// Turn order provider with the default configuration.
    pub fn provider() -> ActiveCharactersProvider {
        ActiveCharactersProvider::new(RoundConfig::default(), calculation()).unwrap()
    }

    /// The calculation every scenario uses.
    pub fn calculation() -> Arc<dyn StatisticCalculation> {
        Arc::new(BaseStatisticCalculation)
    }

    /// Round-end handling over every hook of `catalog`.
    pub fn round_end(catalog: &StatisticCatalog) -> RoundEndHandling {
        RoundEndHandling::from_catalog(
            catalog,
            provider(),
            StatisticMagnitudeEffectCalculation::new(calculation()),
        )
    }

    /// A round driver over `catalog` with the default configuration.
    pub fn round(catalog: StatisticCatalog) -> CombatRound {
        let catalog = Arc::new(catalog);
        let turns = TurnHandling::new(
            Arc::clone(&catalog),
            StatisticMagnitudeEffectCalculation::new(calculation()),
        );
        CombatRound::new(turns, round_end(&catalog))
    }
}
