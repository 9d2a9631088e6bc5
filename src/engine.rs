//! Step-based wrapper that owns a seeded RNG, for replays and host loops.

use crate::config::BattleConfig;
use crate::data::dex::{MoveResolver, SpeciesResolver};
use crate::error::BattleError;
use crate::sim::battle::{Action, Battle, BattleResult, BattleState, Battler, TurnReport};
use crate::sim::creature::Creature;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::sync::Arc;

/// What one player action did to the battle.
#[derive(Clone, Debug)]
pub struct StepResult {
    pub report: TurnReport,
    /// One line per changed field, e.g. "player_hp 41 -> 17".
    pub events: Vec<String>,
    pub before: BattleState,
    pub after: BattleState,
    /// Set once the battle is decided.
    pub outcome: Option<BattleResult>,
}

pub struct BattleEngine {
    battle: Battle,
    rng: SmallRng,
}

impl BattleEngine {
    pub fn new(battle: Battle, seed: u64) -> Self {
        Self {
            battle,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Builds the battle and seeds the RNG from `config.seed`.
    pub fn from_config(
        player: Vec<Creature>,
        opponent: Vec<Creature>,
        config: &BattleConfig,
        species: Arc<dyn SpeciesResolver>,
        moves: Arc<dyn MoveResolver>,
    ) -> Result<Self, BattleError> {
        let battle = Battle::new(player, opponent, config, species, moves)?;
        Ok(Self::new(battle, config.seed))
    }

    /// Advances the battle by one player action.
    pub fn step(&mut self, action: Action) -> Result<StepResult, BattleError> {
        let before = self.battle.state().clone();
        let report = self.battle.execute_turn(action, &mut self.rng)?;
        let after = self.battle.state().clone();
        Ok(StepResult {
            events: build_events(&before, &after),
            outcome: after.result,
            report,
            before,
            after,
        })
    }

    pub fn capture(&mut self) -> Result<TurnReport, BattleError> {
        self.battle.record_capture()
    }

    pub fn is_terminal(&self) -> bool {
        self.battle.state().is_over()
    }

    pub fn legal_actions(&self) -> Vec<Action> {
        self.battle.legal_actions()
    }

    pub fn state(&self) -> &BattleState {
        self.battle.state()
    }

    pub fn battle(&self) -> &Battle {
        &self.battle
    }

    pub fn transcript(&self) -> &[String] {
        self.battle.state().log.transcript()
    }
}

fn build_events(before: &BattleState, after: &BattleState) -> Vec<String> {
    let mut events = Vec::new();
    if before.turn != after.turn {
        events.push(format!("turn {} -> {}", before.turn, after.turn));
    }
    append_side_events(&mut events, "player", before, after, |state| &state.player);
    append_side_events(&mut events, "opponent", before, after, |state| &state.opponent);
    if before.weather.condition != after.weather.condition {
        events.push(format!(
            "weather {:?} -> {:?}",
            before.weather.condition, after.weather.condition
        ));
    }
    if let Some(result) = after.result {
        events.push(format!("outcome: {:?}", result));
    }
    events
}

fn append_side_events(
    events: &mut Vec<String>,
    label: &str,
    before: &BattleState,
    after: &BattleState,
    side: impl Fn(&BattleState) -> &Battler,
) {
    let (was, now) = (side(before), side(after));
    if was.active != now.active {
        events.push(format!("{label}_switch {} -> {}", was.active, now.active));
        return;
    }
    let (was, now) = (was.active_creature(), now.active_creature());
    if was.current_hp != now.current_hp {
        events.push(format!("{label}_hp {} -> {}", was.current_hp, now.current_hp));
    }
    if was.status != now.status {
        events.push(format!("{label}_status {:?} -> {:?}", was.status, now.status));
    }
}
