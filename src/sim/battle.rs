//! The battle state machine.
//!
//! [`Battle`] owns the authoritative [`BattleState`] and is the only thing
//! that mutates it. One call to [`Battle::execute_turn`] validates the
//! player's action, asks the AI for the opponent's, orders both, runs them
//! through the move executor, resolves faints and finally applies end-of-turn
//! effects. Contract violations come back as [`BattleError`] before anything
//! is touched; everything else is narration.

use crate::battle_logger::BattleLogger;
use crate::config::{BattleConfig, BattleKind};
use crate::data::dex::{MoveResolver, SpeciesResolver};
use crate::error::BattleError;
use crate::random::RandomSource;
use crate::sim::abilities::misc_abilities::{self, on_enter_effect, AbilityEndOfTurn, EnterEffect};
use crate::sim::abilities::status_abilities::{apply_intimidate, poison_heals, shed_skin_triggers};
use crate::sim::ai::{ai_for_tier, AiContext, BattleAI};
use crate::sim::creature::Creature;
use crate::sim::items::bag::BagItem;
use crate::sim::items::battle_items::{self, EndOfTurnEffect};
use crate::sim::items::consumable::try_consume_berry;
use crate::sim::moves::{execute_move, Combatant, MoveChoice};
use crate::sim::progression::{ClassicExperience, EvolutionService, ExperienceService, NoEvolution};
use crate::sim::stats::{stage_message, StageChange, StatAxis, StatStages};
use crate::sim::switching::{next_available, switch_in, validate_switch};
use crate::sim::turn_order::{action_rank, effective_speed, resolve_order, OrderKey, Side};
use crate::sim::weather::{
    residual_message, weather_residual_damage, WeatherState, ABILITY_WEATHER_TURNS,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

const TRAINER_FLEE_MESSAGE: &str = "No! There's no running from a trainer battle!";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    ActionSelect,
    TurnExecute,
    /// Both actions resolved; end-of-turn residuals are being applied.
    TurnResult,
    /// The player's active creature fainted and a replacement must be chosen.
    ForceSwitch,
    BattleEnd,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum BattleResult {
    Win,
    Lose,
    Fled,
    Captured,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Action {
    Fight(MoveChoice),
    /// Roster index to bring in.
    Switch(usize),
    UseItem { item: BagItem, target: usize },
    Flee,
}

/// One side of the battle: the roster, who is out, and that creature's
/// stat stages.
#[derive(Clone, Debug)]
pub struct Battler {
    pub roster: Vec<Creature>,
    pub active: usize,
    pub stages: StatStages,
    /// Set when the active creature fainted and the player still has to pick
    /// its replacement.
    pub pending_replacement: bool,
}

impl Battler {
    /// Leads with the first creature that can still battle.
    pub fn new(roster: Vec<Creature>) -> Self {
        let active = roster.iter().position(|creature| !creature.is_fainted()).unwrap_or(0);
        Self {
            roster,
            active,
            stages: StatStages::default(),
            pending_replacement: false,
        }
    }

    pub fn active_creature(&self) -> &Creature {
        &self.roster[self.active]
    }

    pub fn active_creature_mut(&mut self) -> &mut Creature {
        &mut self.roster[self.active]
    }

    pub fn is_wiped(&self) -> bool {
        self.roster.iter().all(Creature::is_fainted)
    }
}

#[derive(Clone, Debug)]
pub struct BattleState {
    pub player: Battler,
    pub opponent: Battler,
    pub kind: BattleKind,
    pub phase: Phase,
    pub turn: u32,
    pub flee_attempts: u32,
    pub weather: WeatherState,
    pub log: BattleLogger,
    pub result: Option<BattleResult>,
    pub trainer_name: String,
}

impl BattleState {
    pub fn battler(&self, side: Side) -> &Battler {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    pub fn battler_mut(&mut self, side: Side) -> &mut Battler {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }

    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }
}

/// What presentation gets back after each call.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TurnReport {
    pub messages: Vec<String>,
    pub phase: Phase,
    pub result: Option<BattleResult>,
    /// The turn the messages belong to.
    pub turn: u32,
}

pub struct Battle {
    state: BattleState,
    species: Arc<dyn SpeciesResolver>,
    moves: Arc<dyn MoveResolver>,
    experience: Box<dyn ExperienceService>,
    evolution: Box<dyn EvolutionService>,
    ai: Box<dyn BattleAI>,
}

impl Battle {
    pub fn new(
        player: Vec<Creature>,
        opponent: Vec<Creature>,
        config: &BattleConfig,
        species: Arc<dyn SpeciesResolver>,
        moves: Arc<dyn MoveResolver>,
    ) -> Result<Self, BattleError> {
        for roster in [&player, &opponent] {
            validate_roster(roster, species.as_ref(), moves.as_ref())?;
        }
        let weather = config
            .weather
            .map(|initial| WeatherState::new(initial.condition, initial.turns))
            .unwrap_or_default();
        let state = BattleState {
            player: Battler::new(player),
            opponent: Battler::new(opponent),
            kind: config.kind,
            phase: Phase::ActionSelect,
            turn: 1,
            flee_attempts: 0,
            weather,
            log: BattleLogger::new(),
            result: None,
            trainer_name: config.trainer_label().to_string(),
        };
        let mut battle = Self {
            state,
            species,
            moves,
            experience: Box::new(ClassicExperience),
            evolution: Box::new(NoEvolution),
            ai: ai_for_tier(config.ai),
        };
        battle.introduce();
        Ok(battle)
    }

    pub fn with_experience(mut self, experience: impl ExperienceService + 'static) -> Self {
        self.experience = Box::new(experience);
        self
    }

    pub fn with_evolution(mut self, evolution: impl EvolutionService + 'static) -> Self {
        self.evolution = Box::new(evolution);
        self
    }

    pub fn with_ai(mut self, ai: Box<dyn BattleAI>) -> Self {
        self.ai = ai;
        self
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    /// Narration produced by the most recent call (or the intro).
    pub fn report(&self) -> TurnReport {
        TurnReport {
            messages: self.state.log.turn_lines().to_vec(),
            phase: self.state.phase,
            result: self.state.result,
            turn: self.state.turn,
        }
    }

    /// Actions the player may submit right now.
    pub fn legal_actions(&self) -> Vec<Action> {
        if self.state.is_over() {
            return Vec::new();
        }
        let player = &self.state.player;
        let switches = player
            .roster
            .iter()
            .enumerate()
            .filter(|(index, creature)| *index != player.active && !creature.is_fainted())
            .map(|(index, _)| Action::Switch(index));
        if self.state.phase == Phase::ForceSwitch {
            return switches.collect();
        }
        let usable = player.active_creature().usable_slots();
        let mut actions: Vec<Action> = if usable.is_empty() {
            vec![Action::Fight(MoveChoice::Struggle)]
        } else {
            usable
                .into_iter()
                .map(|index| Action::Fight(MoveChoice::Slot(index)))
                .collect()
        };
        actions.extend(switches);
        if self.state.kind == BattleKind::Wild {
            actions.push(Action::Flee);
        }
        actions
    }

    pub fn execute_turn(
        &mut self,
        action: Action,
        rng: &mut dyn RandomSource,
    ) -> Result<TurnReport, BattleError> {
        if self.state.is_over() {
            return Err(BattleError::BattleOver);
        }
        if self.state.phase == Phase::ForceSwitch {
            return self.replace_fainted(action);
        }
        let action = self.validate_player_action(action)?;

        if action == Action::Flee && self.state.kind == BattleKind::Trainer {
            self.state.log.begin_segment();
            self.state.log.push(TRAINER_FLEE_MESSAGE);
            self.state.phase = Phase::ActionSelect;
            return Ok(self.report());
        }

        let turn = self.state.turn;
        self.state.log.begin_turn(turn);
        self.state.phase = Phase::TurnExecute;
        debug!(turn, ?action, "executing turn");

        let plan = if action == Action::Flee {
            if self.attempt_flee(rng) {
                return Ok(self.report());
            }
            vec![(Side::Opponent, self.opponent_action(rng))]
        } else {
            let opponent_action = self.opponent_action(rng);
            let order = resolve_order(
                self.order_key(Side::Player, &action),
                self.order_key(Side::Opponent, &opponent_action),
                rng,
            );
            order
                .into_iter()
                .map(|side| match side {
                    Side::Player => (side, action),
                    Side::Opponent => (side, opponent_action),
                })
                .collect()
        };

        let starting = [self.state.player.active, self.state.opponent.active];
        for (side, planned) in plan {
            if self.state.is_over() {
                break;
            }
            let battler = self.state.battler(side);
            let started_with = starting[side_slot(side)];
            if battler.active != started_with || battler.active_creature().is_fainted() {
                debug!(?side, "pending action cancelled");
                continue;
            }
            let target_down = self.state.battler(side.other()).active_creature().is_fainted();
            if matches!(planned, Action::Fight(_)) && target_down {
                debug!(?side, "no target left for pending move");
                continue;
            }
            self.run_action(side, planned, rng)?;
            self.check_faint(side.other());
            self.check_faint(side);
        }

        if !self.state.is_over() {
            self.state.phase = Phase::TurnResult;
            self.end_of_turn(rng);
        }
        self.finish_turn();
        Ok(TurnReport {
            turn,
            ..self.report()
        })
    }

    /// Accepts a successful capture from the external capture flow.
    pub fn record_capture(&mut self) -> Result<TurnReport, BattleError> {
        if self.state.is_over() {
            return Err(BattleError::BattleOver);
        }
        if self.state.kind == BattleKind::Trainer {
            return Err(BattleError::CaptureNotAllowed);
        }
        let name = self.state.opponent.active_creature().name().to_string();
        self.state.log.begin_segment();
        self.state.log.push(format!("Gotcha! {name} was caught!"));
        self.state.result = Some(BattleResult::Captured);
        self.state.phase = Phase::BattleEnd;
        Ok(self.report())
    }

    fn introduce(&mut self) {
        let opponent = self.state.opponent.active_creature().name().to_string();
        match self.state.kind {
            BattleKind::Wild => self.state.log.push(format!("A wild {opponent} appeared!")),
            BattleKind::Trainer => {
                let trainer = self.state.trainer_name.clone();
                self.state.log.push(format!("{trainer} wants to battle!"));
                self.state.log.push(format!("{trainer} sent out {opponent}!"));
            }
        }
        let player = self.state.player.active_creature().name().to_string();
        self.state.log.push(format!("Go! {player}!"));
        if let Some(weather) = self.state.weather.condition {
            self.state.log.push(weather.start_message());
        }
        self.on_enter(Side::Player);
        self.on_enter(Side::Opponent);
    }

    fn validate_player_action(&self, action: Action) -> Result<Action, BattleError> {
        let player = &self.state.player;
        match action {
            Action::Fight(MoveChoice::Slot(index)) => {
                let creature = player.active_creature();
                let known = creature.moves.len();
                let slot = creature
                    .moves
                    .get(index)
                    .ok_or(BattleError::MoveIndexOutOfRange { index, known })?;
                if slot.is_usable() {
                    Ok(action)
                } else if creature.has_usable_move() {
                    Err(BattleError::MoveExhausted { index })
                } else {
                    Ok(Action::Fight(MoveChoice::Struggle))
                }
            }
            Action::Fight(MoveChoice::Struggle) => {
                if player.active_creature().has_usable_move() {
                    Err(BattleError::StruggleUnavailable)
                } else {
                    Ok(action)
                }
            }
            Action::Switch(index) => validate_switch(player, index).map(|_| action),
            Action::UseItem { target, .. } => match player.roster.get(target) {
                Some(creature) if !creature.is_fainted() => Ok(action),
                _ => Err(BattleError::InvalidItemTarget { index: target }),
            },
            Action::Flee => Ok(action),
        }
    }

    fn replace_fainted(&mut self, action: Action) -> Result<TurnReport, BattleError> {
        let Action::Switch(index) = action else {
            return Err(BattleError::ReplacementRequired);
        };
        validate_switch(&self.state.player, index)?;
        self.state.log.begin_segment();
        self.perform_switch(Side::Player, index);
        self.state.phase = Phase::ActionSelect;
        Ok(self.report())
    }

    fn attempt_flee(&mut self, rng: &mut dyn RandomSource) -> bool {
        let player = effective_speed(
            self.state.player.active_creature(),
            &self.state.player.stages,
            self.state.weather.condition,
        );
        let opponent = effective_speed(
            self.state.opponent.active_creature(),
            &self.state.opponent.stages,
            self.state.weather.condition,
        );
        let retry_bonus = 30.0 * self.state.flee_attempts as f64 / 256.0;
        let odds = (player * 128.0 / opponent.max(1.0) / 256.0 + retry_bonus).min(1.0);
        let escaped = rng.next_unit() < odds;
        debug!(odds, escaped, attempts = self.state.flee_attempts, "flee attempt");
        if escaped {
            self.state.log.push("Got away safely!");
            self.state.result = Some(BattleResult::Fled);
            self.state.phase = Phase::BattleEnd;
        } else {
            self.state.flee_attempts += 1;
            self.state.log.push("Can't escape!");
        }
        escaped
    }

    /// Asks the AI and falls back to a plain attack when it proposes
    /// something illegal.
    fn opponent_action(&mut self, rng: &mut dyn RandomSource) -> Action {
        let ctx = AiContext {
            own: &self.state.opponent,
            foe: &self.state.player,
            moves: self.moves.as_ref(),
            weather: self.state.weather.condition,
        };
        let proposed = self.ai.choose_action(&ctx, rng);
        let opponent = &self.state.opponent;
        let legal = match proposed {
            Action::Fight(MoveChoice::Slot(index)) => opponent
                .active_creature()
                .moves
                .get(index)
                .is_some_and(|slot| slot.is_usable()),
            Action::Fight(MoveChoice::Struggle) => !opponent.active_creature().has_usable_move(),
            Action::Switch(index) => validate_switch(opponent, index).is_ok(),
            Action::UseItem { .. } | Action::Flee => false,
        };
        if legal {
            return proposed;
        }
        debug!(?proposed, "ai proposed an illegal action");
        match opponent.active_creature().usable_slots().first() {
            Some(index) => Action::Fight(MoveChoice::Slot(*index)),
            None => Action::Fight(MoveChoice::Struggle),
        }
    }

    fn order_key(&self, side: Side, action: &Action) -> OrderKey {
        let battler = self.state.battler(side);
        let creature = battler.active_creature();
        let priority = match action {
            Action::Fight(MoveChoice::Slot(index)) => creature
                .moves
                .get(*index)
                .and_then(|slot| self.moves.move_definition(&slot.move_id))
                .map(|definition| definition.priority)
                .unwrap_or(0),
            _ => 0,
        };
        OrderKey {
            rank: action_rank(action),
            priority,
            speed: effective_speed(creature, &battler.stages, self.state.weather.condition),
        }
    }

    fn run_action(
        &mut self,
        side: Side,
        action: Action,
        rng: &mut dyn RandomSource,
    ) -> Result<(), BattleError> {
        match action {
            Action::Fight(choice) => {
                let mut attacker = self.combatant(side);
                let mut defender = self.combatant(side.other());
                let outcome = execute_move(
                    &mut attacker,
                    &mut defender,
                    choice,
                    self.moves.as_ref(),
                    self.state.weather.condition,
                    rng,
                )?;
                self.commit(side, attacker);
                self.commit(side.other(), defender);
                self.state.log.extend(outcome.messages);
            }
            Action::Switch(index) => self.perform_switch(side, index),
            Action::UseItem { item, target } => {
                let battler = self.state.battler_mut(side);
                if let Some(creature) = battler.roster.get_mut(target) {
                    let messages = item.apply(creature);
                    self.state.log.extend(messages);
                }
            }
            Action::Flee => {}
        }
        Ok(())
    }

    fn combatant(&self, side: Side) -> Combatant {
        let battler = self.state.battler(side);
        Combatant::new(self.label(side), battler.active_creature().clone(), battler.stages)
    }

    fn commit(&mut self, side: Side, combatant: Combatant) {
        let battler = self.state.battler_mut(side);
        battler.stages = combatant.stages;
        *battler.active_creature_mut() = combatant.creature;
    }

    fn label(&self, side: Side) -> String {
        self.label_for(side, self.state.battler(side).active_creature())
    }

    /// "Pikachu" for the player, "Wild Pidgey" or "Foe Onix" for the opponent.
    fn label_for(&self, side: Side, creature: &Creature) -> String {
        let name = creature.name();
        match (side, self.state.kind) {
            (Side::Player, _) => name.to_string(),
            (Side::Opponent, BattleKind::Wild) => format!("Wild {name}"),
            (Side::Opponent, BattleKind::Trainer) => format!("Foe {name}"),
        }
    }

    fn perform_switch(&mut self, side: Side, index: usize) {
        let outgoing = self.state.battler(side).active_creature();
        if !outgoing.is_fainted() {
            let withdraw = match (side, self.state.kind) {
                (Side::Player, _) => format!("{}, come back!", outgoing.name()),
                (Side::Opponent, BattleKind::Trainer) => {
                    format!("{} withdrew {}!", self.state.trainer_name, outgoing.name())
                }
                (Side::Opponent, BattleKind::Wild) => {
                    format!("Wild {} retreated!", outgoing.name())
                }
            };
            self.state.log.push(withdraw);
        }
        switch_in(self.state.battler_mut(side), index);
        let incoming = self.state.battler(side).active_creature().name().to_string();
        let send_out = match (side, self.state.kind) {
            (Side::Player, _) => format!("Go! {incoming}!"),
            (Side::Opponent, BattleKind::Trainer) => {
                format!("{} sent out {incoming}!", self.state.trainer_name)
            }
            (Side::Opponent, BattleKind::Wild) => format!("A wild {incoming} appeared!"),
        };
        debug!(?side, index, "switched in");
        self.state.log.push(send_out);
        self.on_enter(side);
    }

    fn on_enter(&mut self, side: Side) {
        let creature = self.state.battler(side).active_creature();
        let Some(ability) = creature.ability else {
            return;
        };
        match on_enter_effect(Some(ability)) {
            Some(EnterEffect::Intimidate) => {
                if self.state.battler(side.other()).active_creature().is_fainted() {
                    return;
                }
                let user = self.label(side);
                let target = self.label(side.other());
                let change = apply_intimidate(&mut self.state.battler_mut(side.other()).stages);
                self.state.log.push(format!("{user}'s Intimidate!"));
                self.state
                    .log
                    .push(stage_message(&target, StatAxis::Attack, -1, change));
            }
            Some(EnterEffect::SetWeather(weather)) => {
                if self.state.weather.is(weather) {
                    return;
                }
                self.state.weather.set(weather, ABILITY_WEATHER_TURNS);
                let user = self.label(side);
                self.state.log.push(format!("{user}'s {}!", ability.name()));
                self.state.log.push(weather.start_message());
            }
            None => {}
        }
    }

    /// Resolves a fainted active creature once: narration, experience, then
    /// the result, a forced replacement, or the opponent's next creature.
    fn check_faint(&mut self, side: Side) {
        if self.state.is_over() {
            return;
        }
        let battler = self.state.battler(side);
        if !battler.active_creature().is_fainted() || battler.pending_replacement {
            return;
        }
        let label = self.label(side);
        self.state.log.push(format!("{label} fainted!"));
        debug!(?side, "active creature fainted");
        match side {
            Side::Opponent => {
                self.grant_experience();
                if self.state.opponent.is_wiped() {
                    if self.state.kind == BattleKind::Trainer {
                        let trainer = self.state.trainer_name.clone();
                        self.state.log.push(format!("You defeated {trainer}!"));
                    }
                    self.state.result = Some(BattleResult::Win);
                } else if let Some(next) = next_available(&self.state.opponent) {
                    self.perform_switch(Side::Opponent, next);
                }
            }
            Side::Player => {
                if self.state.player.is_wiped() {
                    self.state.log.push("You have no more creatures that can fight!");
                    self.state.log.push("You blacked out!");
                    self.state.result = Some(BattleResult::Lose);
                } else {
                    self.state.player.pending_replacement = true;
                }
            }
        }
    }

    fn grant_experience(&mut self) {
        let species = Arc::clone(&self.species);
        let defeated = self.state.opponent.active_creature();
        let Some(defeated_species) = species.species(&defeated.species_id) else {
            return;
        };
        let gained = self.experience.experience_yield(
            defeated_species,
            defeated.level,
            self.state.kind == BattleKind::Trainer,
        );
        if self.state.player.active_creature().is_fainted() {
            return;
        }
        let creature = self.state.player.active_creature_mut();
        let Some(own_species) = species.species(&creature.species_id) else {
            return;
        };
        let (experience, level) =
            self.experience
                .apply_experience(own_species, creature.experience, creature.level, gained);
        let name = creature.name().to_string();
        let previous_level = creature.level;
        creature.experience = experience;
        let mut messages = vec![format!("{name} gained {gained} Exp. Points!")];
        if level > previous_level {
            creature.level = level;
            creature.recalculate_stats(own_species);
            messages.push(format!("{name} grew to level {level}!"));
            let evolved = self
                .evolution
                .evolution_target(creature, own_species)
                .and_then(|target| species.species(&target));
            if let Some(target) = evolved {
                messages.push(format!("What? {name} is evolving!"));
                creature.evolve_into(target);
                messages.push(format!("Congratulations! {name} evolved into {}!", target.name));
            }
        }
        debug!(gained, level, "experience granted");
        self.state.log.extend(messages);
    }

    fn end_of_turn(&mut self, rng: &mut dyn RandomSource) {
        for side in [Side::Player, Side::Opponent] {
            self.status_residual(side);
        }

        if let Some(weather) = self.state.weather.condition {
            for side in [Side::Player, Side::Opponent] {
                let label = self.label(side);
                let creature = self.state.battler_mut(side).active_creature_mut();
                if creature.is_fainted()
                    || misc_abilities::ignores_weather_chip(creature.ability, weather)
                {
                    continue;
                }
                let max_hp = creature.max_hp();
                let chip = weather_residual_damage(&creature.types, max_hp, Some(weather));
                if let Some(damage) = chip {
                    creature.take_damage(damage);
                    self.state.log.push(residual_message(&label, weather));
                }
            }
            if let Some(message) = self.state.weather.tick() {
                self.state.log.push(message);
            }
        }

        for side in [Side::Player, Side::Opponent] {
            self.held_item_and_ability_residual(side, rng);
        }

        self.check_faint(Side::Opponent);
        self.check_faint(Side::Player);
    }

    fn status_residual(&mut self, side: Side) {
        let label = self.label(side);
        let creature = self.state.battler_mut(side).active_creature_mut();
        let Some(status) = creature.status else {
            return;
        };
        if creature.is_fainted() {
            return;
        }
        if poison_heals(creature.ability, Some(status)) {
            if creature.heal((creature.max_hp() / 8).max(1)) > 0 {
                self.state.log.push(format!("{label} restored HP using its Poison Heal!"));
            }
            return;
        }
        let chip = status.chip_damage(creature.max_hp());
        if chip > 0 {
            creature.take_damage(chip);
            self.state.log.push(status.chip_message(&label));
        }
    }

    fn held_item_and_ability_residual(&mut self, side: Side, rng: &mut dyn RandomSource) {
        let label = self.label(side);
        let weather = self.state.weather.condition;
        let mut messages = Vec::new();
        let battler = self.state.battler_mut(side);
        let creature = &mut battler.roster[battler.active];
        if creature.is_fainted() {
            return;
        }

        match battle_items::end_of_turn_effect(creature, &creature.types) {
            Some(EndOfTurnEffect::Heal { amount, item }) => {
                creature.heal(amount);
                messages.push(format!("{label} restored a little HP using its {}!", item.name()));
            }
            Some(EndOfTurnEffect::Damage { amount, item }) => {
                creature.take_damage(amount);
                messages.push(format!("{label} is hurt by its {}!", item.name()));
            }
            None => {}
        }
        if creature.is_fainted() {
            self.state.log.extend(messages);
            return;
        }

        match misc_abilities::end_of_turn_effect(creature, weather) {
            Some(AbilityEndOfTurn::Heal(amount)) => {
                if creature.heal(amount) > 0 {
                    let ability =
                        creature.ability.map(|ability| ability.name()).unwrap_or_default();
                    messages.push(format!("{label} restored HP using its {ability}!"));
                }
            }
            Some(AbilityEndOfTurn::RaiseSpeed) => {
                let change = battler.stages.apply(StatAxis::Speed, 1);
                if matches!(change, StageChange::Applied { .. }) {
                    messages.push(stage_message(&label, StatAxis::Speed, 1, change));
                }
            }
            None => {}
        }

        let creature = &mut battler.roster[battler.active];
        if shed_skin_triggers(creature.ability, creature.status, rng) {
            if let Some(status) = creature.status.take() {
                messages.push(format!("{label}'s Shed Skin cured its {}!", status.name()));
            }
        }
        if let Some(effect) = try_consume_berry(creature) {
            messages.push(effect.message(&label));
        }
        self.state.log.extend(messages);
    }

    fn finish_turn(&mut self) {
        self.state.phase = if self.state.is_over() {
            Phase::BattleEnd
        } else {
            self.state.turn += 1;
            if self.state.player.pending_replacement {
                Phase::ForceSwitch
            } else {
                Phase::ActionSelect
            }
        };
        debug!(turn = self.state.turn, phase = ?self.state.phase, "turn finished");
    }
}

fn side_slot(side: Side) -> usize {
    match side {
        Side::Player => 0,
        Side::Opponent => 1,
    }
}

fn validate_roster(
    roster: &[Creature],
    species: &dyn SpeciesResolver,
    moves: &dyn MoveResolver,
) -> Result<(), BattleError> {
    if roster.is_empty() {
        return Err(BattleError::EmptyRoster);
    }
    if roster.iter().all(Creature::is_fainted) {
        return Err(BattleError::NoHealthyMember);
    }
    for creature in roster {
        if species.species(&creature.species_id).is_none() {
            return Err(BattleError::UnknownSpecies(creature.species_id.clone()));
        }
        if let Some(slot) = creature
            .moves
            .iter()
            .find(|slot| moves.move_definition(&slot.move_id).is_none())
        {
            return Err(BattleError::UnknownMove(slot.move_id.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dex::{sample_dex, Dex};
    use crate::data::species::SpeciesDefinition;
    use crate::random::ScriptedRandom;
    use crate::sim::abilities::Ability;
    use crate::sim::ai::RandomAI;
    use crate::sim::creature::test_creature;
    use crate::sim::items::HeldItem;
    use crate::sim::status::Status;
    use crate::sim::weather::Weather;

    fn battle(player: Vec<Creature>, opponent: Vec<Creature>, config: &BattleConfig) -> Battle {
        let dex: Arc<Dex> = Arc::new(sample_dex().clone());
        Battle::new(player, opponent, config, dex.clone(), dex).expect("battle should start")
    }

    #[test]
    fn empty_or_fainted_rosters_are_rejected() {
        let dex: Arc<Dex> = Arc::new(sample_dex().clone());
        let config = BattleConfig::wild();
        let result = Battle::new(
            Vec::new(),
            vec![test_creature("pidgey", 5, &["tackle"])],
            &config,
            dex.clone(),
            dex.clone(),
        );
        assert_eq!(result.err(), Some(BattleError::EmptyRoster));

        let mut fainted = test_creature("pidgey", 5, &["tackle"]);
        fainted.current_hp = 0;
        let result = Battle::new(
            vec![test_creature("pikachu", 5, &["thundershock"])],
            vec![fainted],
            &config,
            dex.clone(),
            dex,
        );
        assert_eq!(result.err(), Some(BattleError::NoHealthyMember));
    }

    #[test]
    fn wild_intro_narration() {
        let battle = battle(
            vec![test_creature("pikachu", 10, &["thundershock"])],
            vec![test_creature("pidgey", 5, &["tackle"])],
            &BattleConfig::wild(),
        );
        assert_eq!(
            battle.report().messages,
            vec!["A wild Pidgey appeared!".to_string(), "Go! Pikachu!".to_string()]
        );
        assert_eq!(battle.state().phase, Phase::ActionSelect);
        assert_eq!(battle.state().turn, 1);
    }

    #[test]
    fn trainer_intro_runs_on_enter_abilities() {
        let gyarados = test_creature("gyarados", 30, &["bite"]).with_ability(Ability::Intimidate);
        let battle = battle(
            vec![test_creature("pikachu", 30, &["thundershock"])],
            vec![gyarados],
            &BattleConfig::trainer("Misty"),
        );
        assert_eq!(
            battle.report().messages,
            vec![
                "Misty wants to battle!".to_string(),
                "Misty sent out Gyarados!".to_string(),
                "Go! Pikachu!".to_string(),
                "Foe Gyarados's Intimidate!".to_string(),
                "Pikachu's Attack fell!".to_string(),
            ]
        );
        assert_eq!(battle.state().player.stages.get(StatAxis::Attack), -1);
    }

    #[test]
    fn exhausted_slot_is_rejected_while_others_remain() {
        let mut pikachu = test_creature("pikachu", 10, &["thundershock", "growl"]);
        pikachu.moves[0].remaining_uses = 0;
        let pidgey = test_creature("pidgey", 5, &["tackle"]);
        let mut battle = battle(vec![pikachu], vec![pidgey], &BattleConfig::wild());
        let mut rng = ScriptedRandom::new([]);
        assert_eq!(
            battle.execute_turn(Action::Fight(MoveChoice::Slot(0)), &mut rng),
            Err(BattleError::MoveExhausted { index: 0 })
        );
        assert_eq!(
            battle.execute_turn(Action::Fight(MoveChoice::Struggle), &mut rng),
            Err(BattleError::StruggleUnavailable)
        );
        assert_eq!(
            battle.execute_turn(Action::Fight(MoveChoice::Slot(4)), &mut rng),
            Err(BattleError::MoveIndexOutOfRange { index: 4, known: 2 })
        );
        assert_eq!(rng.draws(), 0);
        assert_eq!(battle.state().turn, 1);
    }

    #[test]
    fn trainer_flee_is_refused_without_spending_the_turn() {
        let mut battle = battle(
            vec![test_creature("pikachu", 10, &["thundershock"])],
            vec![test_creature("onix", 12, &["tackle"])],
            &BattleConfig::trainer("Brock"),
        );
        let mut rng = ScriptedRandom::new([]);
        let report = battle.execute_turn(Action::Flee, &mut rng).expect("flee is legal");
        assert_eq!(report.messages, vec![TRAINER_FLEE_MESSAGE.to_string()]);
        assert_eq!(report.result, None);
        assert_eq!(battle.state().turn, 1);
        assert_eq!(battle.state().phase, Phase::ActionSelect);
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn item_on_a_fainted_member_is_rejected() {
        let mut rattata = test_creature("rattata", 10, &["tackle"]);
        rattata.current_hp = 0;
        let mut battle = battle(
            vec![test_creature("pikachu", 10, &["thundershock"]), rattata],
            vec![test_creature("pidgey", 5, &["tackle"])],
            &BattleConfig::wild(),
        );
        let mut rng = ScriptedRandom::new([]);
        let action = Action::UseItem {
            item: BagItem::Potion,
            target: 1,
        };
        assert_eq!(
            battle.execute_turn(action, &mut rng),
            Err(BattleError::InvalidItemTarget { index: 1 })
        );
    }

    #[test]
    fn capture_ends_wild_battles_only() {
        let mut wild = battle(
            vec![test_creature("pikachu", 10, &["thundershock"])],
            vec![test_creature("pidgey", 5, &["tackle"])],
            &BattleConfig::wild(),
        );
        let report = wild.record_capture().expect("wild capture");
        assert_eq!(report.messages, vec!["Gotcha! Pidgey was caught!".to_string()]);
        assert_eq!(report.result, Some(BattleResult::Captured));
        assert_eq!(wild.record_capture().err(), Some(BattleError::BattleOver));

        let mut trainer = battle(
            vec![test_creature("pikachu", 10, &["thundershock"])],
            vec![test_creature("onix", 12, &["tackle"])],
            &BattleConfig::trainer("Brock"),
        );
        assert_eq!(trainer.record_capture().err(), Some(BattleError::CaptureNotAllowed));
    }

    struct GenerousExperience;

    impl ExperienceService for GenerousExperience {
        fn experience_yield(
            &self,
            _defeated: &SpeciesDefinition,
            _level: u8,
            _trainer: bool,
        ) -> u32 {
            5000
        }

        fn apply_experience(
            &self,
            species: &SpeciesDefinition,
            experience: u32,
            level: u8,
            gained: u32,
        ) -> (u32, u8) {
            ClassicExperience.apply_experience(species, experience, level, gained)
        }
    }

    #[test]
    fn injected_collaborators_drive_experience_and_ai() {
        let mut magikarp = test_creature("magikarp", 5, &["splash", "tackle"]);
        magikarp.current_hp = 1;
        let mut battle = battle(
            vec![test_creature("pikachu", 10, &["thundershock"])],
            vec![magikarp],
            &BattleConfig::wild(),
        )
        .with_experience(GenerousExperience)
        .with_ai(Box::new(RandomAI));
        let mut rng = ScriptedRandom::new([]).with_fallback(0.5);
        let report = battle
            .execute_turn(Action::Fight(MoveChoice::Slot(0)), &mut rng)
            .expect("turn runs");
        assert!(report.messages.contains(&"Pikachu gained 5000 Exp. Points!".to_string()));
        assert!(battle.state().player.active_creature().level > 10);
        assert_eq!(report.result, Some(BattleResult::Win));
    }

    #[test]
    fn shed_skin_is_not_rolled_for_a_sludge_knockout() {
        let mut rattata = test_creature("rattata", 10, &["tackle"])
            .with_ability(Ability::ShedSkin)
            .with_item(HeldItem::BlackSludge);
        rattata.status = Some(Status::Paralysis);
        rattata.current_hp = 1;
        let mut battle = battle(
            vec![test_creature("pikachu", 10, &["thundershock"])],
            vec![rattata],
            &BattleConfig::wild(),
        );
        let mut rng = ScriptedRandom::new([]);
        battle.held_item_and_ability_residual(Side::Opponent, &mut rng);
        assert_eq!(rng.draws(), 0);
        let foe = battle.state().opponent.active_creature();
        assert!(foe.is_fainted());
        assert_eq!(foe.status, Some(Status::Paralysis));
        assert_eq!(
            battle.state().log.turn_lines().last().map(String::as_str),
            Some("Wild Rattata is hurt by its Black Sludge!")
        );
    }

    #[test]
    fn poison_chips_at_end_of_turn() {
        let mut snorlax = test_creature("snorlax", 30, &["defensecurl"]);
        snorlax.status = Some(Status::Poison);
        let max_hp = snorlax.max_hp();
        let mut battle = battle(
            vec![snorlax],
            vec![test_creature("magikarp", 5, &["splash"])],
            &BattleConfig::wild(),
        );
        let mut rng = ScriptedRandom::new([]).with_fallback(0.0);
        let report = battle
            .execute_turn(Action::Fight(MoveChoice::Slot(0)), &mut rng)
            .expect("turn runs");
        assert!(report.messages.contains(&"Snorlax is hurt by poison!".to_string()));
        assert_eq!(battle.state().player.active_creature().current_hp, max_hp - max_hp / 8);
        assert_eq!(battle.state().turn, 2);
    }

    #[test]
    fn weather_expires_after_its_turns() {
        let mut battle = battle(
            vec![test_creature("snorlax", 30, &["defensecurl"])],
            vec![test_creature("magikarp", 5, &["splash"])],
            &BattleConfig::wild().with_weather(Weather::Rain, 1),
        );
        assert!(battle.report().messages.contains(&"It started to rain!".to_string()));
        let mut rng = ScriptedRandom::new([]).with_fallback(0.0);
        let report = battle
            .execute_turn(Action::Fight(MoveChoice::Slot(0)), &mut rng)
            .expect("turn runs");
        assert_eq!(report.messages.last().map(String::as_str), Some("The rain stopped."));
        assert_eq!(battle.state().weather.condition, None);
    }
}
