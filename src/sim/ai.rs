//! Opponent strategies. One is picked per battle from [`AiTier`].

use crate::config::AiTier;
use crate::data::dex::MoveResolver;
use crate::data::moves::MoveDefinition;
use crate::data::types::effectiveness;
use crate::random::RandomSource;
use crate::sim::battle::{Action, Battler};
use crate::sim::creature::Creature;
use crate::sim::damage::{estimate_damage, DamageContext};
use crate::sim::moves::secondary::is_immune_to;
use crate::sim::moves::{Combatant, MoveChoice};
use crate::sim::weather::Weather;
use tracing::debug;

const STATUS_MOVE_SCORE: f64 = 30.0;
const LETHAL_BONUS: f64 = 1000.0;
const SWITCH_CHECK_CHANCE: f64 = 0.25;

pub struct AiContext<'a> {
    pub own: &'a Battler,
    pub foe: &'a Battler,
    pub moves: &'a dyn MoveResolver,
    pub weather: Option<Weather>,
}

pub trait BattleAI {
    fn choose_action(&mut self, ctx: &AiContext<'_>, rng: &mut dyn RandomSource) -> Action;
}

pub fn ai_for_tier(tier: AiTier) -> Box<dyn BattleAI> {
    match tier {
        AiTier::Random => Box::new(RandomAI),
        AiTier::Basic => Box::new(BasicAI),
        AiTier::Smart => Box::new(SmartAI),
    }
}

fn usable_moves<'a>(
    creature: &Creature,
    moves: &'a dyn MoveResolver,
) -> Vec<(usize, &'a MoveDefinition)> {
    creature
        .usable_slots()
        .into_iter()
        .filter_map(|index| {
            moves
                .move_definition(&creature.moves[index].move_id)
                .map(|definition| (index, definition))
        })
        .collect()
}

/// Highest score wins; the earliest slot wins ties.
fn best_slot(scores: &[(usize, f64)]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for &(index, score) in scores {
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((index, score));
        }
    }
    best.map(|(index, _)| index)
}

fn fight(slot: Option<usize>) -> Action {
    match slot {
        Some(index) => Action::Fight(MoveChoice::Slot(index)),
        None => Action::Fight(MoveChoice::Struggle),
    }
}

/// power x effectiveness x STAB x jitter; immune moves score 0 without a draw.
fn damage_score(
    user: &Creature,
    target: &Creature,
    move_def: &MoveDefinition,
    rng: &mut dyn RandomSource,
) -> f64 {
    let eff = effectiveness(move_def.move_type, &target.types) as f64;
    if eff == 0.0 {
        return 0.0;
    }
    let stab = if user.types.contains(&move_def.move_type) { 1.5 } else { 1.0 };
    let jitter = 0.9 + 0.2 * rng.next_unit();
    move_def.power.unwrap_or(0) as f64 * eff * stab * jitter
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RandomAI;

impl BattleAI for RandomAI {
    fn choose_action(&mut self, ctx: &AiContext<'_>, rng: &mut dyn RandomSource) -> Action {
        let usable = ctx.own.active_creature().usable_slots();
        if usable.is_empty() {
            return fight(None);
        }
        let pick = usable[rng.below(usable.len() as u32) as usize];
        fight(Some(pick))
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BasicAI;

impl BattleAI for BasicAI {
    fn choose_action(&mut self, ctx: &AiContext<'_>, rng: &mut dyn RandomSource) -> Action {
        let user = ctx.own.active_creature();
        let target = ctx.foe.active_creature();
        let scores: Vec<(usize, f64)> = usable_moves(user, ctx.moves)
            .into_iter()
            .map(|(index, move_def)| {
                let score = if move_def.is_damaging() {
                    damage_score(user, target, move_def, rng)
                } else {
                    STATUS_MOVE_SCORE
                };
                (index, score)
            })
            .collect();
        let choice = best_slot(&scores);
        debug!(?scores, ?choice, "basic ai scored moves");
        fight(choice)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SmartAI;

impl SmartAI {
    /// Foe's own types hit us no better than neutrally.
    fn favorably_matched(user: &Creature, target: &Creature) -> bool {
        target
            .types
            .iter()
            .all(|ty| effectiveness(*ty, &user.types) <= 1.0)
    }

    fn status_score(user: &Creature, target: &Combatant, move_def: &MoveDefinition) -> f64 {
        let hp = user.hp_fraction();
        if hp < 0.3 {
            return 5.0;
        }
        if move_def.is_self_boost()
            && hp >= 0.7
            && Self::favorably_matched(user, &target.creature)
        {
            return 80.0;
        }
        if let Some(effect) = move_def.inflicted_status() {
            if target.creature.status.is_none() && !is_immune_to(target, effect.status) {
                return 60.0;
            }
        }
        STATUS_MOVE_SCORE
    }

    fn best_coverage(creature: &Creature, target: &Creature, moves: &dyn MoveResolver) -> f32 {
        usable_moves(creature, moves)
            .into_iter()
            .filter(|(_, move_def)| move_def.is_damaging())
            .map(|(_, move_def)| effectiveness(move_def.move_type, &target.types))
            .fold(0.0, f32::max)
    }

    /// Bench member worth switching to when nothing on the field hits the
    /// foe better than resisted.
    fn switch_candidate(ctx: &AiContext<'_>) -> Option<usize> {
        let target = ctx.foe.active_creature();
        if Self::best_coverage(ctx.own.active_creature(), target, ctx.moves) > 0.5 {
            return None;
        }
        let mut best: Option<(usize, f32)> = None;
        for (index, member) in ctx.own.roster.iter().enumerate() {
            if index == ctx.own.active || member.is_fainted() {
                continue;
            }
            let coverage = Self::best_coverage(member, target, ctx.moves);
            if coverage > 0.5 && best.map_or(true, |(_, top)| coverage > top) {
                best = Some((index, coverage));
            }
        }
        best.map(|(index, _)| index)
    }
}

impl BattleAI for SmartAI {
    fn choose_action(&mut self, ctx: &AiContext<'_>, rng: &mut dyn RandomSource) -> Action {
        let user = ctx.own.active_creature();
        let target = Combatant::new("", ctx.foe.active_creature().clone(), ctx.foe.stages);
        let usable = usable_moves(user, ctx.moves);
        if usable.is_empty() {
            return fight(None);
        }
        if let Some(index) = Self::switch_candidate(ctx) {
            if rng.chance(SWITCH_CHECK_CHANCE) {
                debug!(index, "smart ai switching out of a bad matchup");
                return Action::Switch(index);
            }
        }
        let scores: Vec<(usize, f64)> = usable
            .into_iter()
            .map(|(index, move_def)| {
                let score = if move_def.is_damaging() {
                    let mut score = damage_score(user, &target.creature, move_def, rng);
                    let estimate = estimate_damage(&DamageContext {
                        attacker: user,
                        attacker_stages: &ctx.own.stages,
                        defender: &target.creature,
                        defender_stages: &target.stages,
                        move_def,
                        weather: ctx.weather,
                    });
                    if score > 0.0 && estimate >= target.creature.current_hp {
                        score += LETHAL_BONUS;
                    }
                    score
                } else {
                    Self::status_score(user, &target, move_def)
                };
                (index, score)
            })
            .collect();
        let choice = best_slot(&scores);
        debug!(?scores, ?choice, "smart ai scored moves");
        fight(choice)
    }
}
