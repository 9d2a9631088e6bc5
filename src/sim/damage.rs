//! Pure damage calculation.
//!
//! Draw order is fixed: the critical-hit roll, then the variance roll. Status
//! moves, ability absorption and type immunity stop before the draws they
//! would otherwise make (see each early return).

use crate::data::moves::{MoveCategory, MoveDefinition};
use crate::data::types::effectiveness;
use crate::random::RandomSource;
use crate::sim::abilities::damage_modifiers::{
    attacker_stat_modifier, bypasses_burn, critical_multiplier, defender_final_modifier,
    defender_stat_modifier, power_modifier, stab_multiplier,
};
use crate::sim::abilities::{type_absorption, TypeAbsorb};
use crate::sim::creature::Creature;
use crate::sim::faint_handler::{prevent_ko_if_applicable, KoPrevention};
use crate::sim::items::battle_items::{attack_stat_modifier, base_power_modifier, final_modifier};
use crate::sim::stats::{staged_stat, StatAxis, StatStages};
use crate::sim::status::Status;
use crate::sim::weather::{weather_damage_modifier, Weather};
use tracing::trace;

pub const CRITICAL_HIT_CHANCE: f64 = 1.0 / 24.0;
pub const MIN_VARIANCE: u32 = 85;
pub const MAX_VARIANCE: u32 = 100;
/// Midpoint of the variance band, used where no roll is made.
pub const EXPECTED_VARIANCE: f64 = 0.925;

pub struct DamageContext<'a> {
    pub attacker: &'a Creature,
    pub attacker_stages: &'a StatStages,
    pub defender: &'a Creature,
    pub defender_stages: &'a StatStages,
    pub move_def: &'a MoveDefinition,
    pub weather: Option<Weather>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageOutcome {
    pub damage: u16,
    pub effectiveness: f32,
    pub critical: bool,
    pub absorbed: Option<TypeAbsorb>,
    pub survival: Option<KoPrevention>,
}

impl DamageOutcome {
    fn nothing(effectiveness: f32) -> Self {
        Self {
            damage: 0,
            effectiveness,
            critical: false,
            absorbed: None,
            survival: None,
        }
    }
}

fn axes(category: MoveCategory) -> (StatAxis, StatAxis) {
    match category {
        MoveCategory::Physical => (StatAxis::Attack, StatAxis::Defense),
        _ => (StatAxis::SpecialAttack, StatAxis::SpecialDefense),
    }
}

// Guards against 0.1-style representation error right below an integer.
fn floor_f(value: f64) -> f64 {
    (value + 1e-9).floor()
}

fn compute_base_damage(level: u8, power: u32, attack: u32, defense: u32) -> u32 {
    let level_factor = 2 * level as u64 / 5 + 2;
    let scaled = level_factor
        .saturating_mul(power as u64)
        .saturating_mul(attack as u64)
        / defense.max(1) as u64
        / 50;
    u32::try_from(scaled).unwrap_or(u32::MAX).saturating_add(2)
}

fn staged_pair(ctx: &DamageContext<'_>) -> (f64, f64) {
    let (attack_axis, defense_axis) = axes(ctx.move_def.category);
    let attack = staged_stat(
        ctx.attacker.stats.get(attack_axis),
        ctx.attacker_stages.get(attack_axis),
    ) as f64;
    let defense = staged_stat(
        ctx.defender.stats.get(defense_axis),
        ctx.defender_stages.get(defense_axis),
    )
    .max(1) as f64;
    (attack, defense)
}

fn burn_applies(ctx: &DamageContext<'_>) -> bool {
    ctx.move_def.category == MoveCategory::Physical && ctx.attacker.status == Some(Status::Burn)
}

pub fn calculate_damage(ctx: &DamageContext<'_>, rng: &mut dyn RandomSource) -> DamageOutcome {
    let move_def = ctx.move_def;
    let Some(power) = move_def.power.filter(|_| move_def.is_damaging()) else {
        return DamageOutcome::nothing(1.0);
    };

    if let Some(absorb) = type_absorption(ctx.defender.ability, move_def.move_type) {
        return DamageOutcome {
            absorbed: Some(absorb),
            ..DamageOutcome::nothing(0.0)
        };
    }

    let (mut attack, defense) = staged_pair(ctx);
    if burn_applies(ctx) && !bypasses_burn(ctx.attacker.ability) {
        attack = (attack * 0.5).floor();
    }

    let stab = ctx.attacker.types.contains(&move_def.move_type);
    let critical = rng.chance(CRITICAL_HIT_CHANCE);

    let attacker_item = ctx.attacker.active_item();
    attack *= attacker_stat_modifier(ctx.attacker, move_def)
        * defender_stat_modifier(ctx.defender, move_def.move_type)
        * attack_stat_modifier(attacker_item, move_def.category);
    let attack = floor_f(attack).max(1.0) as u32;
    let power = floor_f(
        power as f64
            * power_modifier(ctx.attacker.ability, power)
            * base_power_modifier(attacker_item, move_def.move_type),
    )
    .max(1.0) as u32;

    let base = compute_base_damage(ctx.attacker.level, power, attack, defense as u32);
    let stab_mult = if stab { stab_multiplier(ctx.attacker.ability) } else { 1.0 };

    let eff = effectiveness(move_def.move_type, &ctx.defender.types);
    if eff == 0.0 {
        trace!(move_id = %move_def.id, "target is immune by type");
        return DamageOutcome {
            critical,
            ..DamageOutcome::nothing(0.0)
        };
    }

    let crit_mult = if critical { critical_multiplier(ctx.attacker.ability) } else { 1.0 };
    let variance = rng.range_inclusive(MIN_VARIANCE, MAX_VARIANCE);
    let final_mult = weather_damage_modifier(ctx.weather, move_def.move_type)
        * defender_final_modifier(ctx.defender, move_def, eff)
        * final_modifier(attacker_item, eff);

    let raw =
        base as f64 * stab_mult * eff as f64 * crit_mult * final_mult * variance as f64 / 100.0;
    let damage = floor_f(raw).clamp(1.0, u16::MAX as f64) as u16;
    let (damage, survival) = prevent_ko_if_applicable(ctx.defender, damage);
    trace!(
        move_id = %move_def.id,
        base,
        power,
        attack,
        defense,
        stab,
        effectiveness = eff,
        critical,
        variance,
        damage,
        "damage calculated"
    );
    DamageOutcome {
        damage,
        effectiveness: eff,
        critical,
        absorbed: None,
        survival,
    }
}

/// Deterministic estimate used by the AI: full formula without the ability
/// and item layers, no critical hit, mid-band variance.
pub fn estimate_damage(ctx: &DamageContext<'_>) -> u16 {
    let move_def = ctx.move_def;
    let Some(power) = move_def.power.filter(|_| move_def.is_damaging()) else {
        return 0;
    };
    let eff = effectiveness(move_def.move_type, &ctx.defender.types);
    if eff == 0.0 {
        return 0;
    }
    let (mut attack, defense) = staged_pair(ctx);
    if burn_applies(ctx) {
        attack = (attack * 0.5).floor();
    }
    let base = compute_base_damage(
        ctx.attacker.level,
        power as u32,
        attack.max(1.0) as u32,
        defense as u32,
    );
    let stab = if ctx.attacker.types.contains(&move_def.move_type) { 1.5 } else { 1.0 };
    let raw = base as f64
        * stab
        * eff as f64
        * weather_damage_modifier(ctx.weather, move_def.move_type)
        * EXPECTED_VARIANCE;
    floor_f(raw).clamp(1.0, u16::MAX as f64) as u16
}
