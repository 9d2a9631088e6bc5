use crate::data::moves::{MoveCategory, MoveDefinition};
use crate::data::types::Type;
use crate::sim::abilities::Ability;
use crate::sim::creature::Creature;

/// Multiplier on the attacker's staged attack stat.
pub(crate) fn attacker_stat_modifier(attacker: &Creature, move_def: &MoveDefinition) -> f64 {
    let Some(ability) = attacker.ability else {
        return 1.0;
    };
    let physical = move_def.category == MoveCategory::Physical;
    let pinch = attacker.current_hp as u32 * 3 <= attacker.stats.hp as u32;
    match ability {
        Ability::Blaze if pinch && move_def.move_type == Type::Fire => 1.5,
        Ability::Torrent if pinch && move_def.move_type == Type::Water => 1.5,
        Ability::Overgrow if pinch && move_def.move_type == Type::Grass => 1.5,
        Ability::Swarm if pinch && move_def.move_type == Type::Bug => 1.5,
        Ability::HugePower | Ability::PurePower if physical => 2.0,
        Ability::Guts if physical && attacker.status.is_some() => 1.5,
        _ => 1.0,
    }
}

/// Thick Fat halves the attacker's stat for fire and ice moves.
pub(crate) fn defender_stat_modifier(defender: &Creature, move_type: Type) -> f64 {
    match defender.ability {
        Some(Ability::ThickFat) if matches!(move_type, Type::Fire | Type::Ice) => 0.5,
        _ => 1.0,
    }
}

pub(crate) fn power_modifier(ability: Option<Ability>, power: u16) -> f64 {
    match ability {
        Some(Ability::Technician) if power <= 60 => 1.5,
        _ => 1.0,
    }
}

pub(crate) fn stab_multiplier(ability: Option<Ability>) -> f64 {
    match ability {
        Some(Ability::Adaptability) => 2.0,
        _ => 1.5,
    }
}

pub(crate) fn critical_multiplier(ability: Option<Ability>) -> f64 {
    match ability {
        Some(Ability::Sniper) => 2.25,
        _ => 1.5,
    }
}

pub(crate) fn bypasses_burn(ability: Option<Ability>) -> bool {
    ability == Some(Ability::Guts)
}

pub(crate) fn defender_final_modifier(
    defender: &Creature,
    move_def: &MoveDefinition,
    effectiveness: f32,
) -> f64 {
    let Some(ability) = defender.ability else {
        return 1.0;
    };
    match ability {
        Ability::Fluffy if move_def.contact => 0.5,
        Ability::FurCoat if move_def.category == MoveCategory::Physical => 0.5,
        Ability::Multiscale if defender.is_full_hp() => 0.5,
        Ability::Filter | Ability::SolidRock if effectiveness > 1.0 => 0.75,
        _ => 1.0,
    }
}
