use crate::data::moves::MoveDefinition;
use crate::random::RandomSource;
use crate::sim::abilities::misc_abilities::{contact_trigger, ContactEffect};
use crate::sim::abilities::TypeAbsorb;
use crate::sim::damage::{calculate_damage, DamageContext};
use crate::sim::faint_handler::consume_survival_item;
use crate::sim::items::battle_items::life_orb_recoil;
use crate::sim::items::consumable::try_consume_berry;
use crate::sim::moves::secondary::apply_secondary_effect;
use crate::sim::moves::{Combatant, MoveOutcome};
use crate::sim::weather::Weather;

/// Fallback when every slot is empty: fixed damage of twice the user's
/// level, always hits, and recoil of a quarter of the target's max HP.
pub fn struggle(attacker: &mut Combatant, defender: &mut Combatant, outcome: &mut MoveOutcome) {
    outcome
        .messages
        .push(format!("{} has no moves left!", attacker.name));
    outcome.messages.push(format!("{} used Struggle!", attacker.name));
    let damage = attacker.creature.level as u16 * 2;
    outcome.damage_dealt = defender.creature.take_damage(damage);
    let recoil = (defender.creature.max_hp() / 4).max(1);
    attacker.creature.take_damage(recoil);
    outcome
        .messages
        .push(format!("{} is damaged by recoil!", attacker.name));
}

pub fn resolve_hit(
    attacker: &mut Combatant,
    defender: &mut Combatant,
    move_def: &MoveDefinition,
    weather: Option<Weather>,
    rng: &mut dyn RandomSource,
    outcome: &mut MoveOutcome,
) {
    let damage = {
        let ctx = DamageContext {
            attacker: &attacker.creature,
            attacker_stages: &attacker.stages,
            defender: &defender.creature,
            defender_stages: &defender.stages,
            move_def,
            weather,
        };
        calculate_damage(&ctx, rng)
    };

    if let Some(absorb) = damage.absorbed {
        let ability = defender.creature.ability.map(|ability| ability.name()).unwrap_or_default();
        match absorb {
            TypeAbsorb::Immune => outcome
                .messages
                .push(format!("{}'s {ability} made {} useless!", defender.name, move_def.name)),
            TypeAbsorb::Heal => {
                let healed = defender.creature.heal((defender.creature.max_hp() / 4).max(1));
                if healed > 0 {
                    outcome
                        .messages
                        .push(format!("{} restored HP using its {ability}!", defender.name));
                } else {
                    outcome.messages.push(format!(
                        "{}'s {ability} made {} useless!",
                        defender.name, move_def.name
                    ));
                }
            }
        }
        return;
    }
    if damage.effectiveness == 0.0 {
        outcome
            .messages
            .push(format!("It doesn't affect {}...", defender.name));
        return;
    }

    let dealt = defender.creature.take_damage(damage.damage);
    consume_survival_item(&mut defender.creature, damage.survival);
    outcome.damage_dealt = dealt;
    if damage.critical {
        outcome.messages.push("A critical hit!".to_string());
    }
    if damage.effectiveness > 1.0 {
        outcome.messages.push("It's super effective!".to_string());
    } else if damage.effectiveness < 1.0 {
        outcome.messages.push("It's not very effective...".to_string());
    }
    if let Some(prevention) = damage.survival {
        outcome.messages.push(prevention.message(&defender.name));
    }

    apply_secondary_effect(attacker, defender, move_def, rng, &mut outcome.messages);
    apply_reactive_effects(attacker, defender, move_def, dealt, rng, outcome);
}

/// Contact abilities, then attacker item recoil, then berries (defender first).
fn apply_reactive_effects(
    attacker: &mut Combatant,
    defender: &mut Combatant,
    move_def: &MoveDefinition,
    dealt: u16,
    rng: &mut dyn RandomSource,
    outcome: &mut MoveOutcome,
) {
    if move_def.contact && dealt > 0 {
        let reaction = contact_trigger(
            defender.creature.ability,
            &attacker.creature,
            &attacker.creature.types,
            rng,
        );
        let ability = defender.creature.ability.map(|ability| ability.name()).unwrap_or_default();
        match reaction {
            Some(ContactEffect::Inflict(status)) => {
                attacker.creature.status = Some(status);
                outcome
                    .messages
                    .push(format!("{}'s {ability} affected {}!", defender.name, attacker.name));
                outcome.messages.push(status.inflicted_message(&attacker.name));
            }
            Some(ContactEffect::Chip(amount)) => {
                attacker.creature.take_damage(amount);
                outcome
                    .messages
                    .push(format!("{} was hurt by {}'s {ability}!", attacker.name, defender.name));
            }
            None => {}
        }
    }

    if let Some(recoil) = life_orb_recoil(&attacker.creature, dealt) {
        attacker.creature.take_damage(recoil);
        outcome
            .messages
            .push(format!("{} lost some of its HP!", attacker.name));
    }

    for side in [defender, attacker] {
        if let Some(effect) = try_consume_berry(&mut side.creature) {
            outcome.messages.push(effect.message(&side.name));
        }
    }
}
