use crate::data::moves::{EffectTarget, MoveDefinition, StatChanges};
use crate::random::RandomSource;
use crate::sim::abilities::status_abilities::ability_blocks_status;
use crate::sim::items::consumable::try_consume_status_berry;
use crate::sim::moves::Combatant;
use crate::sim::stats::stage_message;
use crate::sim::status::{type_blocks_status, Status};

fn rolls(chance: u8, rng: &mut dyn RandomSource) -> bool {
    chance >= 100 || rng.below(100) < chance as u32
}

pub fn is_immune_to(target: &Combatant, status: Status) -> bool {
    type_blocks_status(&target.creature.types, status)
        || ability_blocks_status(target.creature.ability, status)
}

/// Secondary status from a damaging move. Nothing is drawn unless the target
/// survived, has no status, and is not immune.
pub fn try_inflict_status(
    target: &mut Combatant,
    status: Status,
    chance: u8,
    rng: &mut dyn RandomSource,
) -> Option<String> {
    if target.creature.is_fainted()
        || target.creature.status.is_some()
        || is_immune_to(target, status)
    {
        return None;
    }
    if !rolls(chance, rng) {
        return None;
    }
    target.creature.status = Some(status);
    Some(status.inflicted_message(&target.name))
}

pub fn apply_stat_changes(
    attacker: &mut Combatant,
    defender: &mut Combatant,
    changes: &StatChanges,
    rng: &mut dyn RandomSource,
    messages: &mut Vec<String>,
) {
    let target = match changes.target {
        EffectTarget::User => attacker,
        EffectTarget::Opponent => defender,
    };
    if target.creature.is_fainted() {
        return;
    }
    if !rolls(changes.chance, rng) {
        return;
    }
    for change in &changes.changes {
        let result = target.stages.apply(change.stat, change.delta);
        messages.push(stage_message(&target.name, change.stat, change.delta, result));
    }
}

/// Follow-up of a damaging move that connected.
pub fn apply_secondary_effect(
    attacker: &mut Combatant,
    defender: &mut Combatant,
    move_def: &MoveDefinition,
    rng: &mut dyn RandomSource,
    messages: &mut Vec<String>,
) {
    if let Some(effect) = move_def.inflicted_status() {
        if let Some(message) = try_inflict_status(defender, effect.status, effect.chance, rng) {
            messages.push(message);
        }
    }
    if let Some(changes) = move_def.stat_changes() {
        apply_stat_changes(attacker, defender, changes, rng, messages);
    }
}

/// Status-category moves apply their effect directly and narrate failure.
pub fn apply_status_move(
    attacker: &mut Combatant,
    defender: &mut Combatant,
    move_def: &MoveDefinition,
    rng: &mut dyn RandomSource,
    messages: &mut Vec<String>,
) {
    let mut had_effect = false;
    if let Some(effect) = move_def.inflicted_status() {
        had_effect = true;
        if defender.creature.status.is_some() || defender.creature.is_fainted() {
            messages.push("But it failed!".to_string());
        } else if is_immune_to(defender, effect.status) {
            messages.push(format!("It doesn't affect {}...", defender.name));
        } else if let Some(message) =
            try_inflict_status(defender, effect.status, effect.chance, rng)
        {
            messages.push(message);
            if let Some(berry) = try_consume_status_berry(&mut defender.creature) {
                messages.push(berry.message(&defender.name));
            }
        } else {
            messages.push("But it failed!".to_string());
        }
    }
    if let Some(changes) = move_def.stat_changes() {
        had_effect = true;
        apply_stat_changes(attacker, defender, changes, rng, messages);
    }
    if !had_effect {
        messages.push("But nothing happened!".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dex::{sample_dex, MoveResolver};
    use crate::random::ScriptedRandom;
    use crate::sim::abilities::Ability;
    use crate::sim::creature::test_creature;
    use crate::sim::items::HeldItem;
    use crate::sim::stats::{StatAxis, StatStages};

    fn combatant(name: &str, species: &str) -> Combatant {
        Combatant::new(name, test_creature(species, 30, &["tackle"]), StatStages::default())
    }

    fn run_status_move(
        move_id: &str,
        attacker: &mut Combatant,
        defender: &mut Combatant,
    ) -> Vec<String> {
        let move_def = sample_dex().move_definition(move_id).expect("bundled");
        let mut messages = Vec::new();
        let mut rng = ScriptedRandom::new([]);
        apply_status_move(attacker, defender, move_def, &mut rng, &mut messages);
        messages
    }

    #[test]
    fn thunder_wave_fails_on_statused_target() {
        let mut user = combatant("Pikachu", "pikachu");
        let mut target = combatant("Wild Rattata", "rattata");
        target.creature.status = Some(Status::Poison);
        assert_eq!(run_status_move("thunderwave", &mut user, &mut target), vec!["But it failed!"]);
        assert_eq!(target.creature.status, Some(Status::Poison));
    }

    #[test]
    fn limber_blocks_paralysis() {
        let mut user = combatant("Pikachu", "pikachu");
        let mut target = combatant("Wild Snorlax", "snorlax");
        target.creature.ability = Some(Ability::Limber);
        assert_eq!(
            run_status_move("thunderwave", &mut user, &mut target),
            vec!["It doesn't affect Wild Snorlax..."]
        );
    }

    #[test]
    fn cheri_berry_cures_paralysis_as_soon_as_it_lands() {
        let mut user = combatant("Pikachu", "pikachu");
        let mut target = combatant("Wild Snorlax", "snorlax");
        target.creature.held_item = Some(HeldItem::CheriBerry);
        assert_eq!(
            run_status_move("thunderwave", &mut user, &mut target),
            vec![
                Status::Paralysis.inflicted_message("Wild Snorlax"),
                "Wild Snorlax's Cheri Berry cured its paralysis!".to_string(),
            ]
        );
        assert_eq!(target.creature.status, None);
        assert!(target.creature.item_consumed);
    }

    #[test]
    fn growl_lowers_opponent_attack() {
        let mut user = combatant("Pikachu", "pikachu");
        let mut target = combatant("Wild Rattata", "rattata");
        let messages = run_status_move("growl", &mut user, &mut target);
        assert_eq!(messages, vec!["Wild Rattata's Attack fell!"]);
        assert_eq!(target.stages.get(StatAxis::Attack), -1);
    }

    #[test]
    fn splash_does_nothing() {
        let mut user = combatant("Magikarp", "magikarp");
        let mut target = combatant("Wild Rattata", "rattata");
        assert_eq!(
            run_status_move("splash", &mut user, &mut target),
            vec!["But nothing happened!"]
        );
    }

    #[test]
    fn secondary_status_is_not_drawn_against_fainted_target() {
        let mut target = combatant("Wild Rattata", "rattata");
        target.creature.current_hp = 0;
        let mut rng = ScriptedRandom::new([0.0]);
        assert_eq!(try_inflict_status(&mut target, Status::Burn, 10, &mut rng), None);
        assert_eq!(rng.draws(), 0);
    }
}
