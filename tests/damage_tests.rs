use monster_battle_core::data::moves::MoveDefinition;
use monster_battle_core::data::types::Type;
use monster_battle_core::data::{sample_dex, MoveResolver};
use monster_battle_core::random::ScriptedRandom;
use monster_battle_core::sim::damage::{calculate_damage, DamageContext};
use monster_battle_core::sim::stats::StatStages;
use monster_battle_core::sim::{Creature, CreatureTemplate};

fn creature(species: &str, level: u8) -> Creature {
    CreatureTemplate::new(species, level)
        .build(0, sample_dex(), sample_dex())
        .expect("creature builds")
}

fn fire_strike() -> MoveDefinition {
    serde_json::from_str(
        r#"{
            "id": "firestrike",
            "name": "Fire Strike",
            "type": "fire",
            "category": "physical",
            "power": 40
        }"#,
    )
    .expect("valid move")
}

fn damage(
    attacker: &Creature,
    defender: &Creature,
    move_def: &MoveDefinition,
    rolls: [f64; 2],
) -> (u16, f32) {
    let stages = StatStages::default();
    let ctx = DamageContext {
        attacker,
        attacker_stages: &stages,
        defender,
        defender_stages: &stages,
        move_def,
        weather: None,
    };
    let outcome = calculate_damage(&ctx, &mut ScriptedRandom::new(rolls));
    (outcome.damage, outcome.effectiveness)
}

#[test]
fn double_resisted_stab_hit_is_weaker_than_neutral() {
    let attacker = creature("charmander", 50);
    let mut resisting = creature("squirtle", 50);
    resisting.types = vec![Type::Water, Type::Rock];
    let mut neutral = creature("squirtle", 50);
    neutral.types = vec![Type::Normal];
    let move_def = fire_strike();

    // no crit, top variance roll
    let (resisted, eff) = damage(&attacker, &resisting, &move_def, [0.9, 0.999]);
    let (plain, plain_eff) = damage(&attacker, &neutral, &move_def, [0.9, 0.999]);
    assert_eq!(eff, 0.25);
    assert_eq!(plain_eff, 1.0);
    assert!(resisted >= 1);
    assert!(resisted < plain);
}

#[test]
fn type_immunity_forces_zero_damage() {
    let attacker = creature("rattata", 50);
    let defender = creature("gastly", 50);
    let tackle = sample_dex().move_definition("tackle").expect("bundled move");
    let (dealt, eff) = damage(&attacker, &defender, tackle, [0.9, 0.5]);
    assert_eq!(dealt, 0);
    assert_eq!(eff, 0.0);
}

#[test]
fn weakest_roll_still_deals_one() {
    let attacker = creature("magikarp", 2);
    let defender = creature("onix", 100);
    let tackle = sample_dex().move_definition("tackle").expect("bundled move");
    let (dealt, eff) = damage(&attacker, &defender, tackle, [0.9, 0.0]);
    assert_eq!(eff, 0.5);
    assert_eq!(dealt, 1);
}
