use monster_battle_core::config::BattleConfig;
use monster_battle_core::data::{sample_dex, Dex};
use monster_battle_core::error::BattleError;
use monster_battle_core::random::ScriptedRandom;
use monster_battle_core::sim::abilities::Ability;
use monster_battle_core::sim::battle::{Action, Battle, BattleResult, Phase};
use monster_battle_core::sim::items::bag::BagItem;
use monster_battle_core::sim::items::HeldItem;
use monster_battle_core::sim::moves::MoveChoice;
use monster_battle_core::sim::progression::LevelEvolution;
use monster_battle_core::sim::stats::StatAxis;
use monster_battle_core::sim::status::Status;
use monster_battle_core::sim::weather::Weather;
use monster_battle_core::sim::{Creature, CreatureTemplate};
use std::sync::Arc;

fn creature(species: &str, level: u8, moves: &[&str]) -> Creature {
    let mut template = CreatureTemplate::new(species, level);
    template.moves = moves.iter().map(|id| id.to_string()).collect();
    template
        .build(0, sample_dex(), sample_dex())
        .expect("creature builds")
}

fn start(player: Vec<Creature>, opponent: Vec<Creature>, config: &BattleConfig) -> Battle {
    let dex: Arc<Dex> = Arc::new(sample_dex().clone());
    Battle::new(player, opponent, config, dex.clone(), dex).expect("battle starts")
}

fn messages_contain(messages: &[String], line: &str) -> bool {
    messages.iter().any(|message| message == line)
}

fn position(messages: &[String], line: &str) -> usize {
    messages
        .iter()
        .position(|message| message == line)
        .unwrap_or_else(|| panic!("missing line {line:?} in {messages:?}"))
}

#[test]
fn faster_player_flees_and_nothing_else_runs() {
    let mut battle = start(
        vec![creature("pikachu", 20, &["thundershock"])],
        vec![creature("rattata", 3, &["tackle"])],
        &BattleConfig::wild(),
    );
    let opponent_hp = battle.state().opponent.active_creature().current_hp;
    let mut rng = ScriptedRandom::new([0.5]);
    let report = battle.execute_turn(Action::Flee, &mut rng).expect("flee is legal");
    assert_eq!(report.messages, vec!["Got away safely!".to_string()]);
    assert_eq!(report.result, Some(BattleResult::Fled));
    assert_eq!(report.phase, Phase::BattleEnd);
    assert_eq!(rng.draws(), 1);
    assert_eq!(battle.state().opponent.active_creature().current_hp, opponent_hp);
    assert_eq!(
        battle.execute_turn(Action::Flee, &mut rng),
        Err(BattleError::BattleOver)
    );
}

#[test]
fn failed_flee_lets_the_opponent_act() {
    let mut battle = start(
        vec![creature("snorlax", 10, &["tackle"])],
        vec![creature("pidgey", 30, &["gust"])],
        &BattleConfig::wild(),
    );
    let mut rng = ScriptedRandom::new([0.9]).with_fallback(0.5);
    let report = battle.execute_turn(Action::Flee, &mut rng).expect("flee is legal");
    assert_eq!(report.messages[0], "Can't escape!");
    assert_eq!(report.messages[1], "Wild Pidgey used Gust!");
    assert_eq!(report.result, None);
    assert_eq!(battle.state().flee_attempts, 1);
    assert_eq!(battle.state().turn, 2);
    let snorlax = battle.state().player.active_creature();
    assert!(snorlax.current_hp < snorlax.max_hp());
}

#[test]
fn trainer_flee_is_refused() {
    let mut battle = start(
        vec![creature("pikachu", 20, &["thundershock"])],
        vec![creature("geodude", 12, &["tackle"])],
        &BattleConfig::trainer("Brock"),
    );
    let mut rng = ScriptedRandom::new([]);
    let report = battle.execute_turn(Action::Flee, &mut rng).expect("flee is legal");
    assert_eq!(
        report.messages,
        vec!["No! There's no running from a trainer battle!".to_string()]
    );
    assert_eq!(report.result, None);
    assert_eq!(battle.state().turn, 1);
}

#[test]
fn fainted_player_must_switch_and_the_replacement_has_clean_stages() {
    let mut pikachu = creature("pikachu", 10, &["thundershock"]);
    pikachu.current_hp = 1;
    let onix = creature("onix", 20, &["tackle"]).with_ability(Ability::Intimidate);
    let mut battle = start(
        vec![pikachu, creature("rattata", 20, &["tackle"])],
        vec![onix],
        &BattleConfig::trainer("Brock"),
    );
    assert_eq!(battle.state().player.stages.get(StatAxis::Attack), -1);

    let mut rng = ScriptedRandom::new([]).with_fallback(0.5);
    let report = battle
        .execute_turn(Action::Fight(MoveChoice::Slot(0)), &mut rng)
        .expect("turn runs");
    assert!(messages_contain(&report.messages, "Pikachu fainted!"));
    assert!(!messages_contain(&report.messages, "Pikachu used Thunder Shock!"));
    assert_eq!(report.phase, Phase::ForceSwitch);
    assert_eq!(battle.legal_actions(), vec![Action::Switch(1)]);
    assert_eq!(
        battle.execute_turn(Action::Fight(MoveChoice::Slot(0)), &mut rng),
        Err(BattleError::ReplacementRequired)
    );

    let report = battle.execute_turn(Action::Switch(1), &mut rng).expect("replacement");
    assert_eq!(report.messages, vec!["Go! Rattata!".to_string()]);
    assert_eq!(report.phase, Phase::ActionSelect);
    assert_eq!(battle.state().player.active, 1);
    assert!(battle.state().player.stages.is_neutral());
}

#[test]
fn exhausted_moves_fall_back_to_struggle() {
    let mut rattata = creature("rattata", 20, &["tackle"]);
    rattata.moves[0].remaining_uses = 0;
    let mut battle = start(
        vec![rattata],
        vec![creature("snorlax", 20, &["defensecurl"])],
        &BattleConfig::wild(),
    );
    assert_eq!(
        battle.legal_actions(),
        vec![Action::Fight(MoveChoice::Struggle), Action::Flee]
    );
    let mut rng = ScriptedRandom::new([]).with_fallback(0.5);
    let report = battle
        .execute_turn(Action::Fight(MoveChoice::Slot(0)), &mut rng)
        .expect("struggle runs");
    assert_eq!(report.messages[0], "Rattata has no moves left!");
    assert_eq!(report.messages[1], "Rattata used Struggle!");
    assert_eq!(report.messages[2], "Rattata is damaged by recoil!");

    let snorlax = battle.state().opponent.active_creature();
    let rattata = battle.state().player.active_creature();
    assert_eq!(snorlax.current_hp, snorlax.max_hp() - 40);
    assert_eq!(rattata.current_hp, rattata.max_hp() - (snorlax.max_hp() / 4).max(1));
}

#[test]
fn knockout_grants_experience_levels_up_and_evolves() {
    let mut charmander = creature("charmander", 15, &["scratch"]);
    charmander.experience = 2530;
    let mut magikarp = creature("magikarp", 5, &["splash"]);
    magikarp.current_hp = 1;
    let mut battle = start(vec![charmander], vec![magikarp], &BattleConfig::wild())
        .with_evolution(LevelEvolution::sample());
    let mut rng = ScriptedRandom::new([]).with_fallback(0.5);
    let report = battle
        .execute_turn(Action::Fight(MoveChoice::Slot(0)), &mut rng)
        .expect("turn runs");
    let tail: Vec<&str> = report.messages.iter().skip(1).map(String::as_str).collect();
    assert_eq!(
        tail,
        vec![
            "Wild Magikarp fainted!",
            "Charmander gained 28 Exp. Points!",
            "Charmander grew to level 16!",
            "What? Charmander is evolving!",
            "Congratulations! Charmander evolved into Charmeleon!",
        ]
    );
    assert_eq!(report.result, Some(BattleResult::Win));
    assert_eq!(report.phase, Phase::BattleEnd);
    let evolved = battle.state().player.active_creature();
    assert_eq!(evolved.species_id, "charmeleon");
    assert_eq!(evolved.level, 16);
    assert!(evolved.current_hp <= evolved.max_hp());
}

#[test]
fn losing_the_last_creature_ends_the_battle() {
    let mut magikarp = creature("magikarp", 5, &["splash"]);
    magikarp.current_hp = 1;
    let mut battle = start(
        vec![magikarp],
        vec![creature("rattata", 10, &["tackle"])],
        &BattleConfig::wild(),
    );
    let mut rng = ScriptedRandom::new([]).with_fallback(0.5);
    let report = battle
        .execute_turn(Action::Fight(MoveChoice::Slot(0)), &mut rng)
        .expect("turn runs");
    assert!(messages_contain(&report.messages, "Magikarp fainted!"));
    assert_eq!(report.messages.last().map(String::as_str), Some("You blacked out!"));
    assert_eq!(report.result, Some(BattleResult::Lose));
    assert!(battle.legal_actions().is_empty());
}

#[test]
fn trainer_sends_out_the_next_creature() {
    let mut magikarp = creature("magikarp", 5, &["splash"]);
    magikarp.current_hp = 1;
    let mut battle = start(
        vec![creature("pikachu", 20, &["thundershock"])],
        vec![magikarp, creature("pidgey", 12, &["gust"])],
        &BattleConfig::trainer("Misty"),
    );
    let mut rng = ScriptedRandom::new([]).with_fallback(0.5);
    let report = battle
        .execute_turn(Action::Fight(MoveChoice::Slot(0)), &mut rng)
        .expect("turn runs");
    assert!(messages_contain(&report.messages, "Foe Magikarp fainted!"));
    assert!(messages_contain(&report.messages, "Misty sent out Pidgey!"));
    assert!(!messages_contain(&report.messages, "Foe Pidgey used Gust!"));
    assert_eq!(report.result, None);
    assert_eq!(report.phase, Phase::ActionSelect);
    assert_eq!(battle.state().opponent.active, 1);
}

#[test]
fn bag_items_go_before_attacks_and_spend_the_turn() {
    let mut snorlax = creature("snorlax", 30, &["tackle"]);
    snorlax.current_hp -= 50;
    let before = snorlax.current_hp;
    let mut battle = start(
        vec![snorlax],
        vec![creature("magikarp", 5, &["splash"])],
        &BattleConfig::wild(),
    );
    let mut rng = ScriptedRandom::new([]).with_fallback(0.5);
    let action = Action::UseItem {
        item: BagItem::Potion,
        target: 0,
    };
    let report = battle.execute_turn(action, &mut rng).expect("item use");
    assert_eq!(
        report.messages,
        vec![
            "You used a Potion on Snorlax!".to_string(),
            "Snorlax's HP was restored by 20 points.".to_string(),
            "Wild Magikarp used Splash!".to_string(),
            "But nothing happened!".to_string(),
        ]
    );
    assert_eq!(battle.state().player.active_creature().current_hp, before + 20);
    assert_eq!(battle.state().turn, 2);
}

#[test]
fn switching_resets_stages_and_triggers_on_enter() {
    let gyarados = creature("gyarados", 30, &["bite"]).with_ability(Ability::Intimidate);
    let mut battle = start(
        vec![creature("pikachu", 30, &["growl"]), gyarados],
        vec![creature("magikarp", 20, &["splash"])],
        &BattleConfig::wild(),
    );
    let mut rng = ScriptedRandom::new([]).with_fallback(0.5);
    let report = battle.execute_turn(Action::Switch(1), &mut rng).expect("switch");
    assert_eq!(report.messages[0], "Pikachu, come back!");
    assert_eq!(report.messages[1], "Go! Gyarados!");
    assert_eq!(report.messages[2], "Gyarados's Intimidate!");
    assert_eq!(report.messages[3], "Wild Magikarp's Attack fell!");
    assert_eq!(battle.state().opponent.stages.get(StatAxis::Attack), -1);
    assert_eq!(battle.state().player.active, 1);
    assert_eq!(
        battle.execute_turn(Action::Switch(1), &mut rng),
        Err(BattleError::SwitchTargetActive { index: 1 })
    );
}

#[test]
fn second_flee_attempt_gets_the_retry_bonus() {
    // Snorlax 14 speed vs Pidgey 47: 0.149 on the first try, 0.266 on the second.
    let mut battle = start(
        vec![creature("snorlax", 10, &["tackle"])],
        vec![creature("pidgey", 30, &["gust"])],
        &BattleConfig::wild(),
    );
    let mut rng = ScriptedRandom::new([0.2]).with_fallback(0.5);
    let report = battle.execute_turn(Action::Flee, &mut rng).expect("flee is legal");
    assert_eq!(report.messages[0], "Can't escape!");
    assert_eq!(battle.state().flee_attempts, 1);

    let mut rng = ScriptedRandom::new([0.2]);
    let report = battle.execute_turn(Action::Flee, &mut rng).expect("flee is legal");
    assert_eq!(report.messages, vec!["Got away safely!".to_string()]);
    assert_eq!(report.result, Some(BattleResult::Fled));
    assert_eq!(rng.draws(), 1);
}

#[test]
fn self_knockout_cancels_the_foes_pending_move() {
    let mut pikachu = creature("pikachu", 40, &["thundershock"]);
    pikachu.moves[0].remaining_uses = 0;
    pikachu.current_hp = 1;
    let mut battle = start(
        vec![pikachu, creature("rattata", 20, &["tackle"])],
        vec![creature("snorlax", 30, &["tackle"])],
        &BattleConfig::wild(),
    );
    let mut rng = ScriptedRandom::new([]).with_fallback(0.5);
    let report = battle
        .execute_turn(Action::Fight(MoveChoice::Slot(0)), &mut rng)
        .expect("struggle runs");
    assert_eq!(
        report.messages,
        vec![
            "Pikachu has no moves left!".to_string(),
            "Pikachu used Struggle!".to_string(),
            "Pikachu is damaged by recoil!".to_string(),
            "Pikachu fainted!".to_string(),
        ]
    );
    assert_eq!(report.phase, Phase::ForceSwitch);
    let bench = &battle.state().player.roster[1];
    assert_eq!(bench.current_hp, bench.max_hp());
}

#[test]
fn status_move_triggers_the_curing_berry_right_away() {
    let snorlax = creature("snorlax", 20, &["splash"]).with_item(HeldItem::CheriBerry);
    let mut battle = start(
        vec![creature("pikachu", 20, &["thunderwave"])],
        vec![snorlax],
        &BattleConfig::wild(),
    );
    let mut rng = ScriptedRandom::new([]).with_fallback(0.5);
    let report = battle
        .execute_turn(Action::Fight(MoveChoice::Slot(0)), &mut rng)
        .expect("turn runs");
    let cured = position(&report.messages, "Wild Snorlax's Cheri Berry cured its paralysis!");
    let acted = position(&report.messages, "Wild Snorlax used Splash!");
    assert!(cured < acted);
    let foe = battle.state().opponent.active_creature();
    assert_eq!(foe.status, None);
    assert!(foe.item_consumed);
}

#[test]
fn poison_chip_knockout_wins_the_battle() {
    let mut magikarp = creature("magikarp", 20, &["splash"]);
    magikarp.status = Some(Status::Poison);
    magikarp.current_hp = 1;
    let mut battle = start(
        vec![creature("pikachu", 20, &["growl"])],
        vec![magikarp],
        &BattleConfig::wild(),
    );
    let mut rng = ScriptedRandom::new([]).with_fallback(0.5);
    let report = battle
        .execute_turn(Action::Fight(MoveChoice::Slot(0)), &mut rng)
        .expect("turn runs");
    let chip = position(&report.messages, "Wild Magikarp is hurt by poison!");
    let fainted = position(&report.messages, "Wild Magikarp fainted!");
    assert!(chip < fainted);
    assert_eq!(report.result, Some(BattleResult::Win));
    assert_eq!(report.phase, Phase::BattleEnd);
}

#[test]
fn sandstorm_knockout_forces_a_replacement() {
    let mut pikachu = creature("pikachu", 20, &["growl"]);
    pikachu.current_hp = 1;
    let mut battle = start(
        vec![pikachu, creature("rattata", 20, &["tackle"])],
        vec![creature("geodude", 20, &["splash"])],
        &BattleConfig::wild().with_weather(Weather::Sandstorm, 0),
    );
    let mut rng = ScriptedRandom::new([]).with_fallback(0.5);
    let report = battle
        .execute_turn(Action::Fight(MoveChoice::Slot(0)), &mut rng)
        .expect("turn runs");
    let chip = position(&report.messages, "Pikachu is buffeted by the sandstorm!");
    let fainted = position(&report.messages, "Pikachu fainted!");
    assert!(chip < fainted);
    assert_eq!(report.phase, Phase::ForceSwitch);
    assert_eq!(battle.legal_actions(), vec![Action::Switch(1)]);
    assert!(!messages_contain(&report.messages, "Wild Geodude is buffeted by the sandstorm!"));
}

#[test]
fn burn_chip_on_the_last_creature_loses() {
    let mut pikachu = creature("pikachu", 20, &["growl"]);
    pikachu.status = Some(Status::Burn);
    pikachu.current_hp = 1;
    let mut battle = start(
        vec![pikachu],
        vec![creature("magikarp", 20, &["splash"])],
        &BattleConfig::wild(),
    );
    let mut rng = ScriptedRandom::new([]).with_fallback(0.5);
    let report = battle
        .execute_turn(Action::Fight(MoveChoice::Slot(0)), &mut rng)
        .expect("turn runs");
    let chip = position(&report.messages, "Pikachu is hurt by its burn!");
    let lost = position(&report.messages, "You blacked out!");
    assert!(chip < lost);
    assert_eq!(report.result, Some(BattleResult::Lose));
}

#[test]
fn end_of_turn_runs_status_then_weather_then_items() {
    let mut pikachu = creature("pikachu", 20, &["growl"]).with_item(HeldItem::Leftovers);
    pikachu.status = Some(Status::Poison);
    let mut battle = start(
        vec![pikachu],
        vec![creature("geodude", 20, &["splash"])],
        &BattleConfig::wild().with_weather(Weather::Sandstorm, 1),
    );
    let mut rng = ScriptedRandom::new([]).with_fallback(0.5);
    let report = battle
        .execute_turn(Action::Fight(MoveChoice::Slot(0)), &mut rng)
        .expect("turn runs");
    let order = [
        "Wild Geodude used Splash!",
        "Pikachu is hurt by poison!",
        "Pikachu is buffeted by the sandstorm!",
        "The sandstorm subsided.",
        "Pikachu restored a little HP using its Leftovers!",
    ]
    .map(|line| position(&report.messages, line));
    assert!(order.windows(2).all(|pair| pair[0] < pair[1]), "{:?}", report.messages);
    // 50 max HP: poison 6, sand 3, Leftovers 3.
    assert_eq!(battle.state().player.active_creature().current_hp, 44);
    assert_eq!(battle.state().weather.condition, None);
}
