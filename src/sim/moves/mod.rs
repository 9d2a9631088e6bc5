//! Move execution for one acting creature.
//!
//! The executor works on [`Combatant`] copies handed in by the battle; it
//! never sees the authoritative state, and the battle commits the copies
//! only after the action finished. Draw order: status eligibility, accuracy,
//! damage (critical, variance), secondary effect chance, contact trigger.

pub mod attacking;
pub mod secondary;

use crate::data::dex::MoveResolver;
use crate::error::BattleError;
use crate::random::RandomSource;
use crate::sim::creature::Creature;
use crate::sim::stats::StatStages;
use crate::sim::status::{check_can_act, ActionCheck};
use crate::sim::weather::Weather;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum MoveChoice {
    Slot(usize),
    /// Only legal when every slot is out of uses.
    Struggle,
}

/// Working copy of an active creature plus its side-local stages.
#[derive(Clone, Debug)]
pub struct Combatant {
    /// Display label used in narration ("Pikachu", "Wild Rattata").
    pub name: String,
    pub creature: Creature,
    pub stages: StatStages,
}

impl Combatant {
    pub fn new(name: impl Into<String>, creature: Creature, stages: StatStages) -> Self {
        Self {
            name: name.into(),
            creature,
            stages,
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MoveOutcome {
    pub messages: Vec<String>,
    /// False when a status kept the creature from moving.
    pub acted: bool,
    pub damage_dealt: u16,
}

pub fn execute_move(
    attacker: &mut Combatant,
    defender: &mut Combatant,
    choice: MoveChoice,
    moves: &dyn MoveResolver,
    weather: Option<Weather>,
    rng: &mut dyn RandomSource,
) -> Result<MoveOutcome, BattleError> {
    let move_def = match choice {
        MoveChoice::Struggle => None,
        MoveChoice::Slot(index) => {
            let known = attacker.creature.moves.len();
            let slot = attacker
                .creature
                .moves
                .get(index)
                .ok_or(BattleError::MoveIndexOutOfRange { index, known })?;
            let definition = moves
                .move_definition(&slot.move_id)
                .ok_or_else(|| BattleError::UnknownMove(slot.move_id.clone()))?;
            Some((index, definition))
        }
    };

    let mut outcome = MoveOutcome::default();
    match check_can_act(&attacker.name, attacker.creature.status, rng) {
        ActionCheck::Ready => {}
        ActionCheck::Recovered { message } => {
            attacker.creature.status = None;
            outcome.messages.push(message);
        }
        ActionCheck::Blocked { message } => {
            outcome.messages.push(message);
            return Ok(outcome);
        }
    }
    outcome.acted = true;

    let Some((index, move_def)) = move_def else {
        attacking::struggle(attacker, defender, &mut outcome);
        return Ok(outcome);
    };

    if let Some(slot) = attacker.creature.moves.get_mut(index) {
        slot.remaining_uses = slot.remaining_uses.saturating_sub(1);
    }
    debug!(attacker = %attacker.name, move_id = %move_def.id, "executing move");
    outcome
        .messages
        .push(format!("{} used {}!", attacker.name, move_def.name));

    if rng.below(100) >= move_def.accuracy as u32 {
        outcome
            .messages
            .push(format!("{}'s attack missed!", attacker.name));
        return Ok(outcome);
    }

    if move_def.is_damaging() {
        attacking::resolve_hit(attacker, defender, move_def, weather, rng, &mut outcome);
    } else {
        secondary::apply_status_move(attacker, defender, move_def, rng, &mut outcome.messages);
    }
    Ok(outcome)
}
