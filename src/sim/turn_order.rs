use crate::random::RandomSource;
use crate::sim::abilities::speed_multiplier;
use crate::sim::battle::Action;
use crate::sim::creature::Creature;
use crate::sim::items::battle_items::speed_modifier;
use crate::sim::stats::{StatAxis, StatStages};
use crate::sim::weather::Weather;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

/// Flee beats switching, switching beats items, items beat fighting.
pub fn action_rank(action: &Action) -> u8 {
    match action {
        Action::Flee => 3,
        Action::Switch(_) => 2,
        Action::UseItem { .. } => 1,
        Action::Fight(_) => 0,
    }
}

/// Speed stat with stage, status, ability and held-item multipliers applied.
pub fn effective_speed(creature: &Creature, stages: &StatStages, weather: Option<Weather>) -> f64 {
    let status = creature
        .status
        .map(|status| status.profile().speed_multiplier)
        .unwrap_or(1.0);
    creature.stats.spe as f64
        * stages.multiplier(StatAxis::Speed)
        * status
        * speed_multiplier(creature.ability, weather)
        * speed_modifier(creature.active_item())
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrderKey {
    pub rank: u8,
    /// Move priority; 0 for anything that is not a move.
    pub priority: i8,
    pub speed: f64,
}

/// Returns the two sides in execution order. The coin flip is drawn only on a
/// full tie.
pub fn resolve_order(
    player: OrderKey,
    opponent: OrderKey,
    rng: &mut dyn RandomSource,
) -> [Side; 2] {
    let player_first = if player.rank != opponent.rank {
        player.rank > opponent.rank
    } else if player.priority != opponent.priority {
        player.priority > opponent.priority
    } else if player.speed != opponent.speed {
        player.speed > opponent.speed
    } else {
        rng.chance(0.5)
    };
    if player_first {
        [Side::Player, Side::Opponent]
    } else {
        [Side::Opponent, Side::Player]
    }
}
