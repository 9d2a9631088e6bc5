use crate::data::types::Type;
use crate::random::RandomSource;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Poison,
    Burn,
    Paralysis,
    Sleep,
    Freeze,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SkipRule {
    Never,
    /// Loses the turn with this probability.
    Chance(f64),
    /// Loses every turn until a recovery draw with this probability succeeds.
    UntilRecovery(f64),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatusProfile {
    /// Fraction of max HP lost at end of turn, as a divisor.
    pub chip_divisor: Option<u16>,
    pub skip: SkipRule,
    pub speed_multiplier: f64,
    /// Applied to the attack stat of physical moves only.
    pub physical_attack_multiplier: f64,
}

impl Status {
    pub fn profile(self) -> StatusProfile {
        match self {
            Status::Poison => StatusProfile {
                chip_divisor: Some(8),
                skip: SkipRule::Never,
                speed_multiplier: 1.0,
                physical_attack_multiplier: 1.0,
            },
            Status::Burn => StatusProfile {
                chip_divisor: Some(16),
                skip: SkipRule::Never,
                speed_multiplier: 1.0,
                physical_attack_multiplier: 0.5,
            },
            Status::Paralysis => StatusProfile {
                chip_divisor: None,
                skip: SkipRule::Chance(0.25),
                speed_multiplier: 0.5,
                physical_attack_multiplier: 1.0,
            },
            Status::Sleep => StatusProfile {
                chip_divisor: None,
                skip: SkipRule::UntilRecovery(1.0 / 3.0),
                speed_multiplier: 1.0,
                physical_attack_multiplier: 1.0,
            },
            Status::Freeze => StatusProfile {
                chip_divisor: None,
                skip: SkipRule::UntilRecovery(0.2),
                speed_multiplier: 1.0,
                physical_attack_multiplier: 1.0,
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Status::Poison => "poison",
            Status::Burn => "burn",
            Status::Paralysis => "paralysis",
            Status::Sleep => "sleep",
            Status::Freeze => "freeze",
        }
    }

    /// End-of-turn damage for a creature with `max_hp`; at least 1 when the
    /// status chips at all.
    pub fn chip_damage(self, max_hp: u16) -> u16 {
        match self.profile().chip_divisor {
            Some(divisor) => (max_hp / divisor).max(1),
            None => 0,
        }
    }

    pub fn inflicted_message(self, name: &str) -> String {
        match self {
            Status::Poison => format!("{name} was poisoned!"),
            Status::Burn => format!("{name} was burned!"),
            Status::Paralysis => format!("{name} is paralyzed! It may be unable to move!"),
            Status::Sleep => format!("{name} fell asleep!"),
            Status::Freeze => format!("{name} was frozen solid!"),
        }
    }

    pub fn chip_message(self, name: &str) -> String {
        match self {
            Status::Burn => format!("{name} is hurt by its burn!"),
            _ => format!("{name} is hurt by poison!"),
        }
    }

    pub fn cured_message(self, name: &str) -> String {
        match self {
            Status::Poison => format!("{name} was cured of its poisoning."),
            Status::Burn => format!("{name}'s burn was healed."),
            Status::Paralysis => format!("{name} was cured of paralysis."),
            Status::Sleep => format!("{name} woke up!"),
            Status::Freeze => format!("{name} thawed out!"),
        }
    }
}

/// Type-based immunities: poison/steel can't be poisoned, fire can't be
/// burned, electric can't be paralyzed, ice can't be frozen.
pub fn type_blocks_status(types: &[Type], status: Status) -> bool {
    types.iter().any(|ty| {
        matches!(
            (status, ty),
            (Status::Poison, Type::Poison)
                | (Status::Poison, Type::Steel)
                | (Status::Burn, Type::Fire)
                | (Status::Paralysis, Type::Electric)
                | (Status::Freeze, Type::Ice)
        )
    })
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ActionCheck {
    Ready,
    /// The status wore off during the check; the creature acts this turn.
    Recovered { message: String },
    Blocked { message: String },
}

/// Decides whether a creature with `status` may act, consuming at most one
/// draw.
pub fn check_can_act(
    name: &str,
    status: Option<Status>,
    rng: &mut dyn RandomSource,
) -> ActionCheck {
    let Some(status) = status else {
        return ActionCheck::Ready;
    };
    match status.profile().skip {
        SkipRule::Never => ActionCheck::Ready,
        SkipRule::Chance(probability) => {
            if rng.chance(probability) {
                ActionCheck::Blocked {
                    message: format!("{name} is paralyzed! It can't move!"),
                }
            } else {
                ActionCheck::Ready
            }
        }
        SkipRule::UntilRecovery(probability) => {
            if rng.chance(probability) {
                ActionCheck::Recovered {
                    message: status.cured_message(name),
                }
            } else {
                let message = match status {
                    Status::Sleep => format!("{name} is fast asleep."),
                    _ => format!("{name} is frozen solid!"),
                };
                ActionCheck::Blocked { message }
            }
        }
    }
}
