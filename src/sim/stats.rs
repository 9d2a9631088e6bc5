use crate::data::species::BaseStats;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nature {
    #[default]
    Hardy,
    Lonely,
    Brave,
    Adamant,
    Naughty,
    Bold,
    Docile,
    Relaxed,
    Impish,
    Lax,
    Timid,
    Hasty,
    Serious,
    Jolly,
    Naive,
    Modest,
    Mild,
    Quiet,
    Bashful,
    Rash,
    Calm,
    Gentle,
    Sassy,
    Careful,
    Quirky,
}

/// The five axes that carry stages and nature modifiers. HP has neither.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatAxis {
    #[serde(alias = "atk")]
    Attack,
    #[serde(alias = "def")]
    Defense,
    #[serde(alias = "spa", alias = "special_attack")]
    SpecialAttack,
    #[serde(alias = "spd", alias = "special_defense")]
    SpecialDefense,
    #[serde(alias = "spe")]
    Speed,
}

impl StatAxis {
    pub const ALL: [StatAxis; 5] = [
        StatAxis::Attack,
        StatAxis::Defense,
        StatAxis::SpecialAttack,
        StatAxis::SpecialDefense,
        StatAxis::Speed,
    ];

    fn index(self) -> usize {
        match self {
            StatAxis::Attack => 0,
            StatAxis::Defense => 1,
            StatAxis::SpecialAttack => 2,
            StatAxis::SpecialDefense => 3,
            StatAxis::Speed => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatAxis::Attack => "Attack",
            StatAxis::Defense => "Defense",
            StatAxis::SpecialAttack => "Sp. Atk",
            StatAxis::SpecialDefense => "Sp. Def",
            StatAxis::Speed => "Speed",
        }
    }
}

/// Nature multiplier in tenths (9, 10 or 11).
pub fn nature_tenths(nature: Nature, stat: StatAxis) -> u32 {
    use StatAxis::*;
    match nature {
        Nature::Hardy | Nature::Docile | Nature::Serious | Nature::Bashful | Nature::Quirky => 10,
        Nature::Lonely => bonus(stat, Attack, Defense),
        Nature::Brave => bonus(stat, Attack, Speed),
        Nature::Adamant => bonus(stat, Attack, SpecialAttack),
        Nature::Naughty => bonus(stat, Attack, SpecialDefense),
        Nature::Bold => bonus(stat, Defense, Attack),
        Nature::Relaxed => bonus(stat, Defense, Speed),
        Nature::Impish => bonus(stat, Defense, SpecialAttack),
        Nature::Lax => bonus(stat, Defense, SpecialDefense),
        Nature::Timid => bonus(stat, Speed, Attack),
        Nature::Hasty => bonus(stat, Speed, Defense),
        Nature::Jolly => bonus(stat, Speed, SpecialAttack),
        Nature::Naive => bonus(stat, Speed, SpecialDefense),
        Nature::Modest => bonus(stat, SpecialAttack, Attack),
        Nature::Mild => bonus(stat, SpecialAttack, Defense),
        Nature::Quiet => bonus(stat, SpecialAttack, Speed),
        Nature::Rash => bonus(stat, SpecialAttack, SpecialDefense),
        Nature::Calm => bonus(stat, SpecialDefense, Attack),
        Nature::Gentle => bonus(stat, SpecialDefense, Defense),
        Nature::Sassy => bonus(stat, SpecialDefense, Speed),
        Nature::Careful => bonus(stat, SpecialDefense, SpecialAttack),
    }
}

fn bonus(stat: StatAxis, boosted: StatAxis, lowered: StatAxis) -> u32 {
    if stat == boosted {
        11
    } else if stat == lowered {
        9
    } else {
        10
    }
}

pub fn calc_hp(base: u16, iv: u8, ev: u8, level: u8) -> u16 {
    let base_value = base as u32 * 2 + iv as u32 + ev as u32 / 4;
    let intermediate = base_value * level as u32 / 100;
    (intermediate + level as u32 + 10) as u16
}

pub fn calc_stat(base: u16, iv: u8, ev: u8, level: u8, nature_tenths: u32) -> u16 {
    let base_value = base as u32 * 2 + iv as u32 + ev as u32 / 4;
    let intermediate = base_value * level as u32 / 100;
    ((intermediate + 5) * nature_tenths / 10) as u16
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StatsSet {
    pub hp: u16,
    pub atk: u16,
    pub def: u16,
    pub spa: u16,
    pub spd: u16,
    pub spe: u16,
}

impl StatsSet {
    /// `ivs`/`evs` are ordered HP, Atk, Def, SpAtk, SpDef, Speed.
    pub fn from_base(
        base: &BaseStats,
        level: u8,
        ivs: [u8; 6],
        evs: [u8; 6],
        nature: Nature,
    ) -> Self {
        let stat = |value: u16, index: usize, axis: StatAxis| {
            calc_stat(value, ivs[index], evs[index], level, nature_tenths(nature, axis))
        };
        Self {
            hp: calc_hp(base.hp, ivs[0], evs[0], level),
            atk: stat(base.atk, 1, StatAxis::Attack),
            def: stat(base.def, 2, StatAxis::Defense),
            spa: stat(base.spa, 3, StatAxis::SpecialAttack),
            spd: stat(base.spd, 4, StatAxis::SpecialDefense),
            spe: stat(base.spe, 5, StatAxis::Speed),
        }
    }

    pub fn get(&self, axis: StatAxis) -> u16 {
        match axis {
            StatAxis::Attack => self.atk,
            StatAxis::Defense => self.def,
            StatAxis::SpecialAttack => self.spa,
            StatAxis::SpecialDefense => self.spd,
            StatAxis::Speed => self.spe,
        }
    }
}

pub const MAX_STAGE: i8 = 6;

/// (2+s)/2 for s >= 0, 2/(2-s) below zero.
pub fn stage_multiplier(stage: i8) -> f64 {
    let stage = stage.clamp(-MAX_STAGE, MAX_STAGE) as f64;
    if stage >= 0.0 {
        (2.0 + stage) / 2.0
    } else {
        2.0 / (2.0 - stage)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StageChange {
    Applied { stage: i8 },
    /// The delta would have left [-6, 6]; nothing changed.
    Capped,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct StatStages([i8; 5]);

impl StatStages {
    pub fn get(&self, axis: StatAxis) -> i8 {
        self.0[axis.index()]
    }

    pub fn multiplier(&self, axis: StatAxis) -> f64 {
        stage_multiplier(self.get(axis))
    }

    pub fn apply(&mut self, axis: StatAxis, delta: i8) -> StageChange {
        let current = self.get(axis);
        let next = current as i16 + delta as i16;
        if next > MAX_STAGE as i16 || next < -(MAX_STAGE as i16) {
            return StageChange::Capped;
        }
        self.0[axis.index()] = next as i8;
        StageChange::Applied { stage: next as i8 }
    }

    pub fn reset(&mut self) {
        self.0 = [0; 5];
    }

    pub fn is_neutral(&self) -> bool {
        self.0.iter().all(|stage| *stage == 0)
    }
}

/// Staged value of a raw stat, floored.
pub fn staged_stat(raw: u16, stage: i8) -> u16 {
    (raw as f64 * stage_multiplier(stage)).floor() as u16
}

pub fn stage_message(name: &str, axis: StatAxis, delta: i8, change: StageChange) -> String {
    let label = axis.label();
    match change {
        StageChange::Capped if delta > 0 => format!("{name}'s {label} won't go any higher!"),
        StageChange::Capped => format!("{name}'s {label} won't go any lower!"),
        StageChange::Applied { .. } => {
            let verb = match delta {
                1 => "rose!",
                2 => "rose sharply!",
                d if d >= 3 => "rose drastically!",
                -1 => "fell!",
                -2 => "harshly fell!",
                _ => "severely fell!",
            };
            format!("{name}'s {label} {verb}")
        }
    }
}
