use crate::data::types::Type;
use serde::{Deserialize, Serialize};

pub const MAX_LEVEL: u8 = 100;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u16,
    pub atk: u16,
    pub def: u16,
    pub spa: u16,
    pub spd: u16,
    pub spe: u16,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum GrowthRate {
    Fast,
    #[default]
    MediumFast,
    MediumSlow,
    Slow,
}

impl GrowthRate {
    /// Total experience required to reach `level`.
    pub fn experience_for_level(self, level: u8) -> u32 {
        let n = level.clamp(1, MAX_LEVEL) as i64;
        if n == 1 {
            return 0;
        }
        let cube = n * n * n;
        let total = match self {
            GrowthRate::Fast => cube * 4 / 5,
            GrowthRate::MediumFast => cube,
            GrowthRate::MediumSlow => cube * 6 / 5 - 15 * n * n + 100 * n - 140,
            GrowthRate::Slow => cube * 5 / 4,
        };
        total.max(0) as u32
    }

    /// Highest level whose threshold `experience` has reached.
    pub fn level_for_experience(self, experience: u32) -> u8 {
        let mut level = 1;
        while level < MAX_LEVEL && self.experience_for_level(level + 1) <= experience {
            level += 1;
        }
        level
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LearnsetEntry {
    pub level: u8,
    #[serde(rename = "move")]
    pub move_id: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeciesDefinition {
    pub id: String,
    pub name: String,
    pub types: Vec<Type>,
    pub base_stats: BaseStats,
    #[serde(default)]
    pub base_experience: u32,
    #[serde(default)]
    pub growth_rate: GrowthRate,
    #[serde(default)]
    pub learnset: Vec<LearnsetEntry>,
}

impl SpeciesDefinition {
    pub fn has_type(&self, ty: Type) -> bool {
        self.types.contains(&ty)
    }

    /// The (up to) four most recently learnable moves at `level`.
    pub fn default_moves(&self, level: u8) -> Vec<String> {
        let mut learned: Vec<&LearnsetEntry> = self
            .learnset
            .iter()
            .filter(|entry| entry.level <= level)
            .collect();
        learned.sort_by_key(|entry| entry.level);
        let mut moves: Vec<String> = Vec::new();
        for entry in learned.into_iter().rev() {
            if moves.len() == 4 {
                break;
            }
            if !moves.contains(&entry.move_id) {
                moves.push(entry.move_id.clone());
            }
        }
        moves.reverse();
        moves
    }
}
