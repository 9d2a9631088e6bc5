use crate::data::types::Type;
use crate::sim::stats::StatAxis;
use crate::sim::status::Status;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectTarget {
    #[serde(alias = "user")]
    #[serde(rename = "self")]
    User,
    Opponent,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StatusChance {
    pub status: Status,
    #[serde(default = "always")]
    pub chance: u8,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StageDelta {
    pub stat: StatAxis,
    pub delta: i8,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StatChanges {
    pub target: EffectTarget,
    #[serde(default = "always")]
    pub chance: u8,
    pub changes: Vec<StageDelta>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SecondaryEffect {
    #[serde(default)]
    pub status: Option<StatusChance>,
    #[serde(default)]
    pub stat_changes: Option<StatChanges>,
}

fn always() -> u8 {
    100
}

fn default_max_uses() -> u8 {
    10
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveDefinition {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: Type,
    pub category: MoveCategory,
    #[serde(default)]
    pub power: Option<u16>,
    #[serde(default = "always")]
    pub accuracy: u8,
    #[serde(default = "default_max_uses", alias = "pp")]
    pub max_uses: u8,
    #[serde(default)]
    pub priority: i8,
    #[serde(default)]
    pub contact: bool,
    #[serde(default)]
    pub secondary: Option<SecondaryEffect>,
}

impl MoveDefinition {
    /// Status moves and moves without a power value never deal damage.
    pub fn is_damaging(&self) -> bool {
        !matches!(self.category, MoveCategory::Status) && self.power.is_some()
    }

    pub fn inflicted_status(&self) -> Option<StatusChance> {
        self.secondary.as_ref().and_then(|secondary| secondary.status)
    }

    pub fn stat_changes(&self) -> Option<&StatChanges> {
        self.secondary
            .as_ref()
            .and_then(|secondary| secondary.stat_changes.as_ref())
    }

    /// True for status moves that only raise the user's own stages.
    pub fn is_self_boost(&self) -> bool {
        matches!(self.category, MoveCategory::Status)
            && self.inflicted_status().is_none()
            && self.stat_changes().is_some_and(|changes| {
                changes.target == EffectTarget::User
                    && changes.changes.iter().all(|change| change.delta > 0)
            })
    }
}

pub fn normalize_id(name: &str) -> String {
    name.to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}
