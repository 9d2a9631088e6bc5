//! Battle setup knobs, loadable from JSON.

use crate::sim::weather::Weather;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleKind {
    #[default]
    Wild,
    Trainer,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiTier {
    Random,
    #[default]
    Basic,
    Smart,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct InitialWeather {
    pub condition: Weather,
    /// 0 keeps the weather for the whole battle.
    #[serde(default)]
    pub turns: u8,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    pub kind: BattleKind,
    pub ai: AiTier,
    pub seed: u64,
    pub weather: Option<InitialWeather>,
    pub trainer_name: Option<String>,
}

impl BattleConfig {
    pub fn wild() -> Self {
        Self::default()
    }

    pub fn trainer(name: impl Into<String>) -> Self {
        Self {
            kind: BattleKind::Trainer,
            trainer_name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_ai(mut self, ai: AiTier) -> Self {
        self.ai = ai;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_weather(mut self, condition: Weather, turns: u8) -> Self {
        self.weather = Some(InitialWeather { condition, turns });
        self
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("failed to parse battle config")
    }

    pub fn trainer_label(&self) -> &str {
        self.trainer_name.as_deref().unwrap_or("The trainer")
    }
}
