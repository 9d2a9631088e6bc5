//! Deterministic turn-based battle core for a monster-collecting RPG.
//!
//! The main entry points are [`sim::battle::Battle`], which resolves one turn
//! per call against an injected [`random::RandomSource`], and
//! [`engine::BattleEngine`], which owns a seeded RNG for replays.

pub mod battle_logger;
pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod random;
pub mod sim;

/// Commonly used exports for external consumers.
pub mod prelude {
    pub use crate::config::{AiTier, BattleConfig, BattleKind};
    pub use crate::data::{sample_dex, Dex, MoveResolver, SpeciesResolver};
    pub use crate::engine::{BattleEngine, StepResult};
    pub use crate::error::BattleError;
    pub use crate::random::{RandomSource, ScriptedRandom};
    pub use crate::sim::battle::{Action, Battle, BattleResult, BattleState, Phase, TurnReport};
    pub use crate::sim::items::bag::BagItem;
    pub use crate::sim::moves::MoveChoice;
    pub use crate::sim::progression::{ClassicExperience, LevelEvolution, NoEvolution};
    pub use crate::sim::weather::Weather;
    pub use crate::sim::{Creature, CreatureTemplate};
}
