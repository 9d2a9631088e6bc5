//! Experience and evolution collaborators, consulted when an opponent faints.

use crate::data::species::{SpeciesDefinition, MAX_LEVEL};
use crate::sim::creature::Creature;
use std::collections::HashMap;

pub trait ExperienceService {
    fn experience_yield(
        &self,
        defeated: &SpeciesDefinition,
        defeated_level: u8,
        trainer_battle: bool,
    ) -> u32;

    /// Returns the new experience total and level.
    fn apply_experience(
        &self,
        species: &SpeciesDefinition,
        experience: u32,
        level: u8,
        gained: u32,
    ) -> (u32, u8);
}

/// Base-experience yield (x1.5 in trainer battles) over the species growth curves.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClassicExperience;

impl ExperienceService for ClassicExperience {
    fn experience_yield(
        &self,
        defeated: &SpeciesDefinition,
        defeated_level: u8,
        trainer_battle: bool,
    ) -> u32 {
        let mut amount = defeated.base_experience * defeated_level as u32 / 7;
        if trainer_battle {
            amount = amount * 3 / 2;
        }
        amount.max(1)
    }

    fn apply_experience(
        &self,
        species: &SpeciesDefinition,
        experience: u32,
        level: u8,
        gained: u32,
    ) -> (u32, u8) {
        let total = experience.saturating_add(gained);
        let reached = species.growth_rate.level_for_experience(total);
        (total, reached.max(level).min(MAX_LEVEL))
    }
}

pub trait EvolutionService {
    /// Species id the creature should evolve into right now, if any.
    fn evolution_target(&self, creature: &Creature, species: &SpeciesDefinition) -> Option<String>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoEvolution;

impl EvolutionService for NoEvolution {
    fn evolution_target(
        &self,
        _creature: &Creature,
        _species: &SpeciesDefinition,
    ) -> Option<String> {
        None
    }
}

#[derive(Clone, Debug, Default)]
pub struct LevelEvolution {
    rules: HashMap<String, (u8, String)>,
}

impl LevelEvolution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(
        mut self,
        from: impl Into<String>,
        level: u8,
        into: impl Into<String>,
    ) -> Self {
        self.rules.insert(from.into(), (level, into.into()));
        self
    }

    /// Rules for the bundled sample dex.
    pub fn sample() -> Self {
        Self::new()
            .with_rule("bulbasaur", 16, "ivysaur")
            .with_rule("charmander", 16, "charmeleon")
            .with_rule("magikarp", 20, "gyarados")
    }
}

impl EvolutionService for LevelEvolution {
    fn evolution_target(&self, creature: &Creature, species: &SpeciesDefinition) -> Option<String> {
        let (level, into) = self.rules.get(&species.id)?;
        (creature.level >= *level).then(|| into.clone())
    }
}
