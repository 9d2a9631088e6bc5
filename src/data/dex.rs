//! Read-only species and move lookups consumed by the battle core.
//!
//! The core never reaches for a global table: every component that needs a
//! definition receives a resolver. [`Dex`] is the in-crate implementation,
//! loadable from JSON; [`sample_dex`] exposes a small embedded data set.

use crate::data::moves::{normalize_id, MoveDefinition};
use crate::data::species::SpeciesDefinition;
use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;

pub trait SpeciesResolver: Send + Sync {
    fn species(&self, id: &str) -> Option<&SpeciesDefinition>;
}

pub trait MoveResolver: Send + Sync {
    fn move_definition(&self, id: &str) -> Option<&MoveDefinition>;
}

#[derive(Deserialize)]
struct DexFile {
    #[serde(default)]
    species: Vec<SpeciesDefinition>,
    #[serde(default)]
    moves: Vec<MoveDefinition>,
}

#[derive(Clone, Debug, Default)]
pub struct Dex {
    species: HashMap<String, SpeciesDefinition>,
    moves: HashMap<String, MoveDefinition>,
}

impl Dex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let file: DexFile = serde_json::from_str(raw).context("failed to parse dex json")?;
        let mut dex = Dex::new();
        for species in file.species {
            dex.insert_species(species)?;
        }
        for definition in file.moves {
            dex.insert_move(definition);
        }
        dex.validate_learnsets()?;
        Ok(dex)
    }

    pub fn insert_species(&mut self, species: SpeciesDefinition) -> Result<()> {
        if species.types.is_empty() || species.types.len() > 2 {
            bail!(
                "species '{}' must have one or two types (found {})",
                species.id,
                species.types.len()
            );
        }
        self.species.insert(normalize_id(&species.id), species);
        Ok(())
    }

    pub fn insert_move(&mut self, definition: MoveDefinition) {
        self.moves.insert(normalize_id(&definition.id), definition);
    }

    pub fn species_count(&self) -> usize {
        self.species.len()
    }

    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    fn validate_learnsets(&self) -> Result<()> {
        for species in self.species.values() {
            for entry in &species.learnset {
                if !self.moves.contains_key(&normalize_id(&entry.move_id)) {
                    bail!(
                        "species '{}' learns unknown move '{}'",
                        species.id,
                        entry.move_id
                    );
                }
            }
        }
        Ok(())
    }
}

impl SpeciesResolver for Dex {
    fn species(&self, id: &str) -> Option<&SpeciesDefinition> {
        self.species.get(&normalize_id(id))
    }
}

impl MoveResolver for Dex {
    fn move_definition(&self, id: &str) -> Option<&MoveDefinition> {
        self.moves.get(&normalize_id(id))
    }
}

static SAMPLE_DEX: Lazy<Dex> = Lazy::new(|| {
    let raw = include_str!("sample_dex.json");
    Dex::from_json_str(raw).expect("embedded sample_dex.json must be valid")
});

/// Small bundled data set, handy for hosts prototyping and for tests.
pub fn sample_dex() -> &'static Dex {
    &SAMPLE_DEX
}
