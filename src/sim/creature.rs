use crate::data::dex::{MoveResolver, SpeciesResolver};
use crate::data::species::{SpeciesDefinition, MAX_LEVEL};
use crate::data::types::Type;
use crate::error::BattleError;
use crate::sim::abilities::Ability;
use crate::sim::items::HeldItem;
use crate::sim::stats::{Nature, StatsSet};
use crate::sim::status::Status;
use anyhow::Context;
use serde::{Deserialize, Serialize};

pub const MAX_MOVES: usize = 4;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MoveSlot {
    pub move_id: String,
    pub remaining_uses: u8,
    pub max_uses: u8,
}

impl MoveSlot {
    pub fn is_usable(&self) -> bool {
        self.remaining_uses > 0
    }
}

/// One owned creature. HP stays within `[0, stats.hp]`; 0 means fainted.
#[derive(Clone, Debug, PartialEq)]
pub struct Creature {
    pub id: u64,
    pub species_id: String,
    pub species_name: String,
    pub types: Vec<Type>,
    pub nickname: Option<String>,
    pub level: u8,
    pub experience: u32,
    pub nature: Nature,
    pub ivs: [u8; 6],
    pub evs: [u8; 6],
    pub stats: StatsSet,
    pub current_hp: u16,
    pub moves: Vec<MoveSlot>,
    pub status: Option<Status>,
    pub ability: Option<Ability>,
    pub held_item: Option<HeldItem>,
    pub item_consumed: bool,
}

impl Creature {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: u64,
        species: &SpeciesDefinition,
        level: u8,
        nature: Nature,
        ivs: [u8; 6],
        evs: [u8; 6],
        move_ids: &[String],
        moves: &dyn MoveResolver,
    ) -> Result<Self, BattleError> {
        if level == 0 || level > MAX_LEVEL {
            return Err(BattleError::InvalidLevel(level));
        }
        if move_ids.len() > MAX_MOVES {
            return Err(BattleError::TooManyMoves(move_ids.len()));
        }
        let ivs = ivs.map(|iv| iv.min(31));
        let mut slots = Vec::with_capacity(move_ids.len());
        for move_id in move_ids {
            let definition = moves
                .move_definition(move_id)
                .ok_or_else(|| BattleError::UnknownMove(move_id.clone()))?;
            slots.push(MoveSlot {
                move_id: definition.id.clone(),
                remaining_uses: definition.max_uses,
                max_uses: definition.max_uses,
            });
        }
        let stats = StatsSet::from_base(&species.base_stats, level, ivs, evs, nature);
        Ok(Self {
            id,
            species_id: species.id.clone(),
            species_name: species.name.clone(),
            types: species.types.clone(),
            nickname: None,
            level,
            experience: species.growth_rate.experience_for_level(level),
            nature,
            ivs,
            evs,
            stats,
            current_hp: stats.hp,
            moves: slots,
            status: None,
            ability: None,
            held_item: None,
            item_consumed: false,
        })
    }

    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.ability = Some(ability);
        self
    }

    pub fn with_item(mut self, item: HeldItem) -> Self {
        self.held_item = Some(item);
        self.item_consumed = false;
        self
    }

    pub fn name(&self) -> &str {
        self.nickname.as_deref().unwrap_or(&self.species_name)
    }

    pub fn max_hp(&self) -> u16 {
        self.stats.hp
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    pub fn is_full_hp(&self) -> bool {
        self.current_hp >= self.stats.hp
    }

    pub fn hp_fraction(&self) -> f64 {
        if self.stats.hp == 0 {
            return 0.0;
        }
        self.current_hp as f64 / self.stats.hp as f64
    }

    /// Removes up to `amount` HP and returns what was actually lost.
    pub fn take_damage(&mut self, amount: u16) -> u16 {
        let lost = amount.min(self.current_hp);
        self.current_hp -= lost;
        lost
    }

    /// Restores up to `amount` HP (never past max) and returns what was gained.
    /// Fainted creatures cannot be healed this way.
    pub fn heal(&mut self, amount: u16) -> u16 {
        if self.is_fainted() {
            return 0;
        }
        let before = self.current_hp;
        self.current_hp = self.current_hp.saturating_add(amount).min(self.stats.hp);
        self.current_hp - before
    }

    /// Held item still in effect.
    pub fn active_item(&self) -> Option<HeldItem> {
        if self.item_consumed {
            return None;
        }
        self.held_item
    }

    pub fn usable_slots(&self) -> Vec<usize> {
        self.moves
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.is_usable().then_some(index))
            .collect()
    }

    pub fn has_usable_move(&self) -> bool {
        self.moves.iter().any(MoveSlot::is_usable)
    }

    /// Recomputes the stat block (after a level-up or evolution), keeping the
    /// damage already taken.
    pub fn recalculate_stats(&mut self, species: &SpeciesDefinition) {
        let missing = self.stats.hp.saturating_sub(self.current_hp);
        self.stats = StatsSet::from_base(
            &species.base_stats,
            self.level,
            self.ivs,
            self.evs,
            self.nature,
        );
        if !self.is_fainted() {
            self.current_hp = self.stats.hp.saturating_sub(missing).max(1);
        }
    }

    pub fn evolve_into(&mut self, species: &SpeciesDefinition) {
        self.species_id = species.id.clone();
        self.species_name = species.name.clone();
        self.types = species.types.clone();
        self.recalculate_stats(species);
    }
}

fn perfect_ivs() -> [u8; 6] {
    [31; 6]
}

/// Serializable recipe for a creature; moves default to the latest four from
/// the learnset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreatureTemplate {
    pub species: String,
    #[serde(default)]
    pub nickname: Option<String>,
    pub level: u8,
    #[serde(default)]
    pub nature: Nature,
    #[serde(default = "perfect_ivs")]
    pub ivs: [u8; 6],
    #[serde(default)]
    pub evs: [u8; 6],
    #[serde(default)]
    pub moves: Vec<String>,
    #[serde(default)]
    pub ability: Option<String>,
    #[serde(default)]
    pub item: Option<String>,
}

impl CreatureTemplate {
    pub fn new(species: impl Into<String>, level: u8) -> Self {
        Self {
            species: species.into(),
            nickname: None,
            level,
            nature: Nature::default(),
            ivs: perfect_ivs(),
            evs: [0; 6],
            moves: Vec::new(),
            ability: None,
            item: None,
        }
    }

    pub fn roster_from_json(raw: &str) -> anyhow::Result<Vec<CreatureTemplate>> {
        serde_json::from_str(raw).context("failed to parse roster json")
    }

    pub fn build(
        &self,
        id: u64,
        species: &dyn SpeciesResolver,
        moves: &dyn MoveResolver,
    ) -> Result<Creature, BattleError> {
        let definition = species
            .species(&self.species)
            .ok_or_else(|| BattleError::UnknownSpecies(self.species.clone()))?;
        let move_ids = if self.moves.is_empty() {
            definition.default_moves(self.level)
        } else {
            self.moves.clone()
        };
        let mut creature = Creature::new(
            id,
            definition,
            self.level,
            self.nature,
            self.ivs,
            self.evs,
            &move_ids,
            moves,
        )?;
        creature.nickname = self.nickname.clone();
        if let Some(raw) = &self.ability {
            let ability =
                Ability::from_id(raw).ok_or_else(|| BattleError::UnknownAbility(raw.clone()))?;
            creature.ability = Some(ability);
        }
        if let Some(raw) = &self.item {
            let item = HeldItem::from_id(raw).ok_or_else(|| BattleError::UnknownItem(raw.clone()))?;
            creature.held_item = Some(item);
        }
        Ok(creature)
    }
}

#[cfg(test)]
pub(crate) fn test_creature(species: &str, level: u8, moves: &[&str]) -> Creature {
    let dex = crate::data::dex::sample_dex();
    let definition = dex.species(species).expect("species is bundled");
    let move_ids: Vec<String> = moves.iter().map(|id| id.to_string()).collect();
    Creature::new(0, definition, level, Nature::Hardy, [31; 6], [0; 6], &move_ids, dex)
        .expect("test creature should build")
}
