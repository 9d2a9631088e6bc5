use crate::sim::creature::Creature;
use crate::sim::items::HeldItem;
use crate::sim::status::Status;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BerryEffect {
    Healed { item: HeldItem, amount: u16 },
    Cured { item: HeldItem, status: Status },
}

impl BerryEffect {
    pub fn message(self, name: &str) -> String {
        match self {
            BerryEffect::Healed { item, .. } => {
                format!("{name} restored its health using its {}!", item.name())
            }
            BerryEffect::Cured { item, status } => {
                format!("{name}'s {} cured its {}!", item.name(), status.name())
            }
        }
    }
}

fn cures(item: HeldItem, status: Status) -> bool {
    match item {
        HeldItem::LumBerry => true,
        HeldItem::CheriBerry => status == Status::Paralysis,
        HeldItem::ChestoBerry => status == Status::Sleep,
        HeldItem::PechaBerry => status == Status::Poison,
        HeldItem::RawstBerry => status == Status::Burn,
        HeldItem::AspearBerry => status == Status::Freeze,
        _ => false,
    }
}

/// Sitrus restores 1/4 max HP, Oran a flat 10, once HP is at or below half.
pub fn try_consume_hp_berry(creature: &mut Creature) -> Option<BerryEffect> {
    if creature.is_fainted() || creature.current_hp as u32 * 2 > creature.stats.hp as u32 {
        return None;
    }
    let item = creature.active_item()?;
    let amount = match item {
        HeldItem::SitrusBerry => (creature.stats.hp / 4).max(1),
        HeldItem::OranBerry => 10,
        _ => return None,
    };
    creature.item_consumed = true;
    let healed = creature.heal(amount);
    Some(BerryEffect::Healed { item, amount: healed })
}

pub fn try_consume_status_berry(creature: &mut Creature) -> Option<BerryEffect> {
    if creature.is_fainted() {
        return None;
    }
    let status = creature.status?;
    let item = creature.active_item()?;
    if !cures(item, status) {
        return None;
    }
    creature.item_consumed = true;
    creature.status = None;
    Some(BerryEffect::Cured { item, status })
}

pub fn try_consume_berry(creature: &mut Creature) -> Option<BerryEffect> {
    try_consume_hp_berry(creature).or_else(|| try_consume_status_berry(creature))
}
