use crate::sim::creature::Creature;
use crate::sim::status::Status;
use serde::{Deserialize, Serialize};

/// Items the player can spend a turn using on a roster member.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BagItem {
    Potion,
    SuperPotion,
    HyperPotion,
    MaxPotion,
    Antidote,
    BurnHeal,
    ParalyzeHeal,
    Awakening,
    IceHeal,
    FullHeal,
    FullRestore,
}

impl BagItem {
    pub fn name(self) -> &'static str {
        match self {
            BagItem::Potion => "Potion",
            BagItem::SuperPotion => "Super Potion",
            BagItem::HyperPotion => "Hyper Potion",
            BagItem::MaxPotion => "Max Potion",
            BagItem::Antidote => "Antidote",
            BagItem::BurnHeal => "Burn Heal",
            BagItem::ParalyzeHeal => "Paralyze Heal",
            BagItem::Awakening => "Awakening",
            BagItem::IceHeal => "Ice Heal",
            BagItem::FullHeal => "Full Heal",
            BagItem::FullRestore => "Full Restore",
        }
    }

    /// HP restored; `None` for pure status items, `u16::MAX` for a full heal.
    fn restores(self) -> Option<u16> {
        match self {
            BagItem::Potion => Some(20),
            BagItem::SuperPotion => Some(60),
            BagItem::HyperPotion => Some(120),
            BagItem::MaxPotion | BagItem::FullRestore => Some(u16::MAX),
            _ => None,
        }
    }

    fn cures(self, status: Status) -> bool {
        match self {
            BagItem::Antidote => status == Status::Poison,
            BagItem::BurnHeal => status == Status::Burn,
            BagItem::ParalyzeHeal => status == Status::Paralysis,
            BagItem::Awakening => status == Status::Sleep,
            BagItem::IceHeal => status == Status::Freeze,
            BagItem::FullHeal | BagItem::FullRestore => true,
            _ => false,
        }
    }

    /// Applies the item and narrates the result. An item with no effect still
    /// produces narration; the caller decides that the turn is spent anyway.
    pub fn apply(self, target: &mut Creature) -> Vec<String> {
        let name = target.name().to_string();
        let mut messages = vec![format!("You used a {} on {name}!", self.name())];
        let mut had_effect = false;
        if let Some(amount) = self.restores() {
            let healed = target.heal(amount);
            if healed > 0 {
                had_effect = true;
                messages.push(format!("{name}'s HP was restored by {healed} points."));
            }
        }
        if let Some(status) = target.status {
            if self.cures(status) {
                target.status = None;
                had_effect = true;
                messages.push(status.cured_message(&name));
            }
        }
        if !had_effect {
            messages.push("It won't have any effect.".to_string());
        }
        messages
    }
}
