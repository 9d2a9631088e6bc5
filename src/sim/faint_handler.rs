use crate::sim::abilities::survives_at_full_hp;
use crate::sim::creature::Creature;
use crate::sim::items::HeldItem;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KoPrevention {
    Sturdy,
    FocusSash,
}

impl KoPrevention {
    pub fn message(self, name: &str) -> String {
        match self {
            KoPrevention::Sturdy => format!("{name} endured the hit!"),
            KoPrevention::FocusSash => format!("{name} hung on using its Focus Sash!"),
        }
    }
}

/// Reduces a lethal hit to leave the defender at 1 HP when it was at full HP
/// (and above 1). Does not consume the sash; the caller does that when it
/// commits the hit.
pub fn prevent_ko_if_applicable(defender: &Creature, damage: u16) -> (u16, Option<KoPrevention>) {
    if defender.current_hp <= 1 || damage < defender.current_hp || !defender.is_full_hp() {
        return (damage, None);
    }
    if survives_at_full_hp(defender.ability) {
        return (defender.current_hp - 1, Some(KoPrevention::Sturdy));
    }
    if defender.active_item() == Some(HeldItem::FocusSash) {
        return (defender.current_hp - 1, Some(KoPrevention::FocusSash));
    }
    (damage, None)
}

/// Commits the side effect of a survival outcome.
pub fn consume_survival_item(defender: &mut Creature, prevention: Option<KoPrevention>) {
    if prevention == Some(KoPrevention::FocusSash) {
        defender.item_consumed = true;
    }
}
