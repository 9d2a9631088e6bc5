use crate::data::moves::MoveCategory;
use crate::data::types::Type;
use crate::sim::creature::Creature;
use crate::sim::items::type_items::item_type_boost;
use crate::sim::items::HeldItem;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EndOfTurnEffect {
    Heal { amount: u16, item: HeldItem },
    Damage { amount: u16, item: HeldItem },
}

pub fn speed_modifier(item: Option<HeldItem>) -> f64 {
    match item {
        Some(HeldItem::ChoiceScarf) => 1.5,
        _ => 1.0,
    }
}

pub fn attack_stat_modifier(item: Option<HeldItem>, category: MoveCategory) -> f64 {
    match (item, category) {
        (Some(HeldItem::ChoiceBand), MoveCategory::Physical) => 1.5,
        (Some(HeldItem::ChoiceSpecs), MoveCategory::Special) => 1.5,
        _ => 1.0,
    }
}

pub fn base_power_modifier(item: Option<HeldItem>, move_type: Type) -> f64 {
    match item {
        Some(HeldItem::LifeOrb) => 1.3,
        _ => item_type_boost(item, move_type),
    }
}

pub fn final_modifier(item: Option<HeldItem>, effectiveness: f32) -> f64 {
    match item {
        Some(HeldItem::ExpertBelt) if effectiveness > 1.0 => 1.2,
        _ => 1.0,
    }
}

/// Life Orb costs 1/10 max HP whenever the holder dealt damage.
pub fn life_orb_recoil(attacker: &Creature, damage_dealt: u16) -> Option<u16> {
    if damage_dealt == 0 || attacker.is_fainted() {
        return None;
    }
    match attacker.active_item() {
        Some(HeldItem::LifeOrb) => Some((attacker.stats.hp / 10).max(1)),
        _ => None,
    }
}

pub fn end_of_turn_effect(creature: &Creature, types: &[Type]) -> Option<EndOfTurnEffect> {
    if creature.is_fainted() {
        return None;
    }
    let max_hp = creature.stats.hp;
    match creature.active_item()? {
        HeldItem::Leftovers => {
            if creature.is_full_hp() {
                return None;
            }
            Some(EndOfTurnEffect::Heal {
                amount: (max_hp / 16).max(1),
                item: HeldItem::Leftovers,
            })
        }
        HeldItem::BlackSludge => {
            if types.contains(&Type::Poison) {
                if creature.is_full_hp() {
                    return None;
                }
                Some(EndOfTurnEffect::Heal {
                    amount: (max_hp / 16).max(1),
                    item: HeldItem::BlackSludge,
                })
            } else {
                Some(EndOfTurnEffect::Damage {
                    amount: (max_hp / 8).max(1),
                    item: HeldItem::BlackSludge,
                })
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::creature::test_creature;

    #[test]
    fn choice_items_follow_category() {
        assert_eq!(attack_stat_modifier(Some(HeldItem::ChoiceBand), MoveCategory::Physical), 1.5);
        assert_eq!(attack_stat_modifier(Some(HeldItem::ChoiceBand), MoveCategory::Special), 1.0);
        assert_eq!(attack_stat_modifier(Some(HeldItem::ChoiceSpecs), MoveCategory::Special), 1.5);
        assert_eq!(speed_modifier(Some(HeldItem::ChoiceScarf)), 1.5);
    }

    #[test]
    fn expert_belt_needs_super_effective() {
        assert_eq!(final_modifier(Some(HeldItem::ExpertBelt), 2.0), 1.2);
        assert_eq!(final_modifier(Some(HeldItem::ExpertBelt), 1.0), 1.0);
    }

    #[test]
    fn black_sludge_hurts_non_poison_holders() {
        let mut holder = test_creature("rattata", 30, &["tackle"]);
        holder.held_item = Some(HeldItem::BlackSludge);
        assert!(matches!(
            end_of_turn_effect(&holder, &[Type::Normal]),
            Some(EndOfTurnEffect::Damage { .. })
        ));
        holder.current_hp -= 10;
        assert!(matches!(
            end_of_turn_effect(&holder, &[Type::Poison]),
            Some(EndOfTurnEffect::Heal { .. })
        ));
    }

    #[test]
    fn leftovers_idle_at_full_hp() {
        let mut holder = test_creature("snorlax", 30, &["tackle"]);
        holder.held_item = Some(HeldItem::Leftovers);
        assert_eq!(end_of_turn_effect(&holder, &[Type::Normal]), None);
        holder.current_hp -= 1;
        assert_eq!(
            end_of_turn_effect(&holder, &[Type::Normal]),
            Some(EndOfTurnEffect::Heal {
                amount: holder.stats.hp / 16,
                item: HeldItem::Leftovers,
            })
        );
    }

    #[test]
    fn consumed_items_do_nothing() {
        let mut holder = test_creature("rattata", 30, &["tackle"]);
        holder.held_item = Some(HeldItem::LifeOrb);
        assert!(life_orb_recoil(&holder, 10).is_some());
        holder.item_consumed = true;
        assert_eq!(life_orb_recoil(&holder, 10), None);
    }
}
