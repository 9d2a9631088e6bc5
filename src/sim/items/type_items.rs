use crate::data::types::Type;
use crate::sim::items::HeldItem;

pub const TYPE_ITEM_BOOST: f64 = 1.2;

pub fn boosted_type(item: HeldItem) -> Option<Type> {
    match item {
        HeldItem::Charcoal => Some(Type::Fire),
        HeldItem::MysticWater => Some(Type::Water),
        HeldItem::MiracleSeed => Some(Type::Grass),
        HeldItem::Magnet => Some(Type::Electric),
        HeldItem::NeverMeltIce => Some(Type::Ice),
        HeldItem::BlackBelt => Some(Type::Fighting),
        HeldItem::PoisonBarb => Some(Type::Poison),
        HeldItem::SoftSand => Some(Type::Ground),
        HeldItem::SharpBeak => Some(Type::Flying),
        HeldItem::TwistedSpoon => Some(Type::Psychic),
        HeldItem::SilverPowder => Some(Type::Bug),
        HeldItem::HardStone => Some(Type::Rock),
        HeldItem::SpellTag => Some(Type::Ghost),
        HeldItem::DragonFang => Some(Type::Dragon),
        HeldItem::BlackGlasses => Some(Type::Dark),
        HeldItem::MetalCoat => Some(Type::Steel),
        HeldItem::SilkScarf => Some(Type::Normal),
        HeldItem::FairyFeather => Some(Type::Fairy),
        _ => None,
    }
}

pub fn item_type_boost(item: Option<HeldItem>, move_type: Type) -> f64 {
    match item.and_then(boosted_type) {
        Some(boosted) if boosted == move_type => TYPE_ITEM_BOOST,
        _ => 1.0,
    }
}
