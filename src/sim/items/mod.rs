//! Held items (closed set, `phf`-resolved) and the bag items usable as a turn action.

pub mod bag;
pub mod battle_items;
pub mod consumable;
pub mod type_items;

use crate::data::moves::normalize_id;
use phf::phf_map;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum HeldItem {
    Charcoal,
    MysticWater,
    MiracleSeed,
    Magnet,
    NeverMeltIce,
    BlackBelt,
    PoisonBarb,
    SoftSand,
    SharpBeak,
    TwistedSpoon,
    SilverPowder,
    HardStone,
    SpellTag,
    DragonFang,
    BlackGlasses,
    MetalCoat,
    SilkScarf,
    FairyFeather,
    LifeOrb,
    ChoiceBand,
    ChoiceSpecs,
    ChoiceScarf,
    ExpertBelt,
    Leftovers,
    BlackSludge,
    FocusSash,
    SitrusBerry,
    OranBerry,
    LumBerry,
    CheriBerry,
    ChestoBerry,
    PechaBerry,
    RawstBerry,
    AspearBerry,
}

static ITEM_IDS: phf::Map<&'static str, HeldItem> = phf_map! {
    "charcoal" => HeldItem::Charcoal,
    "mysticwater" => HeldItem::MysticWater,
    "miracleseed" => HeldItem::MiracleSeed,
    "magnet" => HeldItem::Magnet,
    "nevermeltice" => HeldItem::NeverMeltIce,
    "blackbelt" => HeldItem::BlackBelt,
    "poisonbarb" => HeldItem::PoisonBarb,
    "softsand" => HeldItem::SoftSand,
    "sharpbeak" => HeldItem::SharpBeak,
    "twistedspoon" => HeldItem::TwistedSpoon,
    "silverpowder" => HeldItem::SilverPowder,
    "hardstone" => HeldItem::HardStone,
    "spelltag" => HeldItem::SpellTag,
    "dragonfang" => HeldItem::DragonFang,
    "blackglasses" => HeldItem::BlackGlasses,
    "metalcoat" => HeldItem::MetalCoat,
    "silkscarf" => HeldItem::SilkScarf,
    "fairyfeather" => HeldItem::FairyFeather,
    "lifeorb" => HeldItem::LifeOrb,
    "choiceband" => HeldItem::ChoiceBand,
    "choicespecs" => HeldItem::ChoiceSpecs,
    "choicescarf" => HeldItem::ChoiceScarf,
    "expertbelt" => HeldItem::ExpertBelt,
    "leftovers" => HeldItem::Leftovers,
    "blacksludge" => HeldItem::BlackSludge,
    "focussash" => HeldItem::FocusSash,
    "sitrusberry" => HeldItem::SitrusBerry,
    "oranberry" => HeldItem::OranBerry,
    "lumberry" => HeldItem::LumBerry,
    "cheriberry" => HeldItem::CheriBerry,
    "chestoberry" => HeldItem::ChestoBerry,
    "pechaberry" => HeldItem::PechaBerry,
    "rawstberry" => HeldItem::RawstBerry,
    "aspearberry" => HeldItem::AspearBerry,
};

impl HeldItem {
    pub fn from_id(id: &str) -> Option<HeldItem> {
        ITEM_IDS.get(normalize_id(id).as_str()).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            HeldItem::Charcoal => "Charcoal",
            HeldItem::MysticWater => "Mystic Water",
            HeldItem::MiracleSeed => "Miracle Seed",
            HeldItem::Magnet => "Magnet",
            HeldItem::NeverMeltIce => "Never-Melt Ice",
            HeldItem::BlackBelt => "Black Belt",
            HeldItem::PoisonBarb => "Poison Barb",
            HeldItem::SoftSand => "Soft Sand",
            HeldItem::SharpBeak => "Sharp Beak",
            HeldItem::TwistedSpoon => "Twisted Spoon",
            HeldItem::SilverPowder => "Silver Powder",
            HeldItem::HardStone => "Hard Stone",
            HeldItem::SpellTag => "Spell Tag",
            HeldItem::DragonFang => "Dragon Fang",
            HeldItem::BlackGlasses => "Black Glasses",
            HeldItem::MetalCoat => "Metal Coat",
            HeldItem::SilkScarf => "Silk Scarf",
            HeldItem::FairyFeather => "Fairy Feather",
            HeldItem::LifeOrb => "Life Orb",
            HeldItem::ChoiceBand => "Choice Band",
            HeldItem::ChoiceSpecs => "Choice Specs",
            HeldItem::ChoiceScarf => "Choice Scarf",
            HeldItem::ExpertBelt => "Expert Belt",
            HeldItem::Leftovers => "Leftovers",
            HeldItem::BlackSludge => "Black Sludge",
            HeldItem::FocusSash => "Focus Sash",
            HeldItem::SitrusBerry => "Sitrus Berry",
            HeldItem::OranBerry => "Oran Berry",
            HeldItem::LumBerry => "Lum Berry",
            HeldItem::CheriBerry => "Cheri Berry",
            HeldItem::ChestoBerry => "Chesto Berry",
            HeldItem::PechaBerry => "Pecha Berry",
            HeldItem::RawstBerry => "Rawst Berry",
            HeldItem::AspearBerry => "Aspear Berry",
        }
    }

    pub fn is_berry(self) -> bool {
        matches!(
            self,
            HeldItem::SitrusBerry
                | HeldItem::OranBerry
                | HeldItem::LumBerry
                | HeldItem::CheriBerry
                | HeldItem::ChestoBerry
                | HeldItem::PechaBerry
                | HeldItem::RawstBerry
                | HeldItem::AspearBerry
        )
    }
}
