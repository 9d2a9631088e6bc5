//! Closed ability set, resolved once from string ids.
//!
//! Effects are grouped by when they fire: damage modifiers, status immunity
//! and on-enter/end-of-turn triggers live in the submodules; type immunity and
//! speed are small enough to sit here.

pub mod damage_modifiers;
pub mod misc_abilities;
pub mod status_abilities;

use crate::data::moves::normalize_id;
use crate::data::types::Type;
use crate::sim::weather::Weather;
use phf::phf_map;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Ability {
    Blaze,
    Torrent,
    Overgrow,
    Swarm,
    Adaptability,
    HugePower,
    PurePower,
    Technician,
    Guts,
    Sniper,
    ThickFat,
    FurCoat,
    Fluffy,
    Multiscale,
    Filter,
    SolidRock,
    Levitate,
    VoltAbsorb,
    WaterAbsorb,
    FlashFire,
    Static,
    FlameBody,
    PoisonPoint,
    EffectSpore,
    RoughSkin,
    IronBarbs,
    Intimidate,
    Drizzle,
    Drought,
    SandStream,
    SnowWarning,
    SpeedBoost,
    RainDish,
    IceBody,
    ShedSkin,
    PoisonHeal,
    Immunity,
    Limber,
    Insomnia,
    VitalSpirit,
    WaterVeil,
    MagmaArmor,
    SwiftSwim,
    Chlorophyll,
    SandRush,
    SlushRush,
    Sturdy,
}

static ABILITY_IDS: phf::Map<&'static str, Ability> = phf_map! {
    "blaze" => Ability::Blaze,
    "torrent" => Ability::Torrent,
    "overgrow" => Ability::Overgrow,
    "swarm" => Ability::Swarm,
    "adaptability" => Ability::Adaptability,
    "hugepower" => Ability::HugePower,
    "purepower" => Ability::PurePower,
    "technician" => Ability::Technician,
    "guts" => Ability::Guts,
    "sniper" => Ability::Sniper,
    "thickfat" => Ability::ThickFat,
    "furcoat" => Ability::FurCoat,
    "fluffy" => Ability::Fluffy,
    "multiscale" => Ability::Multiscale,
    "filter" => Ability::Filter,
    "solidrock" => Ability::SolidRock,
    "levitate" => Ability::Levitate,
    "voltabsorb" => Ability::VoltAbsorb,
    "waterabsorb" => Ability::WaterAbsorb,
    "flashfire" => Ability::FlashFire,
    "static" => Ability::Static,
    "flamebody" => Ability::FlameBody,
    "poisonpoint" => Ability::PoisonPoint,
    "effectspore" => Ability::EffectSpore,
    "roughskin" => Ability::RoughSkin,
    "ironbarbs" => Ability::IronBarbs,
    "intimidate" => Ability::Intimidate,
    "drizzle" => Ability::Drizzle,
    "drought" => Ability::Drought,
    "sandstream" => Ability::SandStream,
    "snowwarning" => Ability::SnowWarning,
    "speedboost" => Ability::SpeedBoost,
    "raindish" => Ability::RainDish,
    "icebody" => Ability::IceBody,
    "shedskin" => Ability::ShedSkin,
    "poisonheal" => Ability::PoisonHeal,
    "immunity" => Ability::Immunity,
    "limber" => Ability::Limber,
    "insomnia" => Ability::Insomnia,
    "vitalspirit" => Ability::VitalSpirit,
    "waterveil" => Ability::WaterVeil,
    "magmaarmor" => Ability::MagmaArmor,
    "swiftswim" => Ability::SwiftSwim,
    "chlorophyll" => Ability::Chlorophyll,
    "sandrush" => Ability::SandRush,
    "slushrush" => Ability::SlushRush,
    "sturdy" => Ability::Sturdy,
};

impl Ability {
    /// Accepts display names ("Huge Power") as well as ids ("hugepower").
    pub fn from_id(id: &str) -> Option<Ability> {
        ABILITY_IDS.get(normalize_id(id).as_str()).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Ability::Blaze => "Blaze",
            Ability::Torrent => "Torrent",
            Ability::Overgrow => "Overgrow",
            Ability::Swarm => "Swarm",
            Ability::Adaptability => "Adaptability",
            Ability::HugePower => "Huge Power",
            Ability::PurePower => "Pure Power",
            Ability::Technician => "Technician",
            Ability::Guts => "Guts",
            Ability::Sniper => "Sniper",
            Ability::ThickFat => "Thick Fat",
            Ability::FurCoat => "Fur Coat",
            Ability::Fluffy => "Fluffy",
            Ability::Multiscale => "Multiscale",
            Ability::Filter => "Filter",
            Ability::SolidRock => "Solid Rock",
            Ability::Levitate => "Levitate",
            Ability::VoltAbsorb => "Volt Absorb",
            Ability::WaterAbsorb => "Water Absorb",
            Ability::FlashFire => "Flash Fire",
            Ability::Static => "Static",
            Ability::FlameBody => "Flame Body",
            Ability::PoisonPoint => "Poison Point",
            Ability::EffectSpore => "Effect Spore",
            Ability::RoughSkin => "Rough Skin",
            Ability::IronBarbs => "Iron Barbs",
            Ability::Intimidate => "Intimidate",
            Ability::Drizzle => "Drizzle",
            Ability::Drought => "Drought",
            Ability::SandStream => "Sand Stream",
            Ability::SnowWarning => "Snow Warning",
            Ability::SpeedBoost => "Speed Boost",
            Ability::RainDish => "Rain Dish",
            Ability::IceBody => "Ice Body",
            Ability::ShedSkin => "Shed Skin",
            Ability::PoisonHeal => "Poison Heal",
            Ability::Immunity => "Immunity",
            Ability::Limber => "Limber",
            Ability::Insomnia => "Insomnia",
            Ability::VitalSpirit => "Vital Spirit",
            Ability::WaterVeil => "Water Veil",
            Ability::MagmaArmor => "Magma Armor",
            Ability::SwiftSwim => "Swift Swim",
            Ability::Chlorophyll => "Chlorophyll",
            Ability::SandRush => "Sand Rush",
            Ability::SlushRush => "Slush Rush",
            Ability::Sturdy => "Sturdy",
        }
    }
}

/// How a defender's ability swallows an incoming move of a given type.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TypeAbsorb {
    /// No damage, nothing else happens.
    Immune,
    /// No damage; the defender heals 1/4 of its max HP.
    Heal,
}

pub fn type_absorption(ability: Option<Ability>, move_type: Type) -> Option<TypeAbsorb> {
    match (ability?, move_type) {
        (Ability::Levitate, Type::Ground) => Some(TypeAbsorb::Immune),
        (Ability::FlashFire, Type::Fire) => Some(TypeAbsorb::Immune),
        (Ability::VoltAbsorb, Type::Electric) => Some(TypeAbsorb::Heal),
        (Ability::WaterAbsorb, Type::Water) => Some(TypeAbsorb::Heal),
        _ => None,
    }
}

pub fn speed_multiplier(ability: Option<Ability>, weather: Option<Weather>) -> f64 {
    match (ability, weather) {
        (Some(Ability::SwiftSwim), Some(Weather::Rain))
        | (Some(Ability::Chlorophyll), Some(Weather::Sun))
        | (Some(Ability::SandRush), Some(Weather::Sandstorm))
        | (Some(Ability::SlushRush), Some(Weather::Hail)) => 2.0,
        _ => 1.0,
    }
}

pub fn survives_at_full_hp(ability: Option<Ability>) -> bool {
    ability == Some(Ability::Sturdy)
}
