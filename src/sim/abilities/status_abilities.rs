use crate::random::RandomSource;
use crate::sim::abilities::Ability;
use crate::sim::stats::{StageChange, StatAxis, StatStages};
use crate::sim::status::Status;

pub fn ability_blocks_status(ability: Option<Ability>, status: Status) -> bool {
    let Some(ability) = ability else {
        return false;
    };
    match status {
        Status::Poison => ability == Ability::Immunity,
        Status::Paralysis => ability == Ability::Limber,
        Status::Burn => ability == Ability::WaterVeil,
        Status::Freeze => ability == Ability::MagmaArmor,
        Status::Sleep => matches!(ability, Ability::Insomnia | Ability::VitalSpirit),
    }
}

pub fn apply_intimidate(target: &mut StatStages) -> StageChange {
    target.apply(StatAxis::Attack, -1)
}

/// Shed Skin: one third chance to drop the status at end of turn. Draws only
/// when there is a status to shed.
pub fn shed_skin_triggers(
    ability: Option<Ability>,
    status: Option<Status>,
    rng: &mut dyn RandomSource,
) -> bool {
    ability == Some(Ability::ShedSkin) && status.is_some() && rng.chance(1.0 / 3.0)
}

/// Poison Heal turns poison chip into a 1/8 heal.
pub fn poison_heals(ability: Option<Ability>, status: Option<Status>) -> bool {
    ability == Some(Ability::PoisonHeal) && status == Some(Status::Poison)
}
