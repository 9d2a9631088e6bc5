use crate::data::types::Type;
use crate::random::RandomSource;
use crate::sim::abilities::status_abilities::ability_blocks_status;
use crate::sim::abilities::Ability;
use crate::sim::creature::Creature;
use crate::sim::status::{type_blocks_status, Status};
use crate::sim::weather::Weather;

const CONTACT_STATUS_CHANCE: f64 = 0.3;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ContactEffect {
    Inflict(Status),
    Chip(u16),
}

fn can_receive(attacker: &Creature, attacker_types: &[Type], status: Status) -> bool {
    attacker.status.is_none()
        && !attacker.is_fainted()
        && !type_blocks_status(attacker_types, status)
        && !ability_blocks_status(attacker.ability, status)
}

/// Reaction of `defender_ability` to a contact move from `attacker`.
///
/// The 30% roll is drawn only when the attacker could actually receive the
/// status; Effect Spore draws a second time to pick the status.
pub fn contact_trigger(
    defender_ability: Option<Ability>,
    attacker: &Creature,
    attacker_types: &[Type],
    rng: &mut dyn RandomSource,
) -> Option<ContactEffect> {
    let inflicted = match defender_ability? {
        Ability::Static => Status::Paralysis,
        Ability::FlameBody => Status::Burn,
        Ability::PoisonPoint => Status::Poison,
        Ability::EffectSpore => {
            if attacker.status.is_some() || attacker.is_fainted() {
                return None;
            }
            if !rng.chance(CONTACT_STATUS_CHANCE) {
                return None;
            }
            let status = match rng.below(3) {
                0 => Status::Poison,
                1 => Status::Paralysis,
                _ => Status::Sleep,
            };
            return can_receive(attacker, attacker_types, status)
                .then_some(ContactEffect::Inflict(status));
        }
        Ability::RoughSkin | Ability::IronBarbs => {
            if attacker.is_fainted() {
                return None;
            }
            return Some(ContactEffect::Chip((attacker.stats.hp / 8).max(1)));
        }
        _ => return None,
    };
    if !can_receive(attacker, attacker_types, inflicted) {
        return None;
    }
    rng.chance(CONTACT_STATUS_CHANCE)
        .then_some(ContactEffect::Inflict(inflicted))
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EnterEffect {
    Intimidate,
    SetWeather(Weather),
}

pub fn on_enter_effect(ability: Option<Ability>) -> Option<EnterEffect> {
    match ability? {
        Ability::Intimidate => Some(EnterEffect::Intimidate),
        Ability::Drizzle => Some(EnterEffect::SetWeather(Weather::Rain)),
        Ability::Drought => Some(EnterEffect::SetWeather(Weather::Sun)),
        Ability::SandStream => Some(EnterEffect::SetWeather(Weather::Sandstorm)),
        Ability::SnowWarning => Some(EnterEffect::SetWeather(Weather::Hail)),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AbilityEndOfTurn {
    Heal(u16),
    RaiseSpeed,
}

pub fn end_of_turn_effect(
    creature: &Creature,
    weather: Option<Weather>,
) -> Option<AbilityEndOfTurn> {
    if creature.is_fainted() {
        return None;
    }
    let sixteenth = (creature.stats.hp / 16).max(1);
    match (creature.ability?, weather) {
        (Ability::RainDish, Some(Weather::Rain)) | (Ability::IceBody, Some(Weather::Hail)) => {
            (!creature.is_full_hp()).then_some(AbilityEndOfTurn::Heal(sixteenth))
        }
        (Ability::SpeedBoost, _) => Some(AbilityEndOfTurn::RaiseSpeed),
        _ => None,
    }
}

/// Ice Body and the sand/hail-immune abilities shrug off weather chip.
pub fn ignores_weather_chip(ability: Option<Ability>, weather: Weather) -> bool {
    matches!(
        (ability, weather),
        (Some(Ability::IceBody), Weather::Hail)
            | (Some(Ability::SlushRush), Weather::Hail)
            | (Some(Ability::SandRush), Weather::Sandstorm)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandom;
    use crate::sim::creature::test_creature;

    #[test]
    fn static_paralyzes_on_low_roll() {
        let attacker = test_creature("rattata", 20, &["tackle"]);
        let mut rng = ScriptedRandom::new([0.1]);
        assert_eq!(
            contact_trigger(Some(Ability::Static), &attacker, &[Type::Normal], &mut rng),
            Some(ContactEffect::Inflict(Status::Paralysis))
        );
        let mut rng = ScriptedRandom::new([0.3]);
        let effect = contact_trigger(Some(Ability::Static), &attacker, &[Type::Normal], &mut rng);
        assert_eq!(effect, None);
    }

    #[test]
    fn electric_attacker_is_never_rolled_for_static() {
        let attacker = test_creature("pikachu", 20, &["thundershock"]);
        let mut rng = ScriptedRandom::new([0.0]);
        let effect = contact_trigger(Some(Ability::Static), &attacker, &[Type::Electric], &mut rng);
        assert_eq!(effect, None);
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn rough_skin_chips_an_eighth() {
        let attacker = test_creature("snorlax", 50, &["tackle"]);
        let mut rng = ScriptedRandom::new([]);
        assert_eq!(
            contact_trigger(Some(Ability::RoughSkin), &attacker, &[Type::Normal], &mut rng),
            Some(ContactEffect::Chip(attacker.stats.hp / 8))
        );
    }

    #[test]
    fn weather_setters_on_enter() {
        assert_eq!(
            on_enter_effect(Some(Ability::Drizzle)),
            Some(EnterEffect::SetWeather(Weather::Rain))
        );
        assert_eq!(on_enter_effect(Some(Ability::Blaze)), None);
    }

    #[test]
    fn rain_dish_heals_only_in_rain() {
        let mut creature = test_creature("squirtle", 20, &["tackle"]);
        creature.ability = Some(Ability::RainDish);
        creature.current_hp -= 5;
        assert!(matches!(
            end_of_turn_effect(&creature, Some(Weather::Rain)),
            Some(AbilityEndOfTurn::Heal(_))
        ));
        assert_eq!(end_of_turn_effect(&creature, Some(Weather::Sun)), None);
    }
}
