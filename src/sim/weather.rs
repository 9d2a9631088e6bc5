use crate::data::types::Type;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    Sun,
    Rain,
    Sandstorm,
    Hail,
}

impl Weather {
    pub fn start_message(self) -> &'static str {
        match self {
            Weather::Sun => "The sunlight turned harsh!",
            Weather::Rain => "It started to rain!",
            Weather::Sandstorm => "A sandstorm kicked up!",
            Weather::Hail => "It started to hail!",
        }
    }

    pub fn end_message(self) -> &'static str {
        match self {
            Weather::Sun => "The harsh sunlight faded.",
            Weather::Rain => "The rain stopped.",
            Weather::Sandstorm => "The sandstorm subsided.",
            Weather::Hail => "The hail stopped.",
        }
    }
}

/// Turns a weather set by an ability lasts.
pub const ABILITY_WEATHER_TURNS: u8 = 5;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct WeatherState {
    pub condition: Option<Weather>,
    /// Zero with a condition set means the weather never expires.
    pub turns_remaining: u8,
}

impl WeatherState {
    pub fn new(condition: Weather, turns: u8) -> Self {
        Self {
            condition: Some(condition),
            turns_remaining: turns,
        }
    }

    pub fn is(&self, weather: Weather) -> bool {
        self.condition == Some(weather)
    }

    pub fn set(&mut self, condition: Weather, turns: u8) {
        self.condition = Some(condition);
        self.turns_remaining = turns;
    }

    /// Counts one turn down; returns the expiry narration when the weather ends.
    pub fn tick(&mut self) -> Option<&'static str> {
        let condition = self.condition?;
        if self.turns_remaining == 0 {
            return None;
        }
        self.turns_remaining -= 1;
        if self.turns_remaining == 0 {
            self.condition = None;
            return Some(condition.end_message());
        }
        None
    }
}

pub fn weather_damage_modifier(weather: Option<Weather>, move_type: Type) -> f64 {
    match weather {
        Some(Weather::Sun) => match move_type {
            Type::Fire => 1.5,
            Type::Water => 0.5,
            _ => 1.0,
        },
        Some(Weather::Rain) => match move_type {
            Type::Water => 1.5,
            Type::Fire => 0.5,
            _ => 1.0,
        },
        _ => 1.0,
    }
}

/// Sand and hail chip 1/16 max HP (at least 1) unless the creature's types
/// shrug it off.
pub fn weather_residual_damage(
    types: &[Type],
    max_hp: u16,
    weather: Option<Weather>,
) -> Option<u16> {
    let immune = match weather? {
        Weather::Sandstorm => types
            .iter()
            .any(|ty| matches!(ty, Type::Rock | Type::Ground | Type::Steel)),
        Weather::Hail => types.contains(&Type::Ice),
        Weather::Sun | Weather::Rain => true,
    };
    if immune {
        return None;
    }
    Some((max_hp / 16).max(1))
}

pub fn residual_message(name: &str, weather: Weather) -> String {
    match weather {
        Weather::Hail => format!("{name} is pelted by hail!"),
        _ => format!("{name} is buffeted by the sandstorm!"),
    }
}
