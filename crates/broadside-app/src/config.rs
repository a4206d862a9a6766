//! Runner configuration, read from the environment.
//!
//! | Variable | Default |
//! |---|---|
//! | `BROADSIDE_SEED` | 42 |
//! | `BROADSIDE_FRAME_RATE` | 60 (frames per wall second) |
//! | `BROADSIDE_GAME_SPEED` | `play` (`paused`, `slow`, `play`, `fast`) |
//! | `BROADSIDE_SCENARIO` | `duel` (`duel`, `fleet`) |
//! | `BROADSIDE_DURATION_SECS` | unset: run until shutdown |
//! | `LOG_FORMAT` | text; `json` for structured output |

use std::env;
use std::time::Duration;

use thiserror::Error;

use broadside_core::enums::{GameSpeed, ScenarioId};
use broadside_sim::SimConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var}: cannot parse {value:?}")]
    Invalid { var: &'static str, value: String },
    #[error("BROADSIDE_FRAME_RATE must be at least 1")]
    ZeroFrameRate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunnerConfig {
    pub seed: u64,
    pub frame_rate: u32,
    pub game_speed: GameSpeed,
    pub scenario: ScenarioId,
    /// Wall-clock run time; `None` runs until shut down.
    pub duration: Option<Duration>,
    pub log_json: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            frame_rate: 60,
            game_speed: GameSpeed::Play,
            scenario: ScenarioId::Duel,
            duration: None,
            log_json: false,
        }
    }
}

impl RunnerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build from any variable source. Unset variables take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let seed = parsed(&lookup, "BROADSIDE_SEED", |v| v.parse().ok())?.unwrap_or(defaults.seed);
        let frame_rate = parsed(&lookup, "BROADSIDE_FRAME_RATE", |v| v.parse::<u32>().ok())?
            .unwrap_or(defaults.frame_rate);
        if frame_rate == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        let game_speed =
            parsed(&lookup, "BROADSIDE_GAME_SPEED", parse_game_speed)?.unwrap_or(defaults.game_speed);
        let scenario =
            parsed(&lookup, "BROADSIDE_SCENARIO", parse_scenario)?.unwrap_or(defaults.scenario);
        let duration = parsed(&lookup, "BROADSIDE_DURATION_SECS", |v| {
            v.parse::<f64>()
                .ok()
                .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        })?;
        let log_json = matches!(lookup("LOG_FORMAT").as_deref(), Some("json"));

        Ok(Self {
            seed,
            frame_rate,
            game_speed,
            scenario,
            duration,
            log_json,
        })
    }

    /// Wall time between frames.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.frame_rate.max(1)))
    }

    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            seed: self.seed,
            game_speed: self.game_speed,
            scenario: self.scenario,
        }
    }
}

fn parsed<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(value) => match parse(value.trim()) {
            Some(parsed) => Ok(Some(parsed)),
            None => Err(ConfigError::Invalid { var, value }),
        },
    }
}

fn parse_game_speed(value: &str) -> Option<GameSpeed> {
    match value.to_ascii_lowercase().as_str() {
        "paused" => Some(GameSpeed::Paused),
        "slow" => Some(GameSpeed::Slow),
        "play" => Some(GameSpeed::Play),
        "fast" => Some(GameSpeed::Fast),
        _ => None,
    }
}

fn parse_scenario(value: &str) -> Option<ScenarioId> {
    match value.to_ascii_lowercase().as_str() {
        "duel" => Some(ScenarioId::Duel),
        "fleet" | "fleet_action" => Some(ScenarioId::FleetAction),
        _ => None,
    }
}
