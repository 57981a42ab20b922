//! Application settings read from the environment.
//!
//! | variable | default |
//! | --- | --- |
//! | `CARDS_STORAGE_PATH` | platform config dir, `storage.json` |
//! | `CARDS_ENERGY_TICK_SECS` | `30` |
//! | `CARDS_PLAYERS` | `Player 1,Player 2` |
//! | `CARDS_MOOD` | `All Questions` |
//! | `CARDS_INTENSITY` | `5` |
//!
//! Invalid values are logged and replaced by their default.

use std::path::PathBuf;
use std::time::Duration;

use connection_cards_domain::{SessionConfig, SessionMood, DEFAULT_INTENSITY};

use crate::infrastructure::storage::FileStorage;
use crate::use_cases::DEFAULT_ENERGY_TICK;

pub const ENV_STORAGE_PATH: &str = "CARDS_STORAGE_PATH";
pub const ENV_ENERGY_TICK_SECS: &str = "CARDS_ENERGY_TICK_SECS";
pub const ENV_PLAYERS: &str = "CARDS_PLAYERS";
pub const ENV_MOOD: &str = "CARDS_MOOD";
pub const ENV_INTENSITY: &str = "CARDS_INTENSITY";

const DEFAULT_PLAYERS: [&str; 2] = ["Player 1", "Player 2"];

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub storage_path: PathBuf,
    pub energy_tick: Duration,
    pub player_names: Vec<String>,
    pub session: SessionConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_path: FileStorage::default_path(),
            energy_tick: DEFAULT_ENERGY_TICK,
            player_names: DEFAULT_PLAYERS.iter().map(|s| s.to_string()).collect(),
            session: SessionConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let storage_path = get(ENV_STORAGE_PATH)
            .map(PathBuf::from)
            .unwrap_or(defaults.storage_path);

        let energy_tick = match get(ENV_ENERGY_TICK_SECS).map(|v| v.parse::<u64>()) {
            Some(Ok(secs)) if secs > 0 => Duration::from_secs(secs),
            Some(_) => {
                tracing::warn!(
                    variable = ENV_ENERGY_TICK_SECS,
                    "Invalid energy tick, using default"
                );
                defaults.energy_tick
            }
            None => defaults.energy_tick,
        };

        let player_names = match get(ENV_PLAYERS) {
            Some(raw) => {
                let names: Vec<String> = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect();
                if names.is_empty() {
                    tracing::warn!(variable = ENV_PLAYERS, "No player names given, using default");
                    defaults.player_names
                } else {
                    names
                }
            }
            None => defaults.player_names,
        };

        let mood = match get(ENV_MOOD).map(|v| v.parse::<SessionMood>()) {
            Some(Ok(mood)) => mood,
            Some(Err(e)) => {
                tracing::warn!(variable = ENV_MOOD, error = %e, "Invalid mood, using default");
                SessionMood::default()
            }
            None => SessionMood::default(),
        };

        let intensity = match get(ENV_INTENSITY).map(|v| v.parse::<u8>()) {
            Some(Ok(value)) => value,
            Some(Err(e)) => {
                tracing::warn!(variable = ENV_INTENSITY, error = %e, "Invalid intensity, using default");
                DEFAULT_INTENSITY
            }
            None => DEFAULT_INTENSITY,
        };

        Self {
            storage_path,
            energy_tick,
            player_names,
            session: SessionConfig::new(mood, intensity),
        }
    }
}
