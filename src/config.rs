//! Game settings: an optional JSON file in the working directory, then environment overrides.

use std::{env, fs, io, str::FromStr};

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::{
    error::ConfigError,
    types::{Difficulty, Side},
};

pub const SETTINGS_FILE: &str = "chess-opponent.json";

const ENV_DIFFICULTY: &str = "CHESS_DIFFICULTY";
const ENV_COMPUTER_SIDE: &str = "CHESS_COMPUTER_SIDE";
const ENV_SEED: &str = "CHESS_SEED";
const ENV_MOVE_DELAY_MS: &str = "CHESS_MOVE_DELAY_MS";
const ENV_LOG: &str = "CHESS_LOG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    pub computer_side: Side,
    /// Fixed seed for the opponent's random choices; entropy from the OS when absent
    pub seed: Option<u64>,
    /// Pause before the computer answers
    pub move_delay_ms: u64,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            difficulty: Difficulty::Easy,
            computer_side: Side::Black,
            seed: None,
            move_delay_ms: 500,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Reads [`SETTINGS_FILE`] from the current directory if present, then applies
    /// `CHESS_*` environment variables on top.
    pub fn load() -> Result<Settings, ConfigError> {
        let path = env::current_dir()?.join(SETTINGS_FILE);
        let file = match fs::read_to_string(&path) {
            Ok(text) => Some(text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };
        Settings::from_sources(file.as_deref(), |key| env::var(key).ok())
    }

    pub fn from_sources(
        json: Option<&str>,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Settings, ConfigError> {
        let mut settings = match json {
            Some(text) => serde_json::from_str(text)?,
            None => Settings::default(),
        };

        if let Some(value) = var(ENV_DIFFICULTY) {
            settings.difficulty = parse_var(ENV_DIFFICULTY, &value)?;
        }
        if let Some(value) = var(ENV_COMPUTER_SIDE) {
            settings.computer_side = parse_var(ENV_COMPUTER_SIDE, &value)?;
        }
        if let Some(value) = var(ENV_SEED) {
            settings.seed = Some(parse_var(ENV_SEED, &value)?);
        }
        if let Some(value) = var(ENV_MOVE_DELAY_MS) {
            settings.move_delay_ms = parse_var(ENV_MOVE_DELAY_MS, &value)?;
        }
        if let Some(value) = var(ENV_LOG) {
            settings.log_level = value;
        }

        settings.level_filter()?;
        Ok(settings)
    }

    pub fn human_side(&self) -> Side {
        self.computer_side.opponent()
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(self.log_level.trim()).map_err(|_| ConfigError::InvalidValue {
            key: "log_level",
            value: self.log_level.clone(),
        })
    }
}

fn parse_var<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_play_easy_as_black() {
        let settings = Settings::from_sources(None, no_env).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.difficulty, Difficulty::Easy);
        assert_eq!(settings.human_side(), Side::White);
        assert_eq!(settings.level_filter().unwrap(), LevelFilter::Info);
    }

    #[test]
    fn reads_partial_json() {
        let settings =
            Settings::from_sources(Some(r#"{ "difficulty": "hard", "seed": 42 }"#), no_env).unwrap();
        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.move_delay_ms, 500);
    }

    #[test]
    fn environment_overrides_the_file() {
        let env = HashMap::from([
            (ENV_DIFFICULTY, "Medium"),
            (ENV_COMPUTER_SIDE, "white"),
            (ENV_MOVE_DELAY_MS, "0"),
            (ENV_LOG, "debug"),
        ]);
        let settings = Settings::from_sources(Some(r#"{ "difficulty": "hard" }"#), |key| {
            env.get(key).map(|v| v.to_string())
        })
        .unwrap();
        assert_eq!(settings.difficulty, Difficulty::Medium);
        assert_eq!(settings.computer_side, Side::White);
        assert_eq!(settings.move_delay_ms, 0);
        assert_eq!(settings.level_filter().unwrap(), LevelFilter::Debug);
    }

    #[test]
    fn rejects_bad_values() {
        let bad_seed = Settings::from_sources(None, |key| {
            (key == ENV_SEED).then(|| "forty-two".to_string())
        });
        assert!(matches!(
            bad_seed,
            Err(ConfigError::InvalidValue { key: ENV_SEED, .. })
        ));

        let bad_json = Settings::from_sources(Some(r#"{ "difficulty": "grandmaster" }"#), no_env);
        assert!(matches!(bad_json, Err(ConfigError::Json(_))));

        let bad_level = Settings::from_sources(Some(r#"{ "log_level": "loud" }"#), no_env);
        assert!(matches!(bad_level, Err(ConfigError::InvalidValue { key: "log_level", .. })));
    }
}
