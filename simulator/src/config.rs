use std::{str::FromStr, time::Duration};

use lifedice_types::dice::{
    RoundRules, BET, LIFE_HEIGHT, LIFE_WIDTH, ROLL_DURATION_MS, ROLL_TICK_MS, STARTING_BALANCE,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::Level;

/// Configuration for both demos, loaded from YAML.
///
/// Every field has a default, so an empty file (or no file) is valid.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_starting_balance")]
    pub starting_balance: u64,
    #[serde(default = "default_bet")]
    pub bet: u64,
    #[serde(default = "default_roll_tick_ms")]
    pub roll_tick_ms: u64,
    #[serde(default = "default_roll_duration_ms")]
    pub roll_duration_ms: u64,
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_life_width")]
    pub life_width: u32,
    #[serde(default = "default_life_height")]
    pub life_height: u32,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Smallest Life grid side on which the toroidal neighbourhood holds eight
/// distinct cells.
pub const MIN_GRID_SIDE: u32 = 3;

/// Largest Life grid side accepted from configuration.
pub const MAX_GRID_SIDE: u32 = 256;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be > 0 (got {value})")]
    InvalidNonZero { field: &'static str, value: u64 },
    #[error("roll_tick_ms ({tick_ms}) must be shorter than roll_duration_ms ({duration_ms})")]
    TickNotShorter { tick_ms: u64, duration_ms: u64 },
    #[error("{field} must be within {min}..={max} (got {value})")]
    InvalidGridSide {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
    #[error("invalid log level: {value}")]
    InvalidLogLevel { value: String },
}

#[derive(Clone, Debug)]
pub struct ValidatedConfig {
    pub starting_balance: u64,
    pub rules: RoundRules,
    pub frame: Duration,
    pub seed: Option<u64>,
    pub life_width: u32,
    pub life_height: u32,
    pub log_level: Level,
}

fn default_starting_balance() -> u64 {
    STARTING_BALANCE
}

fn default_bet() -> u64 {
    BET
}

fn default_roll_tick_ms() -> u64 {
    ROLL_TICK_MS
}

fn default_roll_duration_ms() -> u64 {
    ROLL_DURATION_MS
}

fn default_frame_ms() -> u64 {
    50
}

fn default_life_width() -> u32 {
    LIFE_WIDTH
}

fn default_life_height() -> u32 {
    LIFE_HEIGHT
}

fn default_log_level() -> String {
    "info".to_string()
}

fn non_zero(field: &'static str, value: u64) -> Result<u64, ConfigError> {
    if value == 0 {
        return Err(ConfigError::InvalidNonZero { field, value });
    }
    Ok(value)
}

fn grid_side(field: &'static str, value: u32) -> Result<u32, ConfigError> {
    if !(MIN_GRID_SIDE..=MAX_GRID_SIDE).contains(&value) {
        return Err(ConfigError::InvalidGridSide {
            field,
            value,
            min: MIN_GRID_SIDE,
            max: MAX_GRID_SIDE,
        });
    }
    Ok(value)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            starting_balance: default_starting_balance(),
            bet: default_bet(),
            roll_tick_ms: default_roll_tick_ms(),
            roll_duration_ms: default_roll_duration_ms(),
            frame_ms: default_frame_ms(),
            seed: None,
            life_width: default_life_width(),
            life_height: default_life_height(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        let bet = non_zero("bet", self.bet)?;
        let tick_ms = non_zero("roll_tick_ms", self.roll_tick_ms)?;
        let duration_ms = non_zero("roll_duration_ms", self.roll_duration_ms)?;
        if tick_ms >= duration_ms {
            return Err(ConfigError::TickNotShorter {
                tick_ms,
                duration_ms,
            });
        }
        let frame_ms = non_zero("frame_ms", self.frame_ms)?;
        let life_width = grid_side("life_width", self.life_width)?;
        let life_height = grid_side("life_height", self.life_height)?;

        let log_level =
            Level::from_str(&self.log_level).map_err(|_| ConfigError::InvalidLogLevel {
                value: self.log_level.clone(),
            })?;

        Ok(ValidatedConfig {
            starting_balance: self.starting_balance,
            rules: RoundRules {
                bet,
                roll_tick: Duration::from_millis(tick_ms),
                roll_duration: Duration::from_millis(duration_ms),
            },
            frame: Duration::from_millis(frame_ms),
            seed: self.seed,
            life_width,
            life_height,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, Config::default());

        let validated = config.validate().unwrap();
        assert_eq!(validated.starting_balance, 100);
        assert_eq!(validated.rules, RoundRules::default());
        assert_eq!(validated.frame, Duration::from_millis(50));
        assert_eq!(validated.seed, None);
        assert_eq!((validated.life_width, validated.life_height), (6, 6));
        assert_eq!(validated.log_level, Level::INFO);
    }

    #[test]
    fn test_partial_file() {
        let yaml = "bet: 25\nseed: 7\nlog_level: debug\nlife_width: 12\n";
        let validated = serde_yaml::from_str::<Config>(yaml)
            .unwrap()
            .validate()
            .unwrap();
        assert_eq!(validated.rules.bet, 25);
        assert_eq!(validated.seed, Some(7));
        assert_eq!(validated.log_level, Level::DEBUG);
        assert_eq!(validated.life_width, 12);
        assert_eq!(validated.life_height, 6);
    }

    #[test]
    fn test_zero_bet_rejected() {
        let config = Config {
            bet: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidNonZero { field: "bet", .. })
        ));
    }

    #[test]
    fn test_tick_must_be_shorter_than_roll() {
        let config = Config {
            roll_tick_ms: 1_000,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TickNotShorter {
                tick_ms: 1_000,
                duration_ms: 1_000
            })
        ));
    }

    #[test]
    fn test_grid_side_bounds() {
        for (width, height, field, value) in [
            (6, 0, "life_height", 0),
            (2, 6, "life_width", 2),
            (6, 1, "life_height", 1),
            (257, 6, "life_width", 257),
        ] {
            let config = Config {
                life_width: width,
                life_height: height,
                ..Config::default()
            };
            match config.validate() {
                Err(ConfigError::InvalidGridSide {
                    field: got_field,
                    value: got_value,
                    ..
                }) => assert_eq!((got_field, got_value), (field, value)),
                other => panic!("expected grid side error, got {other:?}"),
            }
        }

        let config = Config {
            life_width: MIN_GRID_SIDE,
            life_height: MAX_GRID_SIDE,
            ..Config::default()
        };
        let validated = config.validate().unwrap();
        assert_eq!((validated.life_width, validated.life_height), (3, 256));
    }

    #[test]
    fn test_bad_log_level() {
        let config = Config {
            log_level: "chatty".to_string(),
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "invalid log level: chatty");
    }
}
