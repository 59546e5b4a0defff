//! Configuration loading for the prediction engine.
//!
//! The canonical configuration lives in `eternum-config.yaml` at the project
//! root and mirrors the season's world config. Every section is optional;
//! anything missing falls back to the engine defaults. The path can be
//! overridden with the `ETERNUM_CONFIG` environment variable.

use std::path::{Path, PathBuf};

use eternum_engine::EngineConfig;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "ETERNUM_CONFIG";

/// Configuration file used when [`CONFIG_ENV_VAR`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "eternum-config.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The file parsed but describes an impossible world.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// What is wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GameConfig {
    /// Balance tunables passed to the engine.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Logging configuration for the binaries.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GameConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if the values fail validation.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::parse(&contents)?;
        debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if the values fail validation.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Path of the configuration file: `ETERNUM_CONFIG` if set, otherwise
    /// [`DEFAULT_CONFIG_PATH`].
    pub fn path_from_env() -> PathBuf {
        std::env::var_os(CONFIG_ENV_VAR)
            .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
    }

    /// Reject values no season could ship with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let engine = &self.engine;

        if engine.precision.resource_precision == 0 {
            return Err(invalid("precision.resource_precision must be positive"));
        }
        if engine.tick.default_tick_seconds == 0 || engine.tick.armies_tick_seconds == 0 {
            return Err(invalid("tick lengths must be at least one second"));
        }

        let bank = &engine.bank;
        check_fee("bank.lp_fee", bank.lp_fee_numerator, bank.lp_fee_denominator)?;
        check_fee(
            "bank.owner_fee",
            bank.owner_fee_numerator,
            bank.owner_fee_denominator,
        )?;

        let combat = &engine.combat;
        if combat.biome_bonus_denominator == 0 {
            return Err(invalid("combat.biome_bonus_denominator must be positive"));
        }
        if combat.defender_penalty < Decimal::ZERO || combat.defender_penalty > Decimal::ONE {
            return Err(invalid("combat.defender_penalty must lie in [0, 1]"));
        }

        let stamina = &engine.stamina;
        if stamina.knight_max == 0 || stamina.paladin_max == 0 || stamina.crossbowman_max == 0 {
            return Err(invalid("stamina ceilings must be positive"));
        }
        if stamina.min_travel_cost == 0 {
            return Err(invalid("stamina.min_travel_cost must be positive"));
        }

        Ok(())
    }
}

fn invalid(reason: &str) -> ConfigError {
    ConfigError::Invalid {
        reason: reason.to_owned(),
    }
}

fn check_fee(name: &str, numerator: u128, denominator: u128) -> Result<(), ConfigError> {
    if denominator == 0 {
        return Err(ConfigError::Invalid {
            reason: format!("{name}_denominator must be positive"),
        });
    }
    if numerator > denominator {
        return Err(ConfigError::Invalid {
            reason: format!("{name} exceeds 100% ({numerator}/{denominator})"),
        });
    }
    Ok(())
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error), used when `RUST_LOG` is
    /// unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.engine.precision.resource_precision, 1_000_000_000);
        assert_eq!(config.engine.tick.armies_tick_seconds, 3600);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r"
engine:
  precision:
    resource_precision: 1000
  tick:
    default_tick_seconds: 1
    armies_tick_seconds: 60
  troops:
    knight_strength: 2
  stamina:
    gain_per_tick: 10
    knight_max: 100
  combat:
    defender_penalty: 0.5
  bank:
    lp_fee_numerator: 3
    lp_fee_denominator: 1000
logging:
  level: debug
  json: true
";
        let config = GameConfig::parse(yaml);
        assert!(config.is_ok(), "{config:?}");
        let config = config.unwrap_or_default();

        assert_eq!(config.engine.precision.resource_precision, 1000);
        assert_eq!(config.engine.tick.armies_tick_seconds, 60);
        assert_eq!(config.engine.troops.knight_strength, 2);
        assert_eq!(config.engine.troops.paladin_strength, 1);
        assert_eq!(config.engine.stamina.gain_per_tick, 10);
        assert_eq!(config.engine.stamina.paladin_max, 140);
        assert_eq!(config.engine.combat.defender_penalty, Decimal::new(5, 1));
        assert_eq!(config.engine.bank.lp_fee_numerator, 3);
        assert_eq!(config.engine.bank.owner_fee_numerator, 15);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = GameConfig::parse("logging:\n  json: true\n");
        assert!(config.is_ok());
        let config = config.unwrap_or_default();
        assert!(config.logging.json);
        assert_eq!(config.engine, EngineConfig::default());
    }

    #[test]
    fn parse_empty_yaml() {
        assert!(GameConfig::parse("").is_ok());
    }

    #[test]
    fn rejects_fee_above_one() {
        let yaml = "engine:\n  bank:\n    owner_fee_numerator: 101\n";
        assert!(matches!(
            GameConfig::parse(yaml),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn rejects_zero_denominator() {
        let yaml = "engine:\n  bank:\n    lp_fee_numerator: 0\n    lp_fee_denominator: 0\n";
        assert!(matches!(
            GameConfig::parse(yaml),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn rejects_zero_precision_and_tick() {
        let mut config = GameConfig::default();
        config.engine.precision.resource_precision = 0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.engine.tick.armies_tick_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_penalty_out_of_range() {
        let mut config = GameConfig::default();
        config.engine.combat.defender_penalty = Decimal::new(15, 1);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn malformed_yaml_is_a_yaml_error() {
        assert!(matches!(
            GameConfig::parse("engine: [unclosed"),
            Err(ConfigError::Yaml { .. })
        ));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join(DEFAULT_CONFIG_PATH);
        if path.exists() {
            let config = GameConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
