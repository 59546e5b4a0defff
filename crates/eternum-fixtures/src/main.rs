//! Fixture replay binary for the Eternum prediction engine.
//!
//! Reads contract-derived fixture cases, runs each through the engine under
//! the configured balance data, and reports every case where the engine
//! disagrees with the contract. Exits non-zero on any divergence so it can
//! gate releases.
//!
//! # Usage
//!
//! ```text
//! eternum-fixtures [FIXTURE_FILE]
//! ```
//!
//! The fixture file defaults to the bundled `fixtures/cases.json`, wherever
//! the binary is started from. Configuration is read
//! from `ETERNUM_CONFIG` or `eternum-config.yaml`, falling back to defaults.

mod cases;
mod error;

use std::path::{Path, PathBuf};

use eternum_core::{GameConfig, LoggingConfig, TickClock};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::cases::{FixtureFile, Outcome};
use crate::error::FixtureError;

/// Fixture file used when none is given on the command line, relative to
/// this crate.
const DEFAULT_FIXTURES: &str = "fixtures/cases.json";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration or fixtures cannot be loaded, the
/// engine overflows, or any case diverges.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, config_path) = load_config()?;
    init_tracing(&config.logging);

    match &config_path {
        Some(path) => info!(path = %path.display(), "Configuration loaded"),
        None => info!("Config file not found, using defaults"),
    }

    let clock = TickClock::new(&config.engine.tick)?;
    let ticks = clock.now()?;
    info!(
        default_tick = ticks.default,
        armies_tick = ticks.armies,
        "Tick clock initialized"
    );

    let fixtures_path = std::env::args_os()
        .nth(1)
        .map_or_else(default_fixtures_path, PathBuf::from);
    let fixtures = load_fixtures(&fixtures_path)?;
    info!(
        path = %fixtures_path.display(),
        cases = fixtures.cases.len(),
        "Fixtures loaded"
    );

    run(&fixtures, &config)?;
    Ok(())
}

/// Bundled fixture file, independent of the working directory.
fn default_fixtures_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_FIXTURES)
}

/// Initialize structured logging.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.as_str()));
    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

/// Load configuration from `ETERNUM_CONFIG` or `eternum-config.yaml`.
///
/// Returns the path it was read from, or `None` when defaults were used.
fn load_config() -> Result<(GameConfig, Option<PathBuf>), FixtureError> {
    let config_path = GameConfig::path_from_env();
    if config_path.exists() {
        let config = GameConfig::from_file(&config_path)?;
        Ok((config, Some(config_path)))
    } else {
        Ok((GameConfig::default(), None))
    }
}

fn load_fixtures(path: &Path) -> Result<FixtureFile, FixtureError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Evaluate every case, logging each divergence.
fn run(fixtures: &FixtureFile, config: &GameConfig) -> Result<(), FixtureError> {
    let mut failed: usize = 0;

    for case in &fixtures.cases {
        let outcome = case
            .check
            .evaluate(&config.engine)
            .map_err(|source| FixtureError::Engine {
                case: case.name.clone(),
                source,
            })?;
        match outcome {
            Outcome::Pass => {
                info!(case = %case.name, kind = case.check.kind(), "pass");
            }
            Outcome::Mismatch { expected, actual } => {
                failed = failed.saturating_add(1);
                warn!(
                    case = %case.name,
                    kind = case.check.kind(),
                    %expected,
                    %actual,
                    "engine diverges from contract"
                );
            }
        }
    }

    let total = fixtures.cases.len();
    info!(total, failed, "Fixture run complete");
    if failed > 0 {
        return Err(FixtureError::Diverged { failed, total });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_fixtures_resolve_outside_crate_dir() {
        let path = default_fixtures_path();
        assert!(path.is_absolute());
        assert!(path.is_file(), "{}", path.display());
        assert!(load_fixtures(&path).is_ok_and(|file| !file.cases.is_empty()));
    }
}
