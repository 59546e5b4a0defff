//! Configuration and tick source for the Eternum prediction engine.
//!
//! The engine itself never reads files or clocks. This crate supplies the
//! two things it needs from outside: the season's balance tunables, loaded
//! from YAML, and the current default and armies ticks, derived from chain
//! time.
//!
//! # Modules
//!
//! - [`clock`] -- Conversion between chain timestamps and tick counters.
//! - [`config`] -- Configuration loading from `eternum-config.yaml` into
//!   strongly-typed structs, with validation.

pub mod clock;
pub mod config;

pub use clock::{ClockError, CurrentTicks, TickClock, TickKind};
pub use config::{ConfigError, GameConfig, LoggingConfig};
