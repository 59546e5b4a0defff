//! Chain time to tick conversion.
//!
//! The contracts count time in two tick streams derived from the block
//! timestamp: the default tick drives resource production and the armies
//! tick drives stamina and battle cooldowns. A tick number is
//! `timestamp / tick_seconds`, so both are pure functions of chain time.
//!
//! All conversions use checked arithmetic; a timestamp before the unix
//! epoch or past what `chrono` can represent is an error, never a wrap.

use chrono::{DateTime, Utc};
use eternum_engine::{DepletionEstimate, TickConfig};
use serde::Serialize;

/// Errors that can occur during clock operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    /// Invalid tick configuration (e.g. zero-second ticks).
    #[error("invalid tick configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },

    /// The timestamp precedes the unix epoch.
    #[error("timestamp {timestamp} precedes the unix epoch")]
    BeforeEpoch {
        /// The offending unix timestamp.
        timestamp: i64,
    },

    /// The tick lies beyond the representable time range.
    #[error("tick {tick} is out of the representable time range")]
    OutOfRange {
        /// The offending tick.
        tick: u64,
    },
}

/// Which tick stream to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TickKind {
    /// Resource production.
    Default,
    /// Stamina and battle cooldowns.
    Armies,
}

/// Both tick counters at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurrentTicks {
    /// Default tick.
    pub default: u64,
    /// Armies tick.
    pub armies: u64,
}

/// Converts chain timestamps into tick counters and back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickClock {
    default_tick_seconds: u64,
    armies_tick_seconds: u64,
}

impl TickClock {
    /// Create a clock from the configured tick lengths.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if either tick length is zero.
    pub fn new(config: &TickConfig) -> Result<Self, ClockError> {
        if config.default_tick_seconds == 0 || config.armies_tick_seconds == 0 {
            return Err(ClockError::InvalidConfig {
                reason: "tick lengths must be at least one second".to_owned(),
            });
        }
        Ok(Self {
            default_tick_seconds: config.default_tick_seconds,
            armies_tick_seconds: config.armies_tick_seconds,
        })
    }

    /// Seconds per tick of `kind`.
    pub const fn tick_seconds(&self, kind: TickKind) -> u64 {
        match kind {
            TickKind::Default => self.default_tick_seconds,
            TickKind::Armies => self.armies_tick_seconds,
        }
    }

    /// Tick of `kind` containing the unix timestamp.
    pub fn tick_at(&self, kind: TickKind, unix_seconds: u64) -> u64 {
        unix_seconds
            .checked_div(self.tick_seconds(kind))
            .unwrap_or(0)
    }

    /// Both ticks at the unix timestamp.
    pub fn ticks_at(&self, unix_seconds: u64) -> CurrentTicks {
        CurrentTicks {
            default: self.tick_at(TickKind::Default, unix_seconds),
            armies: self.tick_at(TickKind::Armies, unix_seconds),
        }
    }

    /// Both ticks at `time`.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::BeforeEpoch`] for instants before 1970.
    pub fn ticks_at_time(&self, time: DateTime<Utc>) -> Result<CurrentTicks, ClockError> {
        let timestamp = time.timestamp();
        let unix_seconds = u64::try_from(timestamp)
            .ok()
            .ok_or(ClockError::BeforeEpoch { timestamp })?;
        Ok(self.ticks_at(unix_seconds))
    }

    /// Both ticks now, by the local wall clock.
    ///
    /// Prefer block timestamps when available; the wall clock drifts from
    /// chain time.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::BeforeEpoch`] if the system clock is set
    /// before 1970.
    pub fn now(&self) -> Result<CurrentTicks, ClockError> {
        self.ticks_at_time(Utc::now())
    }

    /// Unix timestamp at which `tick` of `kind` begins.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::OutOfRange`] if the product overflows.
    pub fn tick_start(&self, kind: TickKind, tick: u64) -> Result<u64, ClockError> {
        tick.checked_mul(self.tick_seconds(kind))
            .ok_or(ClockError::OutOfRange { tick })
    }

    /// Instant at which `tick` of `kind` begins.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::OutOfRange`] if the instant cannot be
    /// represented.
    pub fn tick_start_time(&self, kind: TickKind, tick: u64) -> Result<DateTime<Utc>, ClockError> {
        let seconds = self.tick_start(kind, tick)?;
        i64::try_from(seconds)
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .ok_or(ClockError::OutOfRange { tick })
    }

    /// Seconds from `unix_seconds` until the next tick of `kind` begins.
    pub fn seconds_until_next_tick(&self, kind: TickKind, unix_seconds: u64) -> u64 {
        let length = self.tick_seconds(kind);
        let into_tick = unix_seconds.checked_rem(length).unwrap_or(0);
        length.saturating_sub(into_tick)
    }

    /// Wall-clock instant at which a resource runs out.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::OutOfRange`] if the depletion tick cannot be
    /// represented as a date.
    pub fn depletion_time(
        &self,
        estimate: &DepletionEstimate,
    ) -> Result<Option<DateTime<Utc>>, ClockError> {
        estimate
            .depletes_at_tick
            .map(|tick| self.tick_start_time(TickKind::Default, tick))
            .transpose()
    }
}

impl Default for TickClock {
    fn default() -> Self {
        let config = TickConfig::default();
        Self {
            default_tick_seconds: config.default_tick_seconds,
            armies_tick_seconds: config.armies_tick_seconds,
        }
    }
}
