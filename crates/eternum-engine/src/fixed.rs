//! Fixed-point amounts and tick arithmetic.
//!
//! Amounts on chain are integers scaled by a precision constant. Converting
//! to whole units is a truncating division, exactly as the contract does
//! it; rounding any other way makes client and chain balances drift apart.
//! Elapsed time never runs backwards: a snapshot newer than the caller's
//! tick yields zero elapsed ticks.

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Integer scale between raw on-chain amounts and whole units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Precision(u128);

impl Precision {
    /// The contract's resource precision.
    pub const DEFAULT: Self = Self(1_000_000_000);

    /// Wrap a scale factor.
    pub const fn new(scale: u128) -> Self {
        Self(scale)
    }

    /// Raw units per whole unit.
    pub const fn scale(self) -> u128 {
        self.0
    }

    /// Whole units in `raw`, truncated. A zero scale yields zero.
    pub const fn to_units(self, raw: u128) -> u128 {
        match raw.checked_div(self.0) {
            Some(units) => units,
            None => 0,
        }
    }

    /// Raw amount for `units` whole units.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ArithmeticOverflow`] if the product leaves `u128`.
    pub fn to_raw(self, units: u128) -> Result<u128, EngineError> {
        units
            .checked_mul(self.0)
            .ok_or(EngineError::overflow("raw amount"))
    }

    /// `raw` rounded down to a whole number of units, still in raw scale.
    pub const fn round_down(self, raw: u128) -> u128 {
        match raw.checked_rem(self.0) {
            Some(fraction) => raw.saturating_sub(fraction),
            None => raw,
        }
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Ticks between `last` and `current`, clamped to zero.
pub const fn elapsed_ticks(last: u64, current: u64) -> u64 {
    current.saturating_sub(last)
}

/// Ceiling division. `None` when `denominator` is zero.
pub const fn div_ceil(numerator: u128, denominator: u128) -> Option<u128> {
    if denominator == 0 {
        None
    } else {
        Some(numerator.div_ceil(denominator))
    }
}

/// Wall-clock seconds spanned by `ticks` ticks of `tick_seconds` each.
///
/// # Errors
///
/// Returns [`EngineError::ArithmeticOverflow`] if the product leaves `u64`.
pub fn ticks_to_seconds(ticks: u64, tick_seconds: u64) -> Result<u64, EngineError> {
    ticks
        .checked_mul(tick_seconds)
        .ok_or(EngineError::overflow("tick duration"))
}

/// Narrow a `u128` tick count to `u64`.
///
/// # Errors
///
/// Returns [`EngineError::ArithmeticOverflow`] if the value does not fit.
pub fn narrow_ticks(ticks: u128) -> Result<u64, EngineError> {
    u64::try_from(ticks)
        .ok()
        .ok_or(EngineError::overflow("tick count"))
}

/// Lift a raw integer into a [`Decimal`].
///
/// # Errors
///
/// Returns [`EngineError::ArithmeticOverflow`] if `value` exceeds the
/// 96-bit `Decimal` mantissa.
pub fn to_decimal(value: u128, context: &'static str) -> Result<Decimal, EngineError> {
    Decimal::from_u128(value).ok_or(EngineError::overflow(context))
}

/// Truncate a non-negative [`Decimal`] to an integer, as the contract's
/// fixed-point division does. Negative values yield zero.
pub fn floor_to_u128(value: Decimal) -> u128 {
    value.floor().to_u128().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_units_truncates() {
        let p = Precision::DEFAULT;
        assert_eq!(p.to_units(1_999_999_999), 1);
        assert_eq!(p.to_units(999_999_999), 0);
        assert_eq!(p.to_units(5_000_000_000), 5);
    }

    #[test]
    fn zero_precision_is_total() {
        let p = Precision::new(0);
        assert_eq!(p.to_units(42), 0);
        assert_eq!(p.round_down(42), 42);
    }

    #[test]
    fn to_raw_checks_overflow() {
        assert_eq!(Precision::DEFAULT.to_raw(3), Ok(3_000_000_000));
        assert!(Precision::DEFAULT.to_raw(u128::MAX).is_err());
    }

    #[test]
    fn round_down_drops_partial_units() {
        let p = Precision::new(1000);
        assert_eq!(p.round_down(12_345), 12_000);
        assert_eq!(p.round_down(999), 0);
        assert_eq!(p.round_down(3000), 3000);
    }

    #[test]
    fn elapsed_clamps_negative() {
        assert_eq!(elapsed_ticks(10, 15), 5);
        assert_eq!(elapsed_ticks(15, 10), 0);
    }

    #[test]
    fn div_ceil_rounds_up() {
        assert_eq!(div_ceil(10, 5), Some(2));
        assert_eq!(div_ceil(11, 5), Some(3));
        assert_eq!(div_ceil(0, 5), Some(0));
        assert_eq!(div_ceil(1, 0), None);
    }

    #[test]
    fn decimal_bridge() {
        assert_eq!(to_decimal(42, "test"), Ok(Decimal::from(42)));
        assert!(to_decimal(u128::MAX, "test").is_err());
        assert_eq!(floor_to_u128(Decimal::new(8849, 1)), 884);
        assert_eq!(floor_to_u128(Decimal::new(-5, 0)), 0);
    }

    #[test]
    fn tick_seconds_overflow() {
        assert_eq!(ticks_to_seconds(3, 3600), Ok(10_800));
        assert!(ticks_to_seconds(u64::MAX, 2).is_err());
    }
}
