//! Constant-product AMM pricing for bank pools.
//!
//! Each bank pool pairs LORDS with one resource. Trades move along the
//! `x * y = k` curve after the LP fee is taken from the input; the bank
//! owner's fee is charged in LORDS on top. Every division truncates, as the
//! contract does. Slippage and spot price are display values and never
//! feed back into settlement.

use eternum_types::MarketPool;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::BankConfig;
use crate::error::EngineError;
use crate::fixed::{div_ceil, to_decimal};

/// LORDS price of one resource unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MarketPrice {
    /// A finite price.
    Finite(Decimal),
    /// The pool holds none of the resource.
    Infinite,
}

impl MarketPrice {
    /// The price, if finite.
    pub const fn as_finite(self) -> Option<Decimal> {
        match self {
            Self::Finite(price) => Some(price),
            Self::Infinite => None,
        }
    }
}

/// Which way a swap goes through a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwapDirection {
    /// Pay LORDS, receive the resource.
    BuyResource,
    /// Pay the resource, receive LORDS.
    SellResource,
}

/// Full breakdown of a swap before it is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SwapQuote {
    /// Amount paid in by the trader.
    pub input: u128,
    /// Amount the trader receives.
    pub output: u128,
    /// LP fee kept by the pool, in the input token.
    pub lp_fee: u128,
    /// Bank owner fee, in LORDS.
    pub owner_fee: u128,
    /// Slippage against the spot price, in percent.
    pub slippage_percent: Decimal,
    /// Spot price before the trade.
    pub price_before: MarketPrice,
    /// Spot price after the trade.
    pub price_after: MarketPrice,
    /// Pool reserves after the trade.
    pub pool_after: MarketPool,
}

// ---------------------------------------------------------------------------
// Curve
// ---------------------------------------------------------------------------

/// Output received for `input_amount` paid into a pool.
///
/// Zero input yields zero output. A zero fee denominator or an empty pool
/// also yields zero rather than dividing by zero.
///
/// # Errors
///
/// Returns [`EngineError::ArithmeticOverflow`] if intermediate products
/// leave `u128`.
pub fn compute_output_amount(
    input_amount: u128,
    input_reserve: u128,
    output_reserve: u128,
    fee_numerator: u128,
    fee_denominator: u128,
) -> Result<u128, EngineError> {
    if input_amount == 0 {
        return Ok(0);
    }

    let effective_input = input_amount
        .checked_mul(fee_denominator.saturating_sub(fee_numerator))
        .ok_or(EngineError::overflow("swap input after fee"))?
        .checked_div(fee_denominator)
        .unwrap_or(0);

    let numerator = effective_input
        .checked_mul(output_reserve)
        .ok_or(EngineError::overflow("swap output"))?;
    let denominator = input_reserve
        .checked_add(effective_input)
        .ok_or(EngineError::overflow("swap reserve"))?;

    Ok(numerator.checked_div(denominator).unwrap_or(0))
}

/// Smallest input that yields at least `output_amount`.
///
/// `None` when the pool cannot supply that much, or when the fee leaves no
/// effective input.
///
/// # Errors
///
/// Returns [`EngineError::ArithmeticOverflow`] if intermediate products
/// leave `u128`.
pub fn compute_input_for_output(
    output_amount: u128,
    input_reserve: u128,
    output_reserve: u128,
    fee_numerator: u128,
    fee_denominator: u128,
) -> Result<Option<u128>, EngineError> {
    if output_amount == 0 {
        return Ok(Some(0));
    }
    if output_amount >= output_reserve {
        return Ok(None);
    }

    let after_fee = fee_denominator.saturating_sub(fee_numerator);
    let effective_needed = input_reserve
        .checked_mul(output_amount)
        .ok_or(EngineError::overflow("swap input"))?;
    let Some(effective_needed) =
        div_ceil(effective_needed, output_reserve.saturating_sub(output_amount))
    else {
        return Ok(None);
    };

    let gross = effective_needed
        .checked_mul(fee_denominator)
        .ok_or(EngineError::overflow("swap input before fee"))?;
    Ok(div_ceil(gross, after_fee))
}

/// Slippage of a trade against the spot price, in percent.
///
/// Compares the linear spot-price output `input * out / in` with the curve
/// output `input * out / (in + input)`; the ratio reduces to
/// `input / (in + input)`. A trade as large as the input reserve slips 50%.
///
/// # Errors
///
/// Returns [`EngineError::ArithmeticOverflow`] if amounts exceed the
/// `Decimal` range.
pub fn compute_slippage(
    input_amount: u128,
    input_reserve: u128,
    output_reserve: u128,
) -> Result<Decimal, EngineError> {
    if input_amount == 0 || output_reserve == 0 {
        return Ok(Decimal::ZERO);
    }

    let input = to_decimal(input_amount, "slippage input")?;
    let after = to_decimal(input_reserve, "slippage reserve")?
        .checked_add(input)
        .ok_or(EngineError::overflow("slippage reserve"))?;

    input
        .checked_div(after)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or(EngineError::overflow("slippage"))
}

/// Spot price of the resource in LORDS.
///
/// # Errors
///
/// Returns [`EngineError::ArithmeticOverflow`] if reserves exceed the
/// `Decimal` range.
pub fn compute_market_price(
    lords_reserve: u128,
    resource_reserve: u128,
) -> Result<MarketPrice, EngineError> {
    if lords_reserve == 0 {
        return Ok(MarketPrice::Finite(Decimal::ZERO));
    }
    if resource_reserve == 0 {
        return Ok(MarketPrice::Infinite);
    }
    let lords = to_decimal(lords_reserve, "lords reserve")?;
    let resource = to_decimal(resource_reserve, "resource reserve")?;
    Ok(lords
        .checked_div(resource)
        .map_or(MarketPrice::Infinite, MarketPrice::Finite))
}

// ---------------------------------------------------------------------------
// Quotes
// ---------------------------------------------------------------------------

/// Quote a swap of `amount` through `pool`, including the bank owner fee.
///
/// Buying charges the owner fee on the LORDS paid in before it reaches the
/// pool; selling charges it on the LORDS paid out.
///
/// # Errors
///
/// Returns [`EngineError::ArithmeticOverflow`] if intermediate products
/// leave their range.
pub fn quote_swap(
    pool: &MarketPool,
    direction: SwapDirection,
    amount: u128,
    bank: &BankConfig,
) -> Result<SwapQuote, EngineError> {
    let price_before = compute_market_price(pool.lords_reserve, pool.resource_reserve)?;
    let lp_fee_of = |value: u128| fraction(value, pool.fee_numerator, pool.fee_denominator);

    let (output, lp_fee, owner_fee, slippage_percent, pool_after) = match direction {
        SwapDirection::BuyResource => {
            let owner_fee =
                fraction(amount, bank.owner_fee_numerator, bank.owner_fee_denominator)?;
            let into_pool = amount.saturating_sub(owner_fee);
            let output = compute_output_amount(
                into_pool,
                pool.lords_reserve,
                pool.resource_reserve,
                pool.fee_numerator,
                pool.fee_denominator,
            )?;
            let after = MarketPool {
                lords_reserve: pool
                    .lords_reserve
                    .checked_add(into_pool)
                    .ok_or(EngineError::overflow("lords reserve"))?,
                resource_reserve: pool.resource_reserve.saturating_sub(output),
                ..*pool
            };
            let slippage = compute_slippage(into_pool, pool.lords_reserve, pool.resource_reserve)?;
            (output, lp_fee_of(into_pool)?, owner_fee, slippage, after)
        }
        SwapDirection::SellResource => {
            let gross = compute_output_amount(
                amount,
                pool.resource_reserve,
                pool.lords_reserve,
                pool.fee_numerator,
                pool.fee_denominator,
            )?;
            let owner_fee = fraction(gross, bank.owner_fee_numerator, bank.owner_fee_denominator)?;
            let after = MarketPool {
                lords_reserve: pool.lords_reserve.saturating_sub(gross),
                resource_reserve: pool
                    .resource_reserve
                    .checked_add(amount)
                    .ok_or(EngineError::overflow("resource reserve"))?,
                ..*pool
            };
            let slippage = compute_slippage(amount, pool.resource_reserve, pool.lords_reserve)?;
            (
                gross.saturating_sub(owner_fee),
                lp_fee_of(amount)?,
                owner_fee,
                slippage,
                after,
            )
        }
    };

    Ok(SwapQuote {
        input: amount,
        output,
        lp_fee,
        owner_fee,
        slippage_percent,
        price_before,
        price_after: compute_market_price(pool_after.lords_reserve, pool_after.resource_reserve)?,
        pool_after,
    })
}

fn fraction(value: u128, numerator: u128, denominator: u128) -> Result<u128, EngineError> {
    Ok(value
        .checked_mul(numerator)
        .ok_or(EngineError::overflow("fee"))?
        .checked_div(denominator)
        .unwrap_or(0))
}

impl BankConfig {
    /// A pool with this bank's LP fee and the given reserves.
    pub const fn pool(&self, lords_reserve: u128, resource_reserve: u128) -> MarketPool {
        MarketPool {
            lords_reserve,
            resource_reserve,
            fee_numerator: self.lp_fee_numerator,
            fee_denominator: self.lp_fee_denominator,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn three_percent_fee_swap() {
        assert_eq!(compute_output_amount(1000, 10_000, 10_000, 30, 1000), Ok(884));
    }

    #[test]
    fn zero_input_is_zero_output() {
        assert_eq!(compute_output_amount(0, 0, 0, 0, 0), Ok(0));
        assert_eq!(compute_output_amount(0, 5, 7, 1, 3), Ok(0));
    }

    #[test]
    fn degenerate_pools_are_total() {
        assert_eq!(compute_output_amount(100, 10, 10, 1, 0), Ok(0));
        assert_eq!(compute_output_amount(100, 0, 0, 0, 1), Ok(0));
        // a fee numerator above the denominator leaves no effective input
        assert_eq!(compute_output_amount(100, 10, 10, 5, 3), Ok(0));
    }

    #[test]
    fn output_never_drains_the_pool() {
        let out = compute_output_amount(u128::from(u64::MAX), 10, 1_000, 0, 1);
        assert!(out.is_ok_and(|o| o < 1_000));
    }

    #[test]
    fn overflow_is_reported() {
        assert!(compute_output_amount(u128::MAX, 1, 1, 0, 2).is_err());
    }

    #[test]
    fn inverse_quote_covers_requested_output() {
        let input = compute_input_for_output(884, 10_000, 10_000, 30, 1000);
        assert_eq!(input, Ok(Some(1000)));
        assert_eq!(compute_output_amount(1000, 10_000, 10_000, 30, 1000), Ok(884));
        assert_eq!(compute_output_amount(999, 10_000, 10_000, 30, 1000), Ok(883));
    }

    #[test]
    fn inverse_quote_rejects_impossible_outputs() {
        assert_eq!(compute_input_for_output(10_000, 10_000, 10_000, 30, 1000), Ok(None));
        assert_eq!(compute_input_for_output(10, 10_000, 10_000, 1000, 1000), Ok(None));
        assert_eq!(compute_input_for_output(0, 10_000, 10_000, 30, 1000), Ok(Some(0)));
    }

    #[test]
    fn slippage_boundaries() {
        assert_eq!(compute_slippage(0, 100, 100), Ok(Decimal::ZERO));
        assert_eq!(compute_slippage(10_000, 10_000, 500), Ok(dec!(50)));
        assert_eq!(compute_slippage(1_000, 9_000, 500), Ok(dec!(10)));
    }

    #[test]
    fn slippage_grows_with_size() {
        let small = compute_slippage(100, 10_000, 10_000);
        let large = compute_slippage(5_000, 10_000, 10_000);
        assert!(matches!((small, large), (Ok(s), Ok(l)) if s < l));
    }

    #[test]
    fn market_price_edges() {
        assert_eq!(compute_market_price(0, 100), Ok(MarketPrice::Finite(Decimal::ZERO)));
        assert_eq!(compute_market_price(0, 0), Ok(MarketPrice::Finite(Decimal::ZERO)));
        assert_eq!(compute_market_price(100, 0), Ok(MarketPrice::Infinite));
        assert_eq!(compute_market_price(300, 200), Ok(MarketPrice::Finite(dec!(1.5))));
        assert_eq!(MarketPrice::Infinite.as_finite(), None);
    }

    #[test]
    fn buying_charges_owner_fee_in_lords() {
        let bank = BankConfig {
            lp_fee_numerator: 30,
            lp_fee_denominator: 1000,
            owner_fee_numerator: 10,
            owner_fee_denominator: 100,
        };
        let pool = bank.pool(10_000, 10_000);
        let quote = quote_swap(&pool, SwapDirection::BuyResource, 1_100, &bank);
        // owner fee 110, 990 into the pool: effective 960, output 960e4 / 10960
        assert_eq!(
            quote.map(|q| (q.owner_fee, q.lp_fee, q.output)),
            Ok((110, 29, 875))
        );
    }

    #[test]
    fn selling_charges_owner_fee_on_proceeds() {
        let bank = BankConfig {
            lp_fee_numerator: 30,
            lp_fee_denominator: 1000,
            owner_fee_numerator: 10,
            owner_fee_denominator: 100,
        };
        let pool = bank.pool(10_000, 10_000);
        let quote = quote_swap(&pool, SwapDirection::SellResource, 1_000, &bank);
        // gross 884, owner fee 88
        assert_eq!(
            quote.map(|q| (q.output, q.owner_fee, q.lp_fee, q.pool_after.lords_reserve)),
            Ok((796, 88, 30, 9_116))
        );
    }

    #[test]
    fn trades_never_shrink_the_invariant() {
        let bank = BankConfig::default();
        let pool = bank.pool(1_000_000, 250_000);
        for direction in [SwapDirection::BuyResource, SwapDirection::SellResource] {
            let quote = quote_swap(&pool, direction, 40_000, &bank);
            let before = pool.lords_reserve * pool.resource_reserve;
            assert!(quote.is_ok_and(|q| {
                q.pool_after.lords_reserve * q.pool_after.resource_reserve >= before
            }));
        }
    }

    #[test]
    fn buying_raises_the_price() {
        let bank = BankConfig::default();
        let pool = bank.pool(1_000_000, 1_000_000);
        let quote = quote_swap(&pool, SwapDirection::BuyResource, 100_000, &bank);
        let prices = quote.map(|q| (q.price_before.as_finite(), q.price_after.as_finite()));
        assert!(matches!(prices, Ok((Some(before), Some(after))) if after > before));
    }
}
