//! Resource balance projection over elapsed default ticks.
//!
//! A structure's resource is settled on chain only when something touches
//! it. Between settlements the client projects the balance forward:
//! buildings produce `rate` raw units per tick, a finite resource cannot
//! produce more than its remaining reserve, and whatever does not fit in
//! the storehouse is discarded, not queued.
//!
//! All divisions truncate, matching the contract's integer arithmetic.

use eternum_types::{ResourceAccount, StorageState};
use serde::Serialize;
use tracing::debug;

use crate::error::EngineError;
use crate::fixed::{Precision, div_ceil, elapsed_ticks, narrow_ticks, ticks_to_seconds};

/// Projected balance of one resource at a given tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BalanceProjection {
    /// Balance in whole units.
    pub balance: u128,
    /// Whether the storehouse ceiling clamped the balance.
    pub at_max_capacity: bool,
    /// Whole units actually produced since the last settlement.
    pub amount_produced: u128,
}

/// When a finite resource runs out of reserve.
///
/// Both fields are `None` for resources that never deplete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DepletionEstimate {
    /// Seconds from the current tick until production stops.
    pub time_remaining_seconds: Option<u64>,
    /// Default tick at which production stops.
    pub depletes_at_tick: Option<u64>,
}

/// Direction of an optimistic balance change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceChange {
    /// Add a raw amount.
    Deposit(u128),
    /// Remove a raw amount, saturating at zero.
    Withdraw(u128),
}

// ---------------------------------------------------------------------------
// Balance
// ---------------------------------------------------------------------------

/// Project `account`'s balance to `current_tick`.
///
/// Without buildings or without a production rate the stored balance is
/// returned as is. Otherwise production accrues per elapsed tick, capped by
/// the remaining reserve for non-food resources, and the total is clamped
/// to the free storehouse space.
///
/// # Errors
///
/// Returns [`EngineError::ArithmeticOverflow`] if intermediate products
/// leave `u128`.
pub fn compute_balance(
    account: &ResourceAccount,
    storage: &StorageState,
    current_tick: u64,
    precision: Precision,
) -> Result<BalanceProjection, EngineError> {
    let stored = precision.to_units(account.raw_balance);

    if account.production_rate_per_tick == 0 || account.building_count == 0 {
        return Ok(BalanceProjection {
            balance: stored,
            at_max_capacity: false,
            amount_produced: 0,
        });
    }

    let elapsed = elapsed_ticks(account.last_updated_tick, current_tick);
    let produced_raw = u128::from(elapsed)
        .checked_mul(account.production_rate_per_tick)
        .ok_or(EngineError::overflow("produced amount"))?;
    let mut produced = precision.to_units(produced_raw);

    if !account.is_food {
        produced = produced.min(precision.to_units(account.output_amount_left));
    }

    let total = stored
        .checked_add(produced)
        .ok_or(EngineError::overflow("projected balance"))?;

    let Some(max_units) = max_units_from_storage(storage) else {
        return Ok(BalanceProjection {
            balance: total,
            at_max_capacity: false,
            amount_produced: produced,
        });
    };

    if total >= max_units {
        // Only new production is discarded; units already held stay held.
        let realized = produced.min(max_units.saturating_sub(stored));
        debug!(
            total,
            max_units, realized, "storehouse full, discarding excess production"
        );
        return Ok(BalanceProjection {
            balance: stored.saturating_add(realized),
            at_max_capacity: true,
            amount_produced: realized,
        });
    }

    Ok(BalanceProjection {
        balance: total,
        at_max_capacity: false,
        amount_produced: produced,
    })
}

/// Whole units of this resource the free storehouse space can hold.
///
/// `None` means unbounded (the resource is weightless).
pub const fn max_units_from_storage(storage: &StorageState) -> Option<u128> {
    let free_kg = storage.capacity_kg.saturating_sub(storage.used_kg);
    free_kg.checked_div(storage.resource_weight_kg)
}

// ---------------------------------------------------------------------------
// Depletion
// ---------------------------------------------------------------------------

/// Estimate when a finite resource stops producing.
///
/// Food, idle, and building-less resources never deplete. When the
/// reserve is already exhausted the estimate points at the last producing
/// tick with zero seconds remaining.
///
/// # Errors
///
/// Returns [`EngineError::ArithmeticOverflow`] if intermediate products
/// leave their integer range.
pub fn compute_depletion_time(
    account: &ResourceAccount,
    current_tick: u64,
    tick_seconds: u64,
) -> Result<DepletionEstimate, EngineError> {
    if account.is_food || account.production_rate_per_tick == 0 || account.building_count == 0 {
        return Ok(DepletionEstimate::default());
    }

    let rate = account.production_rate_per_tick;
    let elapsed = elapsed_ticks(account.last_updated_tick, current_tick);
    let produced = u128::from(elapsed)
        .saturating_mul(rate)
        .min(account.output_amount_left);
    let remaining = account.output_amount_left.saturating_sub(produced);

    if remaining == 0 {
        return Ok(DepletionEstimate {
            time_remaining_seconds: Some(0),
            depletes_at_tick: production_ends_at(account)?,
        });
    }

    let ticks = narrow_ticks(div_ceil(remaining, rate).unwrap_or(0))?;
    Ok(DepletionEstimate {
        time_remaining_seconds: Some(ticks_to_seconds(ticks, tick_seconds)?),
        depletes_at_tick: Some(
            current_tick
                .checked_add(ticks)
                .ok_or(EngineError::overflow("depletion tick"))?,
        ),
    })
}

/// Whether buildings are currently producing this resource.
pub const fn is_production_active(account: &ResourceAccount) -> bool {
    if account.is_food {
        return account.production_rate_per_tick != 0;
    }
    account.building_count > 0
        && account.production_rate_per_tick != 0
        && account.output_amount_left != 0
}

/// Default tick at which a finite resource's production stops.
///
/// `None` for food. A resource with nothing left (or no rate) ends at its
/// last settlement.
///
/// # Errors
///
/// Returns [`EngineError::ArithmeticOverflow`] if the end tick leaves `u64`.
pub fn production_ends_at(account: &ResourceAccount) -> Result<Option<u64>, EngineError> {
    if account.is_food {
        return Ok(None);
    }
    let Some(ticks) = div_ceil(account.output_amount_left, account.production_rate_per_tick)
    else {
        return Ok(Some(account.last_updated_tick));
    };
    let end = account
        .last_updated_tick
        .checked_add(narrow_ticks(ticks)?)
        .ok_or(EngineError::overflow("production end tick"))?;
    Ok(Some(end))
}

// ---------------------------------------------------------------------------
// Optimistic updates
// ---------------------------------------------------------------------------

/// Apply a balance change ahead of chain confirmation.
///
/// Returns fresh copies of the account and storehouse with the balance and
/// the used weight adjusted. Inputs are left untouched so the caller can
/// replace the prediction wholesale once confirmed state arrives.
///
/// # Errors
///
/// Returns [`EngineError::ArithmeticOverflow`] if a deposit overflows.
pub fn apply_balance_change(
    account: &ResourceAccount,
    storage: &StorageState,
    change: BalanceChange,
    precision: Precision,
) -> Result<(ResourceAccount, StorageState), EngineError> {
    let mut next_account = account.clone();
    let mut next_storage = *storage;

    match change {
        BalanceChange::Deposit(raw) => {
            let weight = change_weight_kg(raw, storage.resource_weight_kg, precision)?;
            next_account.raw_balance = account
                .raw_balance
                .checked_add(raw)
                .ok_or(EngineError::overflow("deposited balance"))?;
            next_storage.used_kg = storage
                .used_kg
                .checked_add(weight)
                .ok_or(EngineError::overflow("storehouse weight"))?;
        }
        BalanceChange::Withdraw(raw) => {
            let taken = raw.min(account.raw_balance);
            let weight = change_weight_kg(taken, storage.resource_weight_kg, precision)?;
            next_account.raw_balance = account.raw_balance.saturating_sub(taken);
            next_storage.used_kg = storage.used_kg.saturating_sub(weight);
        }
    }

    Ok((next_account, next_storage))
}

fn change_weight_kg(raw: u128, weight_kg: u128, precision: Precision) -> Result<u128, EngineError> {
    let scaled = raw
        .checked_mul(weight_kg)
        .ok_or(EngineError::overflow("storehouse weight"))?;
    Ok(precision.to_units(scaled))
}
