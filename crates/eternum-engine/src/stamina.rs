//! Stamina regeneration and movement costs for armies.
//!
//! Stamina is stored on chain as an amount plus the armies tick it was
//! written at. It regenerates by `regen_per_tick + boost` every armies tick
//! up to the troop type's ceiling, and is spent by travel, exploration, and
//! attacks.

use eternum_types::{BiomeType, StaminaState, TroopType};
use serde::Serialize;

use crate::config::StaminaConfig;
use crate::fixed::elapsed_ticks;

/// Projected stamina of one army.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StaminaProjection {
    /// Stamina at the requested tick.
    pub current: u64,
    /// Ceiling.
    pub max: u64,
    /// Armies ticks until the ceiling is reached. `None` when stamina
    /// never regenerates.
    pub ticks_until_full: Option<u64>,
}

/// Project `state` to `current_tick`.
///
/// Regeneration saturates at the ceiling, so the sum never needs to leave
/// `u64`. A stored amount above the ceiling is clamped to it.
pub fn compute_stamina(state: &StaminaState, current_tick: u64) -> StaminaProjection {
    let rate = state.regen_per_tick.saturating_add(state.boost);
    let elapsed = elapsed_ticks(state.last_update_tick, current_tick);
    let current = state
        .current_amount
        .min(state.max_stamina)
        .saturating_add(elapsed.saturating_mul(rate))
        .min(state.max_stamina);

    let ticks_until_full = if current >= state.max_stamina {
        Some(0)
    } else if rate == 0 {
        None
    } else {
        Some(state.max_stamina.saturating_sub(current).div_ceil(rate))
    };

    StaminaProjection {
        current,
        max: state.max_stamina,
        ticks_until_full,
    }
}

/// Stamina state of an army of `troop` holding `amount` as of
/// `last_update_tick`, with the configured regeneration and ceiling.
pub const fn army_stamina_state(
    troop: TroopType,
    amount: u64,
    last_update_tick: u64,
    config: &StaminaConfig,
) -> StaminaState {
    StaminaState {
        current_amount: amount,
        last_update_tick,
        max_stamina: config.max_for(troop),
        regen_per_tick: config.gain_per_tick,
        boost: 0,
    }
}

/// Stamina state of an army of `troop` created at `tick`.
///
/// New armies start at the configured initial stamina, never above the
/// troop's ceiling.
pub const fn fresh_stamina_state(
    troop: TroopType,
    tick: u64,
    config: &StaminaConfig,
) -> StaminaState {
    let max = config.max_for(troop);
    let initial = if config.initial < max { config.initial } else { max };
    army_stamina_state(troop, initial, tick, config)
}

/// Deduct `cost` from the projected stamina and re-base the state at
/// `current_tick`.
///
/// Returns `None` when the army cannot afford the cost.
pub fn spend_stamina(state: &StaminaState, cost: u64, current_tick: u64) -> Option<StaminaState> {
    let projected = compute_stamina(state, current_tick);
    let remaining = projected.current.checked_sub(cost)?;
    Some(StaminaState {
        current_amount: remaining,
        last_update_tick: current_tick.max(state.last_update_tick),
        ..*state
    })
}

// ---------------------------------------------------------------------------
// Movement costs
// ---------------------------------------------------------------------------

/// Stamina to travel onto one explored hex of `biome` with `troop`.
///
/// Paladins ride faster over open ground and slower through forest; water
/// is cheaper for everyone, scorched land dearer, and snow slows
/// everyone but paladins.
pub const fn travel_stamina_cost(
    biome: BiomeType,
    troop: TroopType,
    config: &StaminaConfig,
) -> u64 {
    let base = config.travel_stamina_cost;
    let bonus = config.biome_bonus;
    let is_paladin = matches!(troop, TroopType::Paladin);

    match biome {
        BiomeType::Ocean | BiomeType::DeepOcean => base.saturating_sub(bonus),
        BiomeType::Beach => base,
        BiomeType::Scorched => base.saturating_add(bonus),
        BiomeType::Snow => {
            if is_paladin {
                base
            } else {
                base.saturating_add(bonus)
            }
        }
        BiomeType::Grassland
        | BiomeType::Shrubland
        | BiomeType::SubtropicalDesert
        | BiomeType::TemperateDesert
        | BiomeType::Tundra
        | BiomeType::Bare => {
            if is_paladin {
                base.saturating_sub(bonus)
            } else {
                base
            }
        }
        BiomeType::TropicalRainForest
        | BiomeType::TropicalSeasonalForest
        | BiomeType::TemperateRainForest
        | BiomeType::TemperateDeciduousForest
        | BiomeType::Taiga => {
            if is_paladin {
                base.saturating_add(bonus)
            } else {
                base
            }
        }
    }
}

/// Cheapest possible travel step on any biome.
pub const fn min_travel_stamina_cost(config: &StaminaConfig) -> u64 {
    let cheapest = config.travel_stamina_cost.saturating_sub(config.biome_bonus);
    if cheapest > config.min_travel_cost {
        cheapest
    } else {
        config.min_travel_cost
    }
}

/// Provisions an army carries for a journey, in whole units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Provisions {
    /// Wheat available to burn.
    pub wheat: u128,
    /// Fish available to burn.
    pub fish: u128,
}

/// Most hexes an army of `troop_units` whole troops can travel.
///
/// Bounded by stamina at the cheapest step and by the wheat and fish burned
/// per troop per step. A zero cost leaves that bound open.
pub fn max_travel_steps(
    stamina: u64,
    provisions: Provisions,
    troop_units: u128,
    config: &StaminaConfig,
) -> u64 {
    step_bound(
        stamina,
        min_travel_stamina_cost(config),
        provisions,
        (config.travel_wheat_cost, config.travel_fish_cost),
        troop_units,
    )
}

/// Most unexplored hexes an army of `troop_units` whole troops can reveal
/// in a row, paying the exploration stamina and food cost for each.
pub fn max_explore_steps(
    stamina: u64,
    provisions: Provisions,
    troop_units: u128,
    config: &StaminaConfig,
) -> u64 {
    step_bound(
        stamina,
        config.explore_stamina_cost,
        provisions,
        (config.explore_wheat_cost, config.explore_fish_cost),
        troop_units,
    )
}

fn step_bound(
    stamina: u64,
    stamina_per_step: u64,
    provisions: Provisions,
    (wheat_per_troop, fish_per_troop): (u128, u128),
    troop_units: u128,
) -> u64 {
    let by_stamina = u128::from(stamina.checked_div(stamina_per_step).unwrap_or(u64::MAX));
    let by_wheat = food_bound(provisions.wheat, wheat_per_troop, troop_units);
    let by_fish = food_bound(provisions.fish, fish_per_troop, troop_units);

    let steps = by_stamina.min(by_wheat).min(by_fish);
    u64::try_from(steps).unwrap_or(u64::MAX)
}

fn food_bound(available: u128, per_troop: u128, troop_units: u128) -> u128 {
    let per_step = per_troop.saturating_mul(troop_units);
    available.checked_div(per_step).unwrap_or(u128::MAX)
}
