//! Game-balance tunables injected into every engine computation.
//!
//! Nothing in the engine hard-codes a balance constant. The configuration
//! source (see `eternum-core`) deserialises an [`EngineConfig`] per season
//! and the caller passes the relevant section into each function. The
//! defaults below mirror the current season's world config so tests and
//! tools have a sensible baseline.

use eternum_types::TroopType;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::fixed::Precision;

/// Every tunable the engine reads, grouped by component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fixed-point scale shared by every amount.
    pub precision: PrecisionConfig,
    /// Tick lengths.
    pub tick: TickConfig,
    /// Per-troop strength.
    pub troops: TroopConfig,
    /// Stamina regeneration and action costs.
    pub stamina: StaminaConfig,
    /// Combat thresholds and penalties.
    pub combat: CombatConfig,
    /// Bank fees.
    pub bank: BankConfig,
}

/// Fixed-point scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PrecisionConfig {
    /// Raw units per whole unit (default: `1_000_000_000`).
    pub resource_precision: u64,
}

impl Default for PrecisionConfig {
    fn default() -> Self {
        Self {
            resource_precision: 1_000_000_000,
        }
    }
}

impl PrecisionConfig {
    /// The configured scale as a [`Precision`].
    pub fn precision(self) -> Precision {
        Precision::new(u128::from(self.resource_precision))
    }
}

/// Tick lengths in seconds.
///
/// Resources advance on the default tick; stamina and battle cooldowns on
/// the armies tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TickConfig {
    /// Seconds per default tick (default: 1).
    pub default_tick_seconds: u64,
    /// Seconds per armies tick (default: 3600).
    pub armies_tick_seconds: u64,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            default_tick_seconds: 1,
            armies_tick_seconds: 3600,
        }
    }
}

/// Per-unit strength of each troop type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TroopConfig {
    /// Strength of one tier-1 knight (default: 1).
    pub knight_strength: u128,
    /// Strength of one tier-1 paladin (default: 1).
    pub paladin_strength: u128,
    /// Strength of one tier-1 crossbowman (default: 1).
    pub crossbowman_strength: u128,
}

impl Default for TroopConfig {
    fn default() -> Self {
        Self {
            knight_strength: 1,
            paladin_strength: 1,
            crossbowman_strength: 1,
        }
    }
}

impl TroopConfig {
    /// Tier-1 per-unit strength of `troop`.
    pub const fn strength_of(&self, troop: TroopType) -> u128 {
        match troop {
            TroopType::Knight => self.knight_strength,
            TroopType::Paladin => self.paladin_strength,
            TroopType::Crossbowman => self.crossbowman_strength,
        }
    }
}

/// Stamina regeneration, ceilings, and per-action costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StaminaConfig {
    /// Stamina regained per armies tick (default: 20).
    pub gain_per_tick: u64,
    /// Stamina of a freshly created army (default: 20).
    pub initial: u64,
    /// Knight ceiling (default: 120).
    pub knight_max: u64,
    /// Paladin ceiling (default: 140).
    pub paladin_max: u64,
    /// Crossbowman ceiling (default: 120).
    pub crossbowman_max: u64,
    /// Stamina to explore one hex (default: 30).
    pub explore_stamina_cost: u64,
    /// Base stamina to travel one explored hex (default: 20).
    pub travel_stamina_cost: u64,
    /// Biome adjustment applied to travel costs (default: 10).
    pub biome_bonus: u64,
    /// Floor of the cheapest possible travel step (default: 10).
    pub min_travel_cost: u64,
    /// Whole wheat units burned per troop per explored hex (default: 0).
    pub explore_wheat_cost: u128,
    /// Whole fish units burned per troop per explored hex (default: 0).
    pub explore_fish_cost: u128,
    /// Whole wheat units burned per troop per travelled hex (default: 0).
    pub travel_wheat_cost: u128,
    /// Whole fish units burned per troop per travelled hex (default: 0).
    pub travel_fish_cost: u128,
}

impl Default for StaminaConfig {
    fn default() -> Self {
        Self {
            gain_per_tick: 20,
            initial: 20,
            knight_max: 120,
            paladin_max: 140,
            crossbowman_max: 120,
            explore_stamina_cost: 30,
            travel_stamina_cost: 20,
            biome_bonus: 10,
            min_travel_cost: 10,
            explore_wheat_cost: 0,
            explore_fish_cost: 0,
            travel_wheat_cost: 0,
            travel_fish_cost: 0,
        }
    }
}

impl StaminaConfig {
    /// Stamina ceiling for `troop`.
    pub const fn max_for(&self, troop: TroopType) -> u64 {
        match troop {
            TroopType::Knight => self.knight_max,
            TroopType::Paladin => self.paladin_max,
            TroopType::Crossbowman => self.crossbowman_max,
        }
    }
}

/// Combat thresholds and the penalty applied to weakened defenders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Stamina an attacker needs to strike at full strength (default: 50).
    pub attack_stamina_threshold: u64,
    /// Stamina a defender needs to defend at full strength (default: 30).
    pub defend_stamina_threshold: u64,
    /// Multiplier for a defender short on stamina or on cooldown (default: 0.7).
    pub defender_penalty: Decimal,
    /// Biome damage bonus numerator over [`Self::biome_bonus_denominator`]
    /// (default: 3000).
    pub biome_bonus_numerator: u32,
    /// Biome damage bonus denominator (default: 10000).
    pub biome_bonus_denominator: u32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            attack_stamina_threshold: 50,
            defend_stamina_threshold: 30,
            defender_penalty: Decimal::new(7, 1),
            biome_bonus_numerator: 3000,
            biome_bonus_denominator: 10_000,
        }
    }
}

/// Bank fee schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BankConfig {
    /// LP fee numerator, kept by the pool (default: 15).
    pub lp_fee_numerator: u128,
    /// LP fee denominator (default: 100).
    pub lp_fee_denominator: u128,
    /// Bank owner fee numerator, charged in LORDS (default: 15).
    pub owner_fee_numerator: u128,
    /// Bank owner fee denominator (default: 100).
    pub owner_fee_denominator: u128,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            lp_fee_numerator: 15,
            lp_fee_denominator: 100,
            owner_fee_numerator: 15,
            owner_fee_denominator: 100,
        }
    }
}
