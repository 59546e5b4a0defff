//! Combat strength, readiness modifiers, and outcome odds.
//!
//! Strength is linear: doubling the troops or the tier doubles it. A fight
//! is a relative-strength contest; the engine reports the attacker's
//! chance of success and the loot ceiling, and leaves any roll to the
//! caller.
//!
//! ## Readiness
//!
//! Stamina and battle cooldown gate both sides differently:
//! - an attacker short on stamina or still on cooldown cannot strike
//!   (modifier `0`);
//! - a defender in the same state still fights, weakened by
//!   [`CombatConfig::defender_penalty`].

use eternum_types::{BiomeType, TroopForce, TroopTier, TroopType};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::{CombatConfig, TroopConfig};
use crate::error::EngineError;
use crate::fixed::{Precision, floor_to_u128, to_decimal};

/// Which side of an engagement a force is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombatSide {
    /// The force initiating the attack.
    Attacker,
    /// The force being attacked.
    Defender,
}

// ---------------------------------------------------------------------------
// Strength
// ---------------------------------------------------------------------------

/// Strength of `troop_count` troops of one type at `tier`.
///
/// # Errors
///
/// Returns [`EngineError::ArithmeticOverflow`] if the product leaves `u128`.
pub fn compute_strength(
    troop_count: u128,
    tier: TroopTier,
    unit_strength: u128,
) -> Result<u128, EngineError> {
    troop_count
        .checked_mul(unit_strength)
        .and_then(|s| s.checked_mul(u128::from(tier.number())))
        .ok_or(EngineError::overflow("troop strength"))
}

/// Combined strength of every troop type in `force`, ignoring health.
///
/// # Errors
///
/// Returns [`EngineError::ArithmeticOverflow`] if the sum leaves `u128`.
pub fn full_strength(force: &TroopForce, troops: &TroopConfig) -> Result<u128, EngineError> {
    TroopType::ALL.iter().try_fold(0_u128, |acc, &troop| {
        let strength =
            compute_strength(force.count(troop), force.tier, troops.strength_of(troop))?;
        acc.checked_add(strength)
            .ok_or(EngineError::overflow("force strength"))
    })
}

/// Share of lifetime health the force still has, in `[0, 1]`.
///
/// A force with no lifetime health has nothing left.
///
/// # Errors
///
/// Returns [`EngineError::ArithmeticOverflow`] if health exceeds the
/// `Decimal` range.
pub fn percentage_left(force: &TroopForce) -> Result<Decimal, EngineError> {
    if force.lifetime_health == 0 {
        return Ok(Decimal::ZERO);
    }
    let current = to_decimal(force.current_health.min(force.lifetime_health), "health")?;
    let lifetime = to_decimal(force.lifetime_health, "health")?;
    Ok(current.checked_div(lifetime).unwrap_or(Decimal::ZERO))
}

fn effective_strength(force: &TroopForce, troops: &TroopConfig) -> Result<Decimal, EngineError> {
    let strength = to_decimal(full_strength(force, troops)?, "force strength")?;
    strength
        .checked_mul(percentage_left(force)?)
        .ok_or(EngineError::overflow("effective strength"))
}

// ---------------------------------------------------------------------------
// Readiness modifiers
// ---------------------------------------------------------------------------

/// Strength multiplier for a side's stamina.
///
/// Meeting the threshold exactly is enough.
pub const fn compute_stamina_modifier(
    stamina: u64,
    side: CombatSide,
    config: &CombatConfig,
) -> Decimal {
    let threshold = match side {
        CombatSide::Attacker => config.attack_stamina_threshold,
        CombatSide::Defender => config.defend_stamina_threshold,
    };
    if stamina >= threshold {
        Decimal::ONE
    } else {
        shortfall_modifier(side, config)
    }
}

/// Strength multiplier for a side's battle cooldown.
pub const fn compute_cooldown_modifier(
    cooldown_end_tick: u64,
    current_tick: u64,
    side: CombatSide,
    config: &CombatConfig,
) -> Decimal {
    if current_tick >= cooldown_end_tick {
        Decimal::ONE
    } else {
        shortfall_modifier(side, config)
    }
}

const fn shortfall_modifier(side: CombatSide, config: &CombatConfig) -> Decimal {
    match side {
        CombatSide::Attacker => Decimal::ZERO,
        CombatSide::Defender => config.defender_penalty,
    }
}

/// Damage multiplier for `troop` fighting on `biome`.
///
/// Knights favour forest, crossbowmen water, paladins open ground;
/// scorched land strengthens everyone.
pub fn biome_combat_modifier(
    troop: TroopType,
    biome: BiomeType,
    config: &CombatConfig,
) -> Decimal {
    let bonus = Decimal::from(config.biome_bonus_numerator)
        .checked_div(Decimal::from(config.biome_bonus_denominator))
        .unwrap_or(Decimal::ZERO);

    let (knight, crossbowman, paladin): (i8, i8, i8) = match biome {
        BiomeType::Ocean | BiomeType::DeepOcean => (0, 1, -1),
        BiomeType::Beach | BiomeType::Snow => (-1, 1, 0),
        BiomeType::Grassland | BiomeType::Shrubland | BiomeType::Bare => (0, -1, 1),
        BiomeType::SubtropicalDesert | BiomeType::TemperateDesert | BiomeType::Tundra => {
            (-1, 0, 1)
        }
        BiomeType::TropicalRainForest
        | BiomeType::TropicalSeasonalForest
        | BiomeType::TemperateRainForest
        | BiomeType::TemperateDeciduousForest
        | BiomeType::Taiga => (1, 0, -1),
        BiomeType::Scorched => (1, 1, 1),
    };
    let sign = match troop {
        TroopType::Knight => knight,
        TroopType::Crossbowman => crossbowman,
        TroopType::Paladin => paladin,
    };

    match sign {
        1 => Decimal::ONE.saturating_add(bonus),
        -1 => Decimal::ONE.saturating_sub(bonus),
        _ => Decimal::ONE,
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Probability in `[0, 1]` that the attacker wins.
///
/// A present attacker facing no defender always wins; a missing attacker
/// never does. Two forces with no strength between them give zero.
///
/// # Errors
///
/// Returns [`EngineError::ArithmeticOverflow`] if strengths exceed the
/// `Decimal` range.
pub fn get_chances_of_success(
    attacker: Option<&TroopForce>,
    defender: Option<&TroopForce>,
    troops: &TroopConfig,
) -> Result<Decimal, EngineError> {
    let Some(attacker) = attacker else {
        return Ok(Decimal::ZERO);
    };
    let Some(defender) = defender else {
        return Ok(Decimal::ONE);
    };
    relative_odds(
        effective_strength(attacker, troops)?,
        effective_strength(defender, troops)?,
    )
}

fn relative_odds(attacker: Decimal, defender: Decimal) -> Result<Decimal, EngineError> {
    let total = attacker
        .checked_add(defender)
        .ok_or(EngineError::overflow("combined strength"))?;
    if total.is_zero() {
        return Ok(Decimal::ZERO);
    }
    Ok(attacker.checked_div(total).unwrap_or(Decimal::ZERO))
}

/// Most whole resource units the attacker can carry off.
///
/// Scales the attacker's troop count by its odds; what the defender
/// actually holds is checked elsewhere.
///
/// # Errors
///
/// Returns [`EngineError::ArithmeticOverflow`] if amounts exceed the
/// `Decimal` range.
pub fn get_max_resource_amount_stolen(
    attacker: Option<&TroopForce>,
    defender: Option<&TroopForce>,
    troops: &TroopConfig,
    precision: Precision,
) -> Result<u128, EngineError> {
    let Some(force) = attacker else {
        return Ok(0);
    };
    let chance = get_chances_of_success(attacker, defender, troops)?;
    loot_ceiling(force.total_troops(), chance, precision)
}

fn loot_ceiling(
    total_troops: u128,
    chance: Decimal,
    precision: Precision,
) -> Result<u128, EngineError> {
    let troops = to_decimal(total_troops, "troop total")?;
    let scale = to_decimal(precision.scale(), "precision")?;
    let Some(units) = troops.checked_div(scale) else {
        return Ok(0);
    };
    let loot = units
        .checked_mul(chance)
        .ok_or(EngineError::overflow("loot ceiling"))?;
    Ok(floor_to_u128(loot))
}

/// Troops lost per type in a battle (precision-scaled).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TroopLosses {
    /// Knights lost.
    pub knights: u128,
    /// Paladins lost.
    pub paladins: u128,
    /// Crossbowmen lost.
    pub crossbowmen: u128,
}

/// Troops left after `losses`, each count rounded down to whole troops.
pub const fn calculate_remaining_troops(
    army: &TroopForce,
    losses: &TroopLosses,
    precision: Precision,
) -> TroopForce {
    TroopForce {
        knight_count: precision.round_down(army.knight_count.saturating_sub(losses.knights)),
        paladin_count: precision.round_down(army.paladin_count.saturating_sub(losses.paladins)),
        crossbowman_count: precision
            .round_down(army.crossbowman_count.saturating_sub(losses.crossbowmen)),
        ..*army
    }
}

// ---------------------------------------------------------------------------
// Engagement preview
// ---------------------------------------------------------------------------

/// One side of an engagement as the client sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Combatant {
    /// Troops and health.
    pub force: TroopForce,
    /// Stamina already projected to the engagement tick.
    pub stamina: u64,
    /// Armies tick at which the side's battle cooldown ends.
    pub cooldown_end_tick: u64,
}

/// Predicted outcome shown before the player commits to an attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EngagementPreview {
    /// Whether the attacker is rested and off cooldown.
    pub can_attack: bool,
    /// Attacker strength after health, biome, and readiness.
    pub attacker_strength: Decimal,
    /// Defender strength after health, biome, and readiness.
    pub defender_strength: Decimal,
    /// Probability in `[0, 1]` that the attacker wins.
    pub chance_of_success: Decimal,
    /// Most whole resource units the attacker can carry off.
    pub max_loot: u128,
}

/// Preview an attack at `current_tick`, optionally on a known `biome`.
///
/// # Errors
///
/// Returns [`EngineError::ArithmeticOverflow`] if strengths exceed the
/// `Decimal` range.
pub fn preview_engagement(
    attacker: &Combatant,
    defender: &Combatant,
    biome: Option<BiomeType>,
    current_tick: u64,
    troops: &TroopConfig,
    combat: &CombatConfig,
    precision: Precision,
) -> Result<EngagementPreview, EngineError> {
    let attacker_readiness = readiness(attacker, CombatSide::Attacker, current_tick, combat)?;
    let defender_readiness = readiness(defender, CombatSide::Defender, current_tick, combat)?;
    let can_attack = attacker_readiness == Decimal::ONE;

    let attacker_strength =
        scaled_strength(&attacker.force, biome, attacker_readiness, troops, combat)?;
    let defender_strength =
        scaled_strength(&defender.force, biome, defender_readiness, troops, combat)?;

    let chance_of_success = if can_attack {
        relative_odds(attacker_strength, defender_strength)?
    } else {
        Decimal::ZERO
    };
    let max_loot = loot_ceiling(attacker.force.total_troops(), chance_of_success, precision)?;

    Ok(EngagementPreview {
        can_attack,
        attacker_strength,
        defender_strength,
        chance_of_success,
        max_loot,
    })
}

fn readiness(
    side_state: &Combatant,
    side: CombatSide,
    current_tick: u64,
    combat: &CombatConfig,
) -> Result<Decimal, EngineError> {
    compute_stamina_modifier(side_state.stamina, side, combat)
        .checked_mul(compute_cooldown_modifier(
            side_state.cooldown_end_tick,
            current_tick,
            side,
            combat,
        ))
        .ok_or(EngineError::overflow("readiness"))
}

fn scaled_strength(
    force: &TroopForce,
    biome: Option<BiomeType>,
    readiness: Decimal,
    troops: &TroopConfig,
    combat: &CombatConfig,
) -> Result<Decimal, EngineError> {
    let mut total = Decimal::ZERO;
    for troop in TroopType::ALL {
        let raw = compute_strength(force.count(troop), force.tier, troops.strength_of(troop))?;
        let modifier = biome.map_or(Decimal::ONE, |b| biome_combat_modifier(troop, b, combat));
        let adjusted = to_decimal(raw, "troop strength")?
            .checked_mul(modifier)
            .ok_or(EngineError::overflow("biome strength"))?;
        total = total
            .checked_add(adjusted)
            .ok_or(EngineError::overflow("force strength"))?;
    }
    total
        .checked_mul(percentage_left(force)?)
        .and_then(|s| s.checked_mul(readiness))
        .ok_or(EngineError::overflow("effective strength"))
}
