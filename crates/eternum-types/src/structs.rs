//! Entity snapshots supplied by the indexer-backed state cache.
//!
//! Every snapshot is plain data taken at a single tick. The engine reads
//! them and returns fresh result records; it never mutates a snapshot in
//! place. Amounts are `u128` integers scaled by the configured precision.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{BiomeType, StructureCategory, TroopTier, TroopType};
use crate::ids::{ArmyId, ContractAddress, StructureId};

// ---------------------------------------------------------------------------
// Map coordinates
// ---------------------------------------------------------------------------

/// Offset coordinate of a hex on the unbounded world grid.
///
/// Ordering is column-major so coordinates can key ordered maps.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub struct HexCoord {
    /// Column (x).
    pub col: i32,
    /// Row (y).
    pub row: i32,
}

impl HexCoord {
    /// Create a coordinate.
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}

impl core::fmt::Display for HexCoord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// Production state of one resource on one entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ResourceAccount {
    /// Stored balance at `last_updated_tick` (precision-scaled).
    pub raw_balance: u128,
    /// Amount produced per tick across all buildings (precision-scaled).
    pub production_rate_per_tick: u128,
    /// Tick at which `raw_balance` was last settled.
    pub last_updated_tick: u64,
    /// Remaining output the buildings may still produce (precision-scaled).
    /// Ignored for food.
    pub output_amount_left: u128,
    /// Number of buildings producing this resource.
    pub building_count: u32,
    /// Food (wheat, fish) is renewable and never exhausts its reserve.
    pub is_food: bool,
}

/// Storehouse geometry of the entity holding a resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StorageState {
    /// Total storehouse capacity in kilograms.
    pub capacity_kg: u128,
    /// Kilograms currently in use.
    pub used_kg: u128,
    /// Weight of one whole unit of this resource. Zero means weightless.
    pub resource_weight_kg: u128,
}

// ---------------------------------------------------------------------------
// Armies
// ---------------------------------------------------------------------------

/// Stamina of one army as last written on chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StaminaState {
    /// Stamina at `last_update_tick`.
    pub current_amount: u64,
    /// Armies tick at which `current_amount` was written.
    pub last_update_tick: u64,
    /// Ceiling for this army's troop type.
    pub max_stamina: u64,
    /// Stamina regained per armies tick.
    pub regen_per_tick: u64,
    /// Additional regeneration per tick from relics or boosts.
    pub boost: u64,
}

/// Troop composition and health of one military force.
///
/// Counts are precision-scaled: one knight is `precision` units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TroopForce {
    /// Knights in the force.
    pub knight_count: u128,
    /// Paladins in the force.
    pub paladin_count: u128,
    /// Crossbowmen in the force.
    pub crossbowman_count: u128,
    /// Tier shared by every troop in the force.
    pub tier: TroopTier,
    /// Health remaining.
    pub current_health: u128,
    /// Health the force had at full strength.
    pub lifetime_health: u128,
}

impl TroopForce {
    /// Count of one troop type.
    pub const fn count(&self, troop: TroopType) -> u128 {
        match troop {
            TroopType::Knight => self.knight_count,
            TroopType::Paladin => self.paladin_count,
            TroopType::Crossbowman => self.crossbowman_count,
        }
    }

    /// Total troops across all types, saturating at `u128::MAX`.
    pub const fn total_troops(&self) -> u128 {
        self.knight_count
            .saturating_add(self.paladin_count)
            .saturating_add(self.crossbowman_count)
    }
}

// ---------------------------------------------------------------------------
// Market
// ---------------------------------------------------------------------------

/// Constant-product pool between LORDS and one resource at a bank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MarketPool {
    /// LORDS held by the pool (precision-scaled).
    pub lords_reserve: u128,
    /// Resource held by the pool (precision-scaled).
    pub resource_reserve: u128,
    /// LP fee numerator.
    pub fee_numerator: u128,
    /// LP fee denominator.
    pub fee_denominator: u128,
}

// ---------------------------------------------------------------------------
// Occupants
// ---------------------------------------------------------------------------

/// An explored hex and its terrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ExploredTile {
    /// Position.
    pub coord: HexCoord,
    /// Terrain.
    pub biome: BiomeType,
}

/// A structure standing on a hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StructureOccupant {
    /// Structure entity id.
    pub structure_id: StructureId,
    /// Position.
    pub coord: HexCoord,
    /// Owning account.
    pub owner: ContractAddress,
    /// Kind of structure.
    pub category: StructureCategory,
}

/// An army standing on a hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ArmyOccupant {
    /// Army entity id.
    pub army_id: ArmyId,
    /// Position.
    pub coord: HexCoord,
    /// Owning account.
    pub owner: ContractAddress,
    /// Troop type of the army.
    pub troop_type: TroopType,
    /// Troop tier of the army.
    pub tier: TroopTier,
    /// Troop count (precision-scaled).
    pub count: u128,
    /// Stamina as last written on chain.
    pub stamina: StaminaState,
    /// Armies tick at which the battle cooldown ends.
    pub battle_cooldown_end: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_coord_orders_by_column_then_row() {
        assert!(HexCoord::new(0, 5) < HexCoord::new(1, 0));
        assert!(HexCoord::new(1, -1) < HexCoord::new(1, 0));
    }

    #[test]
    fn total_troops_sums_types() {
        let force = TroopForce {
            knight_count: 3,
            paladin_count: 4,
            crossbowman_count: 5,
            ..TroopForce::default()
        };
        assert_eq!(force.total_troops(), 12);
        assert_eq!(force.count(TroopType::Paladin), 4);
    }

    #[test]
    fn snapshot_roundtrip_serde() {
        let account = ResourceAccount {
            raw_balance: 5_000_000_000,
            production_rate_per_tick: 2_000_000_000,
            last_updated_tick: 10,
            output_amount_left: 1_000_000_000_000,
            building_count: 2,
            is_food: false,
        };
        let json = serde_json::to_string(&account).unwrap_or_default();
        let restored: Result<ResourceAccount, _> = serde_json::from_str(&json);
        assert_eq!(restored.ok(), Some(account));
    }
}
