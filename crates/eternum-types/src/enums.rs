//! Enumeration types shared by the engine and its callers.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Troops
// ---------------------------------------------------------------------------

/// The three troop resource types an army can be made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum TroopType {
    /// Melee infantry, strongest in forests.
    Knight,
    /// Cavalry, fastest on open ground.
    Paladin,
    /// Ranged infantry, strongest near water.
    Crossbowman,
}

impl TroopType {
    /// Every troop type, in contract order.
    pub const ALL: [Self; 3] = [Self::Knight, Self::Paladin, Self::Crossbowman];
}

/// Troop tier. Each tier multiplies per-unit strength linearly.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub enum TroopTier {
    /// Tier 1 (multiplier 1).
    #[default]
    T1,
    /// Tier 2 (multiplier 2).
    T2,
    /// Tier 3 (multiplier 3).
    T3,
}

impl TroopTier {
    /// The tier number, used directly as the strength multiplier.
    pub const fn number(self) -> u8 {
        match self {
            Self::T1 => 1,
            Self::T2 => 2,
            Self::T3 => 3,
        }
    }
}

// ---------------------------------------------------------------------------
// Map
// ---------------------------------------------------------------------------

/// Terrain biome of an explored hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum BiomeType {
    /// Deep water.
    DeepOcean,
    /// Shallow water.
    Ocean,
    /// Coastline.
    Beach,
    /// Burnt wasteland.
    Scorched,
    /// Barren rock.
    Bare,
    /// Frozen plain.
    Tundra,
    /// Snowfield.
    Snow,
    /// Cold desert.
    TemperateDesert,
    /// Scrub.
    Shrubland,
    /// Boreal forest.
    Taiga,
    /// Open grassland.
    Grassland,
    /// Temperate broadleaf forest.
    TemperateDeciduousForest,
    /// Temperate rain forest.
    TemperateRainForest,
    /// Hot desert.
    SubtropicalDesert,
    /// Monsoon forest.
    TropicalSeasonalForest,
    /// Tropical rain forest.
    TropicalRainForest,
}

/// One of the six neighbour directions of a hex.
///
/// The discriminants match the direction ids the contract accepts in
/// movement calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum HexDirection {
    /// Same row, next column.
    East = 0,
    /// Row above, to the right.
    NorthEast = 1,
    /// Row above, to the left.
    NorthWest = 2,
    /// Same row, previous column.
    West = 3,
    /// Row below, to the left.
    SouthWest = 4,
    /// Row below, to the right.
    SouthEast = 5,
}

impl HexDirection {
    /// All six directions in contract order.
    pub const ALL: [Self; 6] = [
        Self::East,
        Self::NorthEast,
        Self::NorthWest,
        Self::West,
        Self::SouthWest,
        Self::SouthEast,
    ];

    /// The contract's numeric id for this direction.
    pub const fn id(self) -> u8 {
        self as u8
    }
}

/// Category of a structure occupying a hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum StructureCategory {
    /// A player realm.
    Realm,
    /// A shared hyperstructure.
    Hyperstructure,
    /// A bank hosting AMM pools.
    Bank,
    /// A fragment mine.
    FragmentMine,
    /// A village attached to a realm.
    Village,
}

/// What an army would do on arriving at a reachable hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum ActionType {
    /// Travel onto an explored, empty hex.
    Move,
    /// Reveal an unexplored hex.
    Explore,
    /// Engage a hostile army or structure.
    Attack,
    /// Reinforce a friendly army or structure.
    Help,
}
