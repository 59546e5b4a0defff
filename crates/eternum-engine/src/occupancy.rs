//! Map occupancy: who stands on which hex.
//!
//! The indexer reports explored tiles, structures, and armies. The
//! [`OccupancyCache`] holds the latest report keyed by [`HexCoord`] and is
//! rebuilt wholesale on every refresh, so an entity missing from the newest
//! report can never linger. [`HexGrid`] is a borrowed view over the three
//! maps that answers the blocking questions the pathfinder and movement
//! planner ask.
//!
//! Absence from the explored map means unknown, not empty.

use std::collections::BTreeMap;

use eternum_types::{
    ArmyId, ArmyOccupant, BiomeType, ContractAddress, ExploredTile, HexCoord, StructureId,
    StructureOccupant,
};
use serde::Serialize;
use tracing::debug;

/// Explored hexes and their biome.
pub type ExploredMap = BTreeMap<HexCoord, BiomeType>;
/// Structures by position.
pub type StructureMap = BTreeMap<HexCoord, StructureOccupant>;
/// Armies by position.
pub type ArmyMap = BTreeMap<HexCoord, ArmyOccupant>;

// ---------------------------------------------------------------------------
// Occupancy predicate
// ---------------------------------------------------------------------------

/// Army occupancy of one hex from a given army's point of view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HexOccupancy {
    /// Another army stands here.
    pub has_army: bool,
    /// That army belongs to the player.
    pub is_army_mine: bool,
    /// The selected army itself stands here (the hex counts as empty).
    pub is_self_army: bool,
}

/// Resolve army occupancy at `hex`.
///
/// The selected army never blocks itself; any other occupant is compared
/// against `player` to tell friend from foe.
pub fn resolve_occupancy_at_hex(
    armies: &ArmyMap,
    hex: HexCoord,
    selected_army_id: Option<ArmyId>,
    player: &ContractAddress,
) -> HexOccupancy {
    let Some(occupant) = armies.get(&hex) else {
        return HexOccupancy::default();
    };
    if selected_army_id == Some(occupant.army_id) {
        return HexOccupancy {
            is_self_army: true,
            ..HexOccupancy::default()
        };
    }
    HexOccupancy {
        has_army: true,
        is_army_mine: occupant.owner.same_account(player),
        is_self_army: false,
    }
}

// ---------------------------------------------------------------------------
// Grid view
// ---------------------------------------------------------------------------

/// Borrowed view of the map used by path searches.
#[derive(Debug, Clone, Copy)]
pub struct HexGrid<'a> {
    explored: &'a ExploredMap,
    structures: &'a StructureMap,
    armies: &'a ArmyMap,
    self_army: Option<ArmyId>,
    player: Option<&'a ContractAddress>,
}

impl<'a> HexGrid<'a> {
    /// View over explicit occupancy maps.
    pub const fn new(
        explored: &'a ExploredMap,
        structures: &'a StructureMap,
        armies: &'a ArmyMap,
    ) -> Self {
        Self {
            explored,
            structures,
            armies,
            self_army: None,
            player: None,
        }
    }

    /// Treat `army`'s own hex as empty.
    #[must_use]
    pub const fn with_self_army(mut self, army: ArmyId) -> Self {
        self.self_army = Some(army);
        self
    }

    /// Resolve ownership against `player`.
    #[must_use]
    pub const fn with_player(mut self, player: &'a ContractAddress) -> Self {
        self.player = Some(player);
        self
    }

    /// Biome of an explored hex.
    pub fn biome(&self, coord: HexCoord) -> Option<BiomeType> {
        self.explored.get(&coord).copied()
    }

    /// Whether the hex has been explored.
    pub fn is_explored(&self, coord: HexCoord) -> bool {
        self.explored.contains_key(&coord)
    }

    /// Whether a structure stands on the hex.
    pub fn has_structure(&self, coord: HexCoord) -> bool {
        self.structures.contains_key(&coord)
    }

    /// Whether an army other than the selected one stands on the hex.
    pub fn has_army(&self, coord: HexCoord) -> bool {
        self.armies
            .get(&coord)
            .is_some_and(|army| Some(army.army_id) != self.self_army)
    }

    /// Whether the hex is held by the player, by army or by structure.
    pub fn is_mine(&self, coord: HexCoord) -> bool {
        let Some(player) = self.player else {
            return false;
        };
        let army_mine = resolve_occupancy_at_hex(self.armies, coord, self.self_army, player)
            .is_army_mine;
        let structure_mine = self
            .structures
            .get(&coord)
            .is_some_and(|s| s.owner.same_account(player));
        army_mine || structure_mine
    }

    /// Explored and free of structures and other armies.
    pub fn is_traversable(&self, coord: HexCoord) -> bool {
        self.is_explored(coord) && !self.has_structure(coord) && !self.has_army(coord)
    }
}

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

/// One authoritative report of the map from the indexer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapSnapshot {
    /// Every explored tile.
    pub explored: Vec<ExploredTile>,
    /// Every structure.
    pub structures: Vec<StructureOccupant>,
    /// Every army.
    pub armies: Vec<ArmyOccupant>,
}

/// Latest known map occupancy, rebuilt wholesale on each refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccupancyCache {
    explored: ExploredMap,
    structures: StructureMap,
    armies: ArmyMap,
    army_positions: BTreeMap<ArmyId, HexCoord>,
    structure_positions: BTreeMap<StructureId, HexCoord>,
}

impl OccupancyCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cache from one snapshot.
    ///
    /// When two entities report the same hex the later one wins, and an id
    /// reported twice keeps only its later position.
    pub fn from_snapshot(snapshot: MapSnapshot) -> Self {
        let mut cache = Self::default();

        for tile in snapshot.explored {
            cache.explored.insert(tile.coord, tile.biome);
        }
        for structure in snapshot.structures {
            let id = structure.structure_id;
            let stale = cache
                .structure_positions
                .insert(id, structure.coord)
                .filter(|stale| {
                    cache
                        .structures
                        .get(stale)
                        .is_some_and(|held| held.structure_id == id)
                });
            if let Some(stale) = stale {
                cache.structures.remove(&stale);
            }
            let displaced = cache
                .structures
                .insert(structure.coord, structure)
                .filter(|previous| previous.structure_id != id);
            if let Some(previous) = displaced {
                cache.structure_positions.remove(&previous.structure_id);
            }
        }
        for army in snapshot.armies {
            let id = army.army_id;
            let stale = cache
                .army_positions
                .insert(id, army.coord)
                .filter(|stale| cache.armies.get(stale).is_some_and(|held| held.army_id == id));
            if let Some(stale) = stale {
                cache.armies.remove(&stale);
            }
            let displaced = cache
                .armies
                .insert(army.coord, army)
                .filter(|previous| previous.army_id != id);
            if let Some(previous) = displaced {
                cache.army_positions.remove(&previous.army_id);
            }
        }

        cache
    }

    /// Replace everything with `snapshot`.
    ///
    /// Nothing from the previous report survives.
    pub fn refresh(&mut self, snapshot: MapSnapshot) {
        *self = Self::from_snapshot(snapshot);
        debug!(
            explored = self.explored.len(),
            structures = self.structures.len(),
            armies = self.armies.len(),
            "occupancy refreshed"
        );
    }

    /// Explored tiles.
    pub const fn explored(&self) -> &ExploredMap {
        &self.explored
    }

    /// Structures by position.
    pub const fn structures(&self) -> &StructureMap {
        &self.structures
    }

    /// Armies by position.
    pub const fn armies(&self) -> &ArmyMap {
        &self.armies
    }

    /// Look up an army by id.
    pub fn army(&self, id: ArmyId) -> Option<&ArmyOccupant> {
        self.army_positions
            .get(&id)
            .and_then(|coord| self.armies.get(coord))
    }

    /// Look up a structure by id.
    pub fn structure(&self, id: StructureId) -> Option<&StructureOccupant> {
        self.structure_positions
            .get(&id)
            .and_then(|coord| self.structures.get(coord))
    }

    /// A grid view over the cached maps.
    pub const fn grid(&self) -> HexGrid<'_> {
        HexGrid::new(&self.explored, &self.structures, &self.armies)
    }
}
