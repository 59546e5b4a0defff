//! What an army can do from where it stands.
//!
//! [`find_action_paths`] runs a stamina-weighted Dijkstra outward from the
//! army and labels every hex it can act on. Only explored, empty hexes are
//! walked through; an occupied or unexplored hex ends its path with an
//! attack, a reinforcement, or an exploration. [`plan_action_batches`] turns
//! one such path into the transactions that would carry it out.

use std::collections::BTreeMap;

use eternum_types::{ActionType, BiomeType, HexCoord, HexDirection, TroopType};
use serde::Serialize;
use tracing::trace;

use crate::config::StaminaConfig;
use crate::hex::{direction_to, neighbors};
use crate::occupancy::HexGrid;
use crate::stamina::travel_stamina_cost;

/// Limits on how far an army may act this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionBudget {
    /// Troop type, for biome travel costs.
    pub troop_type: TroopType,
    /// Stamina available now.
    pub stamina: u64,
    /// Most hexes the army can travel, usually bounded by food.
    pub max_hex: u64,
    /// Whether the army can afford to explore.
    pub can_explore: bool,
}

/// One hex on an action path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionStep {
    /// Position.
    pub hex: HexCoord,
    /// Action taken on entering the hex.
    pub action: ActionType,
    /// Biome, when explored.
    pub biome: Option<BiomeType>,
    /// Stamina spent on this step alone.
    pub stamina_cost: u64,
}

/// Every reachable hex with the cheapest path to it.
///
/// Each path starts with the army's own hex (a zero-cost `Move`) and ends on
/// the target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionPaths {
    paths: BTreeMap<HexCoord, Vec<ActionStep>>,
}

impl ActionPaths {
    /// Path to `hex`, if it is reachable.
    pub fn get(&self, hex: HexCoord) -> Option<&[ActionStep]> {
        self.paths.get(&hex).map(Vec::as_slice)
    }

    /// The action that ends the path to `hex`.
    pub fn action_at(&self, hex: HexCoord) -> Option<ActionType> {
        self.get(hex)
            .and_then(<[ActionStep]>::last)
            .map(|step| step.action)
    }

    /// Total stamina spent reaching `hex`.
    pub fn stamina_to(&self, hex: HexCoord) -> Option<u64> {
        self.get(hex).map(|steps| {
            steps
                .iter()
                .fold(0_u64, |sum, step| sum.saturating_add(step.stamina_cost))
        })
    }

    /// Reachable hexes and their paths, in coordinate order.
    pub fn iter(&self) -> impl Iterator<Item = (HexCoord, &[ActionStep])> {
        self.paths.iter().map(|(hex, steps)| (*hex, steps.as_slice()))
    }

    /// Number of reachable hexes.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether nothing is reachable.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

struct Frontier {
    hops: u64,
    path: Vec<ActionStep>,
}

/// Label every hex the army at `start` can act on.
///
/// `grid` should carry the player (for friend or foe) and the army itself
/// (so its own hex is not an obstacle). Hexes next to the army may be
/// attacked, reinforced, or explored; everything further out is reached by
/// walking explored, empty hexes within `budget`. Among equal-cost paths
/// the one queued first is kept.
///
/// `budget.max_hex` bounds travel only. With `max_hex == 0` the army can
/// still attack, reinforce, or explore an adjacent hex, since those act
/// from where it stands; only moving onto an explored hex is ruled out.
pub fn find_action_paths(
    start: HexCoord,
    grid: &HexGrid<'_>,
    budget: &ActionBudget,
    config: &StaminaConfig,
) -> ActionPaths {
    let origin = ActionStep {
        hex: start,
        action: ActionType::Move,
        biome: grid.biome(start),
        stamina_cost: 0,
    };

    let mut queue: BTreeMap<(u64, u64), Frontier> = BTreeMap::new();
    let mut sequence: u64 = 0;
    for (_, hex) in neighbors(start) {
        let Some(step) = first_step(hex, grid, budget, config) else {
            continue;
        };
        queue.insert(
            (step.stamina_cost, sequence),
            Frontier {
                hops: 1,
                path: vec![origin, step],
            },
        );
        sequence = sequence.saturating_add(1);
    }

    let mut lowest: BTreeMap<HexCoord, u64> = BTreeMap::new();
    let mut paths = BTreeMap::new();

    while let Some(((stamina_used, _), frontier)) = queue.pop_first() {
        let Some(current) = frontier.path.last().map(|step| step.hex) else {
            continue;
        };
        if lowest.get(&current).is_some_and(|&best| stamina_used >= best) {
            continue;
        }
        lowest.insert(current, stamina_used);
        paths.insert(current, frontier.path.clone());

        // armies, structures and the unknown end a path
        if !grid.is_traversable(current) {
            continue;
        }
        let hops = frontier.hops.saturating_add(1);
        if hops > budget.max_hex {
            continue;
        }

        for (_, next) in neighbors(current) {
            if next == start || !grid.is_traversable(next) {
                continue;
            }
            let Some(biome) = grid.biome(next) else {
                continue;
            };
            let cost = travel_stamina_cost(biome, budget.troop_type, config);
            let Some(next_used) = stamina_used.checked_add(cost) else {
                continue;
            };
            if next_used > budget.stamina
                || lowest.get(&next).is_some_and(|&best| next_used >= best)
            {
                continue;
            }

            let mut path = frontier.path.clone();
            path.push(ActionStep {
                hex: next,
                action: ActionType::Move,
                biome: Some(biome),
                stamina_cost: cost,
            });
            queue.insert((next_used, sequence), Frontier { hops, path });
            sequence = sequence.saturating_add(1);
        }
    }

    trace!(%start, reachable = paths.len(), "action paths computed");
    ActionPaths { paths }
}

fn first_step(
    hex: HexCoord,
    grid: &HexGrid<'_>,
    budget: &ActionBudget,
    config: &StaminaConfig,
) -> Option<ActionStep> {
    let biome = grid.biome(hex);
    if biome.is_none() && !budget.can_explore {
        return None;
    }

    let occupied = grid.has_army(hex) || grid.has_structure(hex);
    let (action, stamina_cost) = if grid.is_mine(hex) {
        (ActionType::Help, 0)
    } else if occupied {
        (ActionType::Attack, 0)
    } else if let Some(biome) = biome {
        // exploring is not travel, so only moves count against max_hex
        if budget.max_hex == 0 {
            return None;
        }
        (
            ActionType::Move,
            travel_stamina_cost(biome, budget.troop_type, config),
        )
    } else {
        (ActionType::Explore, config.explore_stamina_cost)
    };

    (stamina_cost <= budget.stamina).then_some(ActionStep {
        hex,
        action,
        biome,
        stamina_cost,
    })
}

// ---------------------------------------------------------------------------
// Batching
// ---------------------------------------------------------------------------

/// One transaction's worth of steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionBatch {
    /// What the batch does.
    pub action: ActionType,
    /// Directions walked, in order.
    pub directions: Vec<HexDirection>,
    /// Stamina the batch spends.
    pub stamina_cost: u64,
}

/// Group a path into executable batches.
///
/// Consecutive `Move` steps share one multi-hop travel batch; every other
/// step is a batch of its own. Returns `None` when two consecutive steps are
/// not neighbours.
pub fn plan_action_batches(path: &[ActionStep]) -> Option<Vec<ActionBatch>> {
    let mut batches: Vec<ActionBatch> = Vec::new();

    for pair in path.windows(2) {
        let [from, to] = pair else {
            continue;
        };
        let direction = direction_to(from.hex, to.hex)?;

        match batches.last_mut() {
            Some(batch) if batch.action == ActionType::Move && to.action == ActionType::Move => {
                batch.directions.push(direction);
                batch.stamina_cost = batch.stamina_cost.saturating_add(to.stamina_cost);
            }
            _ => batches.push(ActionBatch {
                action: to.action,
                directions: vec![direction],
                stamina_cost: to.stamina_cost,
            }),
        }
    }

    Some(batches)
}
