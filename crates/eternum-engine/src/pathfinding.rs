//! Shortest army path between two hexes.
//!
//! A* over the unbounded hex lattice. Every step costs one, the heuristic is
//! the exact hex distance, and the open list is a plain vector scanned for
//! the lowest `f` because searches are bounded by `max_distance` and stay
//! small.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use eternum_types::HexCoord;
use tracing::{debug, trace};

use crate::hex::{chebyshev_distance, hex_distance, neighbors};
use crate::occupancy::HexGrid;

#[derive(Debug, Clone, Copy)]
struct OpenNode {
    coord: HexCoord,
    g: u64,
    f: u64,
}

/// Find the shortest walkable path from `start` to `end`.
///
/// Returns every hex on the path, both ends included, or an empty vector
/// when `end` cannot be reached within `max_distance` steps. Structures
/// always block. Armies block too, except on `end` itself so a path can
/// finish on an enemy to engage it. Unexplored hexes are never entered.
pub fn find_shortest_path(
    start: HexCoord,
    end: HexCoord,
    grid: &HexGrid<'_>,
    max_distance: u64,
) -> Vec<HexCoord> {
    if chebyshev_distance(start, end) > max_distance {
        trace!(%start, %end, max_distance, "target beyond search radius");
        return Vec::new();
    }

    let mut open = vec![OpenNode {
        coord: start,
        g: 0,
        f: hex_distance(start, end),
    }];
    let mut closed: BTreeSet<HexCoord> = BTreeSet::new();
    let mut parents: BTreeMap<HexCoord, HexCoord> = BTreeMap::new();

    while let Some(index) = lowest_f(&open) {
        let current = open.remove(index);

        if current.coord == end {
            return reconstruct(&parents, start, end);
        }
        closed.insert(current.coord);

        let Some(g) = current.g.checked_add(1) else {
            continue;
        };
        if g > max_distance {
            continue;
        }

        for (_, next) in neighbors(current.coord) {
            if closed.contains(&next) || !grid.is_explored(next) || grid.has_structure(next) {
                continue;
            }
            if grid.has_army(next) && next != end {
                continue;
            }

            let f = g.saturating_add(hex_distance(next, end));
            match open.iter_mut().find(|node| node.coord == next) {
                Some(node) if g < node.g => {
                    node.g = g;
                    node.f = f;
                    parents.insert(next, current.coord);
                }
                Some(_) => {}
                None => {
                    open.push(OpenNode { coord: next, g, f });
                    parents.insert(next, current.coord);
                }
            }
        }
    }

    debug!(%start, %end, max_distance, expanded = closed.len(), "no path found");
    Vec::new()
}

/// Index of the open node with the lowest `f`; the earliest wins a tie.
fn lowest_f(open: &[OpenNode]) -> Option<usize> {
    open.iter()
        .enumerate()
        .min_by_key(|(index, node)| (node.f, *index))
        .map(|(index, _)| index)
}

fn reconstruct(
    parents: &BTreeMap<HexCoord, HexCoord>,
    start: HexCoord,
    end: HexCoord,
) -> Vec<HexCoord> {
    let mut path = VecDeque::new();
    let mut current = end;
    path.push_front(current);
    while current != start {
        let Some(&parent) = parents.get(&current) else {
            break;
        };
        path.push_front(parent);
        current = parent;
    }
    path.into_iter().collect()
}
