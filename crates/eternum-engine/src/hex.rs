//! Hex grid geometry for the world map.
//!
//! The map uses an offset layout in which even rows sit half a hex to the
//! right of odd rows, so a hex's six neighbours depend on its row parity.
//! The grid is unbounded; coordinates near the `i32` limits simply have
//! fewer neighbours.

use eternum_types::{HexCoord, HexDirection};

/// Neighbour offsets `(col, row)` for hexes on even rows, in
/// [`HexDirection::ALL`] order.
const EVEN_ROW_OFFSETS: [(i32, i32); 6] = [(1, 0), (1, 1), (0, 1), (-1, 0), (0, -1), (1, -1)];

/// Neighbour offsets `(col, row)` for hexes on odd rows, in
/// [`HexDirection::ALL`] order.
const ODD_ROW_OFFSETS: [(i32, i32); 6] = [(1, 0), (0, 1), (-1, 1), (-1, 0), (-1, -1), (0, -1)];

/// Whether `coord` lies on an even row. Negative rows follow two's
/// complement parity, so row `-1` is odd.
pub const fn is_even_row(coord: HexCoord) -> bool {
    coord.row & 1 == 0
}

const fn offset(coord: HexCoord, direction: HexDirection) -> (i32, i32) {
    let [east, north_east, north_west, west, south_west, south_east] = if is_even_row(coord) {
        EVEN_ROW_OFFSETS
    } else {
        ODD_ROW_OFFSETS
    };
    match direction {
        HexDirection::East => east,
        HexDirection::NorthEast => north_east,
        HexDirection::NorthWest => north_west,
        HexDirection::West => west,
        HexDirection::SouthWest => south_west,
        HexDirection::SouthEast => south_east,
    }
}

/// The hex adjacent to `coord` in `direction`, or `None` past the `i32`
/// edge.
pub const fn neighbor(coord: HexCoord, direction: HexDirection) -> Option<HexCoord> {
    let (dc, dr) = offset(coord, direction);
    let Some(col) = coord.col.checked_add(dc) else {
        return None;
    };
    let Some(row) = coord.row.checked_add(dr) else {
        return None;
    };
    Some(HexCoord::new(col, row))
}

/// All hexes adjacent to `coord` with the direction leading to each.
pub fn neighbors(coord: HexCoord) -> impl Iterator<Item = (HexDirection, HexCoord)> {
    HexDirection::ALL
        .into_iter()
        .filter_map(move |direction| neighbor(coord, direction).map(|n| (direction, n)))
}

/// Direction from `from` to an adjacent `to`, or `None` if they are not
/// neighbours.
pub fn direction_to(from: HexCoord, to: HexCoord) -> Option<HexDirection> {
    neighbors(from).find_map(|(direction, n)| (n == to).then_some(direction))
}

/// `max(|Δcol|, |Δrow|)`.
///
/// A step moves at most one column and one row, so this never exceeds the
/// true hex distance and is safe for rejecting unreachable targets early.
pub fn chebyshev_distance(a: HexCoord, b: HexCoord) -> u64 {
    let dc = i64::from(a.col).abs_diff(i64::from(b.col));
    let dr = i64::from(a.row).abs_diff(i64::from(b.row));
    dc.max(dr)
}

/// Axial `(q, r)` for an offset coordinate.
fn to_axial(coord: HexCoord) -> (i64, i64) {
    let row = i64::from(coord.row);
    // row + parity is always even, so the halving is exact
    let shift = row.saturating_add(row & 1).div_euclid(2);
    (i64::from(coord.col).saturating_sub(shift), row)
}

/// Number of steps between two hexes on an empty grid.
pub fn hex_distance(a: HexCoord, b: HexCoord) -> u64 {
    let (aq, ar) = to_axial(a);
    let (bq, br) = to_axial(b);
    let dq = aq.saturating_sub(bq);
    let dr = ar.saturating_sub(br);
    let ds = dq.saturating_add(dr);
    dq.unsigned_abs()
        .saturating_add(dr.unsigned_abs())
        .saturating_add(ds.unsigned_abs())
        .div_euclid(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn around(coord: HexCoord) -> Vec<HexCoord> {
        neighbors(coord).map(|(_, n)| n).collect()
    }

    #[test]
    fn even_row_neighbors() {
        assert_eq!(
            around(HexCoord::new(0, 0)),
            vec![
                HexCoord::new(1, 0),
                HexCoord::new(1, 1),
                HexCoord::new(0, 1),
                HexCoord::new(-1, 0),
                HexCoord::new(0, -1),
                HexCoord::new(1, -1),
            ]
        );
    }

    #[test]
    fn odd_row_neighbors() {
        assert_eq!(
            around(HexCoord::new(0, 1)),
            vec![
                HexCoord::new(1, 1),
                HexCoord::new(0, 2),
                HexCoord::new(-1, 2),
                HexCoord::new(-1, 1),
                HexCoord::new(-1, 0),
                HexCoord::new(0, 0),
            ]
        );
    }

    #[test]
    fn negative_rows_keep_parity() {
        assert!(!is_even_row(HexCoord::new(0, -1)));
        assert!(is_even_row(HexCoord::new(0, -2)));
        assert_eq!(
            neighbor(HexCoord::new(0, -1), HexDirection::NorthEast),
            Some(HexCoord::new(0, 0))
        );
    }

    #[test]
    fn adjacency_is_symmetric() {
        for coord in [HexCoord::new(3, 4), HexCoord::new(-2, -7), HexCoord::new(0, 0)] {
            for (_, n) in neighbors(coord) {
                assert!(around(n).contains(&coord), "{n} does not see {coord}");
                assert_eq!(hex_distance(coord, n), 1);
            }
        }
    }

    #[test]
    fn direction_roundtrip() {
        let origin = HexCoord::new(5, 3);
        for direction in HexDirection::ALL {
            let next = neighbor(origin, direction);
            assert_eq!(next.and_then(|n| direction_to(origin, n)), Some(direction));
        }
        assert_eq!(direction_to(origin, HexCoord::new(9, 9)), None);
    }

    #[test]
    fn grid_edge_has_fewer_neighbors() {
        assert_eq!(around(HexCoord::new(i32::MAX, 0)).len(), 3);
    }

    #[test]
    fn distances() {
        let origin = HexCoord::new(0, 0);
        assert_eq!(hex_distance(origin, HexCoord::new(2, 2)), 3);
        assert_eq!(hex_distance(origin, HexCoord::new(2, 1)), 2);
        assert_eq!(hex_distance(origin, HexCoord::new(-3, 0)), 3);
        assert_eq!(chebyshev_distance(origin, HexCoord::new(2, 2)), 2);
        assert_eq!(chebyshev_distance(HexCoord::new(-4, 1), HexCoord::new(3, -1)), 7);
    }

    #[test]
    fn chebyshev_never_exceeds_hex_distance() {
        for col in -4..=4 {
            for row in -4..=4 {
                let target = HexCoord::new(col, row);
                let origin = HexCoord::new(1, 1);
                assert!(chebyshev_distance(origin, target) <= hex_distance(origin, target));
            }
        }
    }
}
