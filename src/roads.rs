//! Road network construction
//!
//! Each settlement after the first is connected to the nearest cell that is
//! already a settlement or carries a road, via breadth-first search over the
//! staggered topology. All eight directions cost one hop; water is
//! impassable. Ties between equally short paths are broken by expansion
//! order, which is exactly the fixed table order in [`crate::topology`] — do
//! not reorder it.

use std::collections::{HashMap, VecDeque};

use crate::errors::GenError;
use crate::topology::{direction_between, offsets_for_row, TilePoint};
use crate::world::WorldGrid;

/// Find the shortest path from a newly placed settlement to the nearest
/// existing settlement or road cell.
///
/// Returns the path in target-to-start order, both endpoints included.
/// Exhausting the reachable region without a target is fatal: the settlement
/// can never join the road network, so the map is invalid.
pub fn connect_settlement(grid: &WorldGrid, start: TilePoint) -> Result<Vec<TilePoint>, GenError> {
    let mut queue: VecDeque<TilePoint> = VecDeque::new();
    // visited cell -> parent cell, for path reconstruction
    let mut visited: HashMap<TilePoint, TilePoint> = HashMap::new();
    queue.push_back(start);
    visited.insert(start, start);

    while let Some(current) = queue.pop_front() {
        if current != start && grid.is_road_target(current) {
            let mut path = Vec::new();
            let mut cursor = current;
            while cursor != start {
                path.push(cursor);
                cursor = visited[&cursor];
            }
            path.push(start);
            return Ok(path);
        }

        for &offset in offsets_for_row(current.y) {
            let next = current.offset(offset);
            if !grid.in_bounds(next) {
                continue;
            }
            if grid.terrain(next.x, next.y).is_water() {
                continue;
            }
            if !visited.contains_key(&next) {
                visited.insert(next, current);
                queue.push_back(next);
            }
        }
    }

    Err(GenError::NoRoadTarget {
        start,
        searched: visited.len(),
    })
}

/// Record road segments along a path.
///
/// Every interior cell gets the compass direction toward both its predecessor
/// and its successor; the endpoints get only the one they have. The direction
/// lookup shares the BFS parity tables, and an offset it cannot name is a
/// topology defect that propagates as an error.
pub fn carve_road(grid: &mut WorldGrid, path: &[TilePoint]) -> Result<(), GenError> {
    if path.len() < 2 {
        return Ok(());
    }

    for (i, &pos) in path.iter().enumerate() {
        if i > 0 {
            let toward_prev = direction_between(pos, path[i - 1])?;
            grid.add_road_segment(pos, toward_prev);
        }
        if i + 1 < path.len() {
            let toward_next = direction_between(pos, path[i + 1])?;
            grid.add_road_segment(pos, toward_next);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::Terrain;
    use crate::topology::Direction;

    fn test_grid() -> WorldGrid {
        WorldGrid::flat_for_tests(5, 5, Terrain::Plains)
    }

    fn mark_settlement(grid: &mut WorldGrid, x: i32, y: i32) {
        grid.place_settlement(
            TilePoint::new(x, y),
            crate::settlements::Settlement {
                name: "Test Hold".to_string(),
                tier: crate::settlements::SettlementTier::Capital,
                x,
                y,
                amulet: crate::settlements::AmuletColor::White,
                effect: None,
            },
        );
    }

    #[test]
    fn test_direct_path_to_road() {
        let mut grid = test_grid();
        mark_settlement(&mut grid, 1, 1);
        grid.add_road_segment(TilePoint::new(3, 1), Direction::East);

        let path = connect_settlement(&grid, TilePoint::new(1, 1)).expect("path");
        assert_eq!(
            path,
            vec![
                TilePoint::new(3, 1),
                TilePoint::new(2, 1),
                TilePoint::new(1, 1)
            ]
        );
    }

    #[test]
    fn test_direct_path_to_settlement() {
        let mut grid = test_grid();
        mark_settlement(&mut grid, 1, 1);
        mark_settlement(&mut grid, 1, 3);

        // North jumps two rows on this topology, so the path is one hop.
        let path = connect_settlement(&grid, TilePoint::new(1, 1)).expect("path");
        assert_eq!(path, vec![TilePoint::new(1, 3), TilePoint::new(1, 1)]);
    }

    #[test]
    fn test_path_avoids_water() {
        let mut grid = test_grid();
        mark_settlement(&mut grid, 1, 1);
        grid.set_terrain_for_tests(2, 1, Terrain::Water);
        grid.add_road_segment(TilePoint::new(4, 1), Direction::East);

        let path = connect_settlement(&grid, TilePoint::new(1, 1)).expect("path");
        assert_eq!(path.first(), Some(&TilePoint::new(4, 1)));
        assert_eq!(path.last(), Some(&TilePoint::new(1, 1)));
        assert!(
            !path.contains(&TilePoint::new(2, 1)),
            "path crossed the water cell: {path:?}"
        );
        // Endpoint really is a target.
        assert!(grid.is_road_target(path[0]));
    }

    #[test]
    fn test_exhausted_search_is_fatal() {
        let mut grid = test_grid();
        mark_settlement(&mut grid, 1, 1);
        // No other settlement and no roads anywhere.
        let err = connect_settlement(&grid, TilePoint::new(1, 1)).unwrap_err();
        match err {
            GenError::NoRoadTarget { start, searched } => {
                assert_eq!(start, TilePoint::new(1, 1));
                assert!(searched > 0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_carve_records_both_directions() {
        let mut grid = test_grid();
        // Straight east-west path along row 1.
        let path = vec![
            TilePoint::new(3, 1),
            TilePoint::new(2, 1),
            TilePoint::new(1, 1),
        ];
        carve_road(&mut grid, &path).expect("carve");

        let endpoint = grid.road_directions(3, 1);
        assert_eq!(endpoint.len(), 1);
        assert!(endpoint.contains(Direction::West));

        let middle = grid.road_directions(2, 1);
        assert_eq!(middle.len(), 2);
        assert!(middle.contains(Direction::East));
        assert!(middle.contains(Direction::West));

        let start = grid.road_directions(1, 1);
        assert_eq!(start.len(), 1);
        assert!(start.contains(Direction::East));
    }

    #[test]
    fn test_carve_ignores_trivial_path() {
        let mut grid = test_grid();
        carve_road(&mut grid, &[TilePoint::new(2, 2)]).expect("carve");
        assert!(grid.road_directions(2, 2).is_empty());
    }
}
