//! Staggered-grid adjacency model
//!
//! The overworld is drawn as diamond tiles in a zigzag layout: odd rows sit
//! half a tile to the right of even rows, so the eight neighbor offsets of a
//! cell depend on the parity of its row. Both offset tables live here and
//! nowhere else — pathfinding, road carving, and autotiling all index into
//! the same arrays. Re-deriving the tables locally in a consumer is how
//! subtle topology bugs happen.

use std::fmt;

use crate::errors::GenError;

/// A cell coordinate on the staggered grid.
///
/// Signed so that neighbor arithmetic can step off the map edge; bounds are
/// checked by whoever owns the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TilePoint {
    pub x: i32,
    pub y: i32,
}

impl TilePoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Grid-coordinate Manhattan distance (|dx| + |dy|).
    ///
    /// This is the settlement-spacing metric. It is deliberately not the same
    /// metric as road-path hop count over the staggered graph; the two are
    /// used by different subsystems and are kept separate.
    pub fn manhattan(self, other: TilePoint) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Step by a raw (dx, dy) offset.
    pub fn offset(self, delta: (i32, i32)) -> TilePoint {
        TilePoint::new(self.x + delta.0, self.y + delta.1)
    }
}

impl fmt::Display for TilePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Compass directions in the fixed table order: N, S, E, W, NE, NW, SE, SW.
///
/// The discriminant doubles as the index into the offset tables, so the enum
/// order must never change independently of [`OFFSETS`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

pub const DIR_N: usize = Direction::North as usize;
pub const DIR_S: usize = Direction::South as usize;
pub const DIR_E: usize = Direction::East as usize;
pub const DIR_W: usize = Direction::West as usize;
pub const DIR_NE: usize = Direction::NorthEast as usize;
pub const DIR_NW: usize = Direction::NorthWest as usize;
pub const DIR_SE: usize = Direction::SouthEast as usize;
pub const DIR_SW: usize = Direction::SouthWest as usize;

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Direction::North => "N",
            Direction::South => "S",
            Direction::East => "E",
            Direction::West => "W",
            Direction::NorthEast => "NE",
            Direction::NorthWest => "NW",
            Direction::SouthEast => "SE",
            Direction::SouthWest => "SW",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Neighbor offsets per row parity, indexed `OFFSETS[y mod 2][direction]`.
///
/// Because of the zigzag layout, N/S jump two rows while the diagonals jump
/// one, and the diagonal x-offsets flip between even and odd rows.
pub const OFFSETS: [[(i32, i32); 8]; 2] = [
    // even rows
    [
        (0, 2),   // N
        (0, -2),  // S
        (1, 0),   // E
        (-1, 0),  // W
        (0, -1),  // NE
        (-1, -1), // NW
        (0, 1),   // SE
        (-1, 1),  // SW
    ],
    // odd rows
    [
        (0, 2),  // N
        (0, -2), // S
        (1, 0),  // E
        (-1, 0), // W
        (1, -1), // NE
        (0, -1), // NW
        (1, 1),  // SE
        (0, 1),  // SW
    ],
];

/// The offset table for the row a cell sits on.
pub fn offsets_for_row(y: i32) -> &'static [(i32, i32); 8] {
    &OFFSETS[y.rem_euclid(2) as usize]
}

/// The adjacent cell in a given compass direction.
pub fn neighbor(p: TilePoint, dir: Direction) -> TilePoint {
    p.offset(offsets_for_row(p.y)[dir as usize])
}

/// Name the compass direction from one cell to an adjacent cell.
///
/// The lookup uses the same parity table as neighbor expansion. An offset
/// that matches none of the eight entries is a topology defect and is
/// reported as an error rather than defaulted.
pub fn direction_between(from: TilePoint, to: TilePoint) -> Result<Direction, GenError> {
    let delta = (to.x - from.x, to.y - from.y);
    let table = offsets_for_row(from.y);
    for (i, &entry) in table.iter().enumerate() {
        if entry == delta {
            return Ok(Direction::ALL[i]);
        }
    }
    Err(GenError::UnknownOffset { from, to })
}

/// A compact set of compass directions, used for per-cell road segments.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirectionSet(u8);

impl DirectionSet {
    pub const EMPTY: DirectionSet = DirectionSet(0);

    pub fn insert(&mut self, dir: Direction) {
        self.0 |= 1 << dir as u8;
    }

    pub fn contains(self, dir: Direction) -> bool {
        self.0 & (1 << dir as u8) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |d| self.contains(*d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_round_trip_both_parities() {
        for start in [TilePoint::new(5, 4), TilePoint::new(5, 5)] {
            for dir in Direction::ALL {
                let next = neighbor(start, dir);
                assert_eq!(
                    direction_between(start, next).unwrap(),
                    dir,
                    "round trip failed from {} toward {}",
                    start,
                    dir
                );
            }
        }
    }

    #[test]
    fn test_unknown_offset_is_an_error() {
        let from = TilePoint::new(2, 2);
        let to = TilePoint::new(5, 9);
        assert_eq!(
            direction_between(from, to),
            Err(GenError::UnknownOffset { from, to })
        );
    }

    #[test]
    fn test_parity_flips_diagonals() {
        // NE from an even row stays in the same column; from an odd row it
        // moves one column east.
        assert_eq!(
            neighbor(TilePoint::new(3, 2), Direction::NorthEast),
            TilePoint::new(3, 1)
        );
        assert_eq!(
            neighbor(TilePoint::new(3, 3), Direction::NorthEast),
            TilePoint::new(4, 2)
        );
    }

    #[test]
    fn test_direction_set() {
        let mut set = DirectionSet::EMPTY;
        assert!(set.is_empty());
        set.insert(Direction::North);
        set.insert(Direction::SouthWest);
        set.insert(Direction::North);
        assert_eq!(set.len(), 2);
        assert!(set.contains(Direction::North));
        assert!(!set.contains(Direction::East));
        let dirs: Vec<Direction> = set.iter().collect();
        assert_eq!(dirs, vec![Direction::North, Direction::SouthWest]);
    }
}
