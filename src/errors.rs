//! Error types for map generation
//!
//! Generation either completes or fails with one of these; there are no
//! retries. A failed road search means the map would violate the
//! every-settlement-is-reachable invariant, so the whole build aborts.

use std::fmt;

use crate::topology::TilePoint;

/// Errors that can abort map generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenError {
    /// Road BFS exhausted the reachable region without finding another
    /// settlement or an existing road. Carries the searched-cell count so the
    /// caller can tell a landlocked pocket from a topology bug.
    NoRoadTarget { start: TilePoint, searched: usize },
    /// An offset between two cells matched neither parity table. This is a
    /// programming defect in whatever produced the pair, never map data.
    UnknownOffset { from: TilePoint, to: TilePoint },
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenError::NoRoadTarget { start, searched } => write!(
                f,
                "road search from {} found no settlement or road after visiting {} cells",
                start, searched
            ),
            GenError::UnknownOffset { from, to } => write!(
                f,
                "offset from {} to {} is not one of the eight known directions",
                from, to
            ),
        }
    }
}

impl std::error::Error for GenError {}
