//! Edge autotiling for seamless terrain transitions
//!
//! Each diamond tile has vertices N, E, S, W and edges NW, NE, SE, SW. When a
//! neighbor across an edge has a more dominant tile class, that class pushes
//! a transition graphic onto this tile's edge. Each edge additionally tracks
//! whether its two corner vertices are "open" (the diagonal tile sharing the
//! vertex blends into the same transition) or "closed" (the edge needs a
//! capped terminator).
//!
//! The dominance domain here is deliberately coarser than the generation
//! terrain enum: three classes, totally ordered. Keep the two domains apart
//! and convert through [`TileClass::from_terrain`].

use std::collections::HashMap;
use std::fmt;

use crate::terrain::Terrain;
use crate::topology::{offsets_for_row, TilePoint, DIR_E, DIR_NE, DIR_NW, DIR_SE, DIR_SW, DIR_W};

/// Tile class for autotiling. Ordering is dominance: the lowest variant never
/// receives a transition overlay, and a higher class always draws its edge
/// onto a lower neighbor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TileClass {
    Plains,
    Forest,
    Water,
}

impl TileClass {
    /// Collapse the 7-way generation terrain into the 3-way dominance domain.
    /// Water stays water, forest stays forest, and every other terrain
    /// (including the out-of-bounds `Undefined`) renders on a plains base.
    pub fn from_terrain(terrain: Terrain) -> TileClass {
        match terrain {
            Terrain::Water => TileClass::Water,
            Terrain::Forest => TileClass::Forest,
            _ => TileClass::Plains,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TileClass::Plains => "Plains",
            TileClass::Forest => "Forest",
            TileClass::Water => "Water",
        }
    }
}

impl fmt::Display for TileClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The four diamond edges a transition can sit on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeSide {
    NorthWest,
    NorthEast,
    SouthEast,
    SouthWest,
}

impl EdgeSide {
    pub fn label(self) -> &'static str {
        match self {
            EdgeSide::NorthWest => "NW",
            EdgeSide::NorthEast => "NE",
            EdgeSide::SouthEast => "SE",
            EdgeSide::SouthWest => "SW",
        }
    }

    /// The vertex letters at either end of the edge, in label order.
    fn corners(self) -> (char, char) {
        let label = self.label().as_bytes();
        (label[0] as char, label[1] as char)
    }
}

impl fmt::Display for EdgeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The edge graphic needed on one side of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    /// Which diamond edge the transition sits on.
    pub side: EdgeSide,
    /// The dominant class pushing in across that edge.
    pub source: TileClass,
    /// Whether the first corner of the side (e.g. N for "NW") is open.
    pub open1: bool,
    /// Whether the second corner of the side (e.g. W for "NW") is open.
    pub open2: bool,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (c1, c2) = self.side.corners();
        let s1 = if self.open1 { "Open" } else { "Closed" };
        let s2 = if self.open2 { "Open" } else { "Closed" };
        write!(
            f,
            "[{} Edge] Type: {} | {}: {} | {}: {}",
            self.side, self.source, c1, s1, c2, s2
        )
    }
}

/// Source of tile classes for the resolver.
///
/// `class` answers for any coordinate (absent cells read as the lowest
/// class); `contains` distinguishes populated cells, because an absent
/// diagonal always counts as a closed corner.
pub trait ClassSource {
    fn class(&self, p: TilePoint) -> TileClass;
    fn contains(&self, p: TilePoint) -> bool;
}

/// A sparse class grid, handy for fixtures and standalone autotiling.
pub struct ClassGrid {
    grid: HashMap<TilePoint, TileClass>,
    pub width: usize,
    pub height: usize,
}

impl ClassGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid: HashMap::new(),
            width,
            height,
        }
    }

    pub fn set(&mut self, x: i32, y: i32, class: TileClass) {
        self.grid.insert(TilePoint::new(x, y), class);
    }
}

impl ClassSource for ClassGrid {
    fn class(&self, p: TilePoint) -> TileClass {
        self.grid.get(&p).copied().unwrap_or(TileClass::Plains)
    }

    fn contains(&self, p: TilePoint) -> bool {
        self.grid.contains_key(&p)
    }
}

/// Calculate all edge transitions needed for one tile.
///
/// Corner adjacency (the tile across each vertex for a given edge):
///
///   NW: N corner -> NE neighbor, W corner -> SW neighbor
///   NE: N corner -> NW neighbor, E corner -> SE neighbor
///   SE: S corner -> SW neighbor, E corner -> NE neighbor
///   SW: S corner -> SE neighbor, W corner -> NW neighbor
///
/// A corner is open when the diagonal tile across the vertex also transitions
/// to the same source class on the matching side. After the four edges are
/// computed independently, a consistency pass fixes the two side-sharing
/// vertices (west for NW/SW, east for NE/SE) so that junctions of three or
/// more same-class regions blend without seams.
pub fn get_transitions(pos: TilePoint, world: &impl ClassSource) -> Vec<Transition> {
    let mut transitions: Vec<Transition> = Vec::new();
    let my_class = world.class(pos);
    let d = offsets_for_row(pos.y);

    let is_corner_open = |adj_idx: usize, side_idx: usize, source: TileClass| -> bool {
        let adj = pos.offset(d[adj_idx]);
        if !world.contains(adj) {
            return false;
        }
        let adj_class = world.class(adj);
        let adj_d = offsets_for_row(adj.y);
        let adj_neighbor_class = world.class(adj.offset(adj_d[side_idx]));
        adj_neighbor_class == source && source >= adj_class
    };

    let mut check_edge = |side_idx: usize, side: EdgeSide, corner1_adj: usize, corner2_adj: usize| {
        let neighbor_class = world.class(pos.offset(d[side_idx]));
        if neighbor_class > my_class {
            transitions.push(Transition {
                side,
                source: neighbor_class,
                open1: is_corner_open(corner1_adj, side_idx, neighbor_class),
                open2: is_corner_open(corner2_adj, side_idx, neighbor_class),
            });
        }
    };

    check_edge(DIR_NW, EdgeSide::NorthWest, DIR_NE, DIR_SW);
    check_edge(DIR_NE, EdgeSide::NorthEast, DIR_NW, DIR_SE);
    check_edge(DIR_SE, EdgeSide::SouthEast, DIR_SW, DIR_NE);
    check_edge(DIR_SW, EdgeSide::SouthWest, DIR_SE, DIR_NW);

    let mut fix_vertex = |cardinal_idx: usize, edge1: EdgeSide, edge2: EdgeSide| {
        // A fully enclosed tile needs no correction.
        if transitions.len() == 4 {
            return;
        }
        let e1 = transitions.iter().position(|t| t.side == edge1);
        let e2 = transitions.iter().position(|t| t.side == edge2);
        let (Some(e1), Some(e2)) = (e1, e2) else {
            return;
        };
        if transitions[e1].source != transitions[e2].source {
            return;
        }
        let cardinal_class = world.class(pos.offset(d[cardinal_idx]));
        if cardinal_class != transitions[e1].source {
            return;
        }
        transitions[e1].open2 = true;
        transitions[e2].open1 = true;
        transitions[e2].open2 = false;
    };

    fix_vertex(DIR_W, EdgeSide::NorthWest, EdgeSide::SouthWest);
    fix_vertex(DIR_E, EdgeSide::NorthEast, EdgeSide::SouthEast);

    transitions
}
