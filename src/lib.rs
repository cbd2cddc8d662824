//! Procedural overworld generation for a staggered diamond-tile map
//!
//! The pipeline runs noise synthesis, terrain classification, settlement
//! placement, and road connection in one pass; [`world::WorldGrid`] is the
//! result and the query surface. [`autotile`] computes the edge transitions a
//! renderer needs to blend tile boundaries.

pub mod ascii;
pub mod autotile;
pub mod errors;
pub mod heightmap;
pub mod map_export;
pub mod roads;
pub mod seeds;
pub mod settlements;
pub mod terrain;
pub mod tilemap;
pub mod topology;
pub mod world;
