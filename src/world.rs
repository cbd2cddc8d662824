//! World grid container and the one-shot generation pipeline
//!
//! Bundles the classified terrain, settlements, and road network into a
//! single structure and exposes the query surface consumed by rendering and
//! UI collaborators. Generation is synchronous and runs once: the caller
//! either gets a fully built grid or an error.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::autotile::{self, ClassSource, TileClass, Transition};
use crate::errors::GenError;
use crate::heightmap;
use crate::seeds::WorldSeeds;
use crate::settlements::{self, Settlement};
use crate::terrain::{self, Terrain};
use crate::tilemap::Tilemap;
use crate::topology::{Direction, DirectionSet, TilePoint};

/// One grid position. Terrain and decoration are written during
/// classification; settlement and road fields during placement and carving.
/// Nothing mutates after generation returns.
#[derive(Clone, Debug, Default)]
pub struct TerrainCell {
    pub terrain: Terrain,
    /// Decorative variant index, cosmetic only.
    pub foliage_variant: Option<u8>,
    /// Compass directions of road segments crossing this cell.
    pub roads: DirectionSet,
    pub settlement: Option<Settlement>,
}

impl TerrainCell {
    pub fn is_settlement(&self) -> bool {
        self.settlement.is_some()
    }

    pub fn is_road(&self) -> bool {
        !self.roads.is_empty()
    }
}

/// Parameters for a generation run.
#[derive(Clone, Copy, Debug)]
pub struct GenParams {
    pub width: usize,
    pub height: usize,
    pub seed: u64,
    pub settlement_count: usize,
    pub min_settlement_spacing: i32,
}

/// Counts reported back from a completed generation run.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct GenerationReport {
    pub settlements_requested: usize,
    pub settlements_placed: usize,
}

/// The generated overworld.
pub struct WorldGrid {
    pub width: usize,
    pub height: usize,
    pub seeds: WorldSeeds,
    pub report: GenerationReport,
    cells: Tilemap<TerrainCell>,
    settlements: Vec<TilePoint>,
}

impl WorldGrid {
    /// Generate a complete overworld map.
    ///
    /// The noise field is deterministic in the seed and dimensions alone;
    /// settlement placement and road tie-breaks consume a stream derived
    /// from the same master seed, so the whole run is reproducible.
    pub fn generate(params: &GenParams) -> Result<WorldGrid, GenError> {
        let seeds = WorldSeeds::from_master(params.seed);
        let mut rng = ChaCha8Rng::seed_from_u64(seeds.settlements);

        let field =
            heightmap::generate_noise_field(params.width, params.height, seeds.noise as u32);
        let classified = terrain::classify_field(&field, &mut rng);

        let mut cells = Tilemap::new(params.width, params.height);
        for y in 0..params.height {
            for x in 0..params.width {
                cells.set(
                    x,
                    y,
                    TerrainCell {
                        terrain: *classified.terrain.get(x, y),
                        foliage_variant: *classified.foliage.get(x, y),
                        roads: DirectionSet::EMPTY,
                        settlement: None,
                    },
                );
            }
        }

        let mut grid = WorldGrid {
            width: params.width,
            height: params.height,
            seeds,
            report: GenerationReport {
                settlements_requested: params.settlement_count,
                settlements_placed: 0,
            },
            cells,
            settlements: Vec::new(),
        };

        let report = settlements::place_settlements(
            &mut grid,
            &classified.candidates,
            params.settlement_count,
            params.min_settlement_spacing,
            &mut rng,
        )?;
        grid.report = GenerationReport {
            settlements_requested: report.requested,
            settlements_placed: report.placed,
        };

        Ok(grid)
    }

    pub fn in_bounds(&self, p: TilePoint) -> bool {
        self.cells.in_bounds(p.x, p.y)
    }

    fn cell(&self, p: TilePoint) -> &TerrainCell {
        self.cells.get(p.x as usize, p.y as usize)
    }

    /// Terrain at a coordinate; out of bounds reads as `Undefined`.
    pub fn terrain(&self, x: i32, y: i32) -> Terrain {
        if !self.cells.in_bounds(x, y) {
            return Terrain::Undefined;
        }
        self.cells.get(x as usize, y as usize).terrain
    }

    /// Road segment directions at a coordinate; empty out of bounds.
    pub fn road_directions(&self, x: i32, y: i32) -> DirectionSet {
        if !self.cells.in_bounds(x, y) {
            return DirectionSet::EMPTY;
        }
        self.cells.get(x as usize, y as usize).roads
    }

    pub fn is_settlement(&self, x: i32, y: i32) -> bool {
        self.cells.in_bounds(x, y) && self.cell(TilePoint::new(x, y)).is_settlement()
    }

    pub fn settlement(&self, x: i32, y: i32) -> Option<&Settlement> {
        if !self.cells.in_bounds(x, y) {
            return None;
        }
        self.cell(TilePoint::new(x, y)).settlement.as_ref()
    }

    /// Cosmetic foliage variant at a coordinate, if the cell has one.
    pub fn foliage_variant(&self, x: i32, y: i32) -> Option<u8> {
        if !self.cells.in_bounds(x, y) {
            return None;
        }
        self.cells.get(x as usize, y as usize).foliage_variant
    }

    /// Locations of placed settlements, in placement order.
    pub fn settlement_locations(&self) -> &[TilePoint] {
        &self.settlements
    }

    /// Iterate over placed settlements in placement order.
    pub fn settlements(&self) -> impl Iterator<Item = &Settlement> {
        self.settlements
            .iter()
            .filter_map(|p| self.cell(*p).settlement.as_ref())
    }

    /// Edge transitions needed to render a tile against its neighbors.
    pub fn transitions(&self, x: i32, y: i32) -> Vec<Transition> {
        autotile::get_transitions(TilePoint::new(x, y), self)
    }

    /// Whether a cell terminates a road search: an existing settlement or a
    /// cell that already carries a road segment.
    pub(crate) fn is_road_target(&self, p: TilePoint) -> bool {
        let cell = self.cell(p);
        cell.is_settlement() || cell.is_road()
    }

    pub(crate) fn place_settlement(&mut self, p: TilePoint, settlement: Settlement) {
        self.cells.get_mut(p.x as usize, p.y as usize).settlement = Some(settlement);
        self.settlements.push(p);
    }

    pub(crate) fn settlement_mut(&mut self, p: TilePoint) -> Option<&mut Settlement> {
        self.cells
            .get_mut(p.x as usize, p.y as usize)
            .settlement
            .as_mut()
    }

    pub(crate) fn add_road_segment(&mut self, p: TilePoint, dir: Direction) {
        self.cells.get_mut(p.x as usize, p.y as usize).roads.insert(dir);
    }

    /// Uniform grid for unit tests, bypassing the noise pipeline.
    #[cfg(test)]
    pub(crate) fn flat_for_tests(width: usize, height: usize, terrain: Terrain) -> WorldGrid {
        let mut cells: Tilemap<TerrainCell> = Tilemap::new(width, height);
        for y in 0..height {
            for x in 0..width {
                cells.get_mut(x, y).terrain = terrain;
            }
        }
        WorldGrid {
            width,
            height,
            seeds: WorldSeeds::from_master(0),
            report: GenerationReport {
                settlements_requested: 0,
                settlements_placed: 0,
            },
            cells,
            settlements: Vec::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn set_terrain_for_tests(&mut self, x: i32, y: i32, terrain: Terrain) {
        self.cells.get_mut(x as usize, y as usize).terrain = terrain;
    }
}

/// The autotiler reads the dense grid through the same seam as its sparse
/// fixtures: populated means in bounds, and classes collapse through the
/// documented 7-to-3 mapping.
impl ClassSource for WorldGrid {
    fn class(&self, p: TilePoint) -> TileClass {
        TileClass::from_terrain(self.terrain(p.x, p.y))
    }

    fn contains(&self, p: TilePoint) -> bool {
        self.in_bounds(p)
    }
}

/// Convenience wrapper over [`WorldGrid::generate`].
pub fn generate(
    width: usize,
    height: usize,
    seed: u64,
    settlement_count: usize,
    min_settlement_spacing: i32,
) -> Result<WorldGrid, GenError> {
    WorldGrid::generate(&GenParams {
        width,
        height,
        seed,
        settlement_count,
        min_settlement_spacing,
    })
}
