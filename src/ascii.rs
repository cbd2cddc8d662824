//! ASCII rendering of generated worlds
//!
//! Debug view: one character per cell, settlements and roads drawn over the
//! terrain. The staggered layout is not reproduced; rows print flat.

use crate::terrain::Terrain;
use crate::world::WorldGrid;

/// Get ASCII character for a terrain type
pub fn terrain_char(terrain: Terrain) -> char {
    match terrain {
        Terrain::Undefined => ' ',
        Terrain::Water => '~',
        Terrain::Sand => '.',
        Terrain::Marsh => ',',
        Terrain::Plains => '"',
        Terrain::Forest => 'T',
        Terrain::Mountains => '^',
        Terrain::Snow => '*',
    }
}

/// Render a world to an ASCII string, overlaying settlements and roads.
pub fn render_map(grid: &WorldGrid) -> String {
    let mut result = String::with_capacity((grid.width + 1) * grid.height);

    for y in 0..grid.height as i32 {
        for x in 0..grid.width as i32 {
            let ch = if grid.is_settlement(x, y) {
                '#'
            } else if !grid.road_directions(x, y).is_empty() {
                '+'
            } else {
                terrain_char(grid.terrain(x, y))
            };
            result.push(ch);
        }
        result.push('\n');
    }

    result
}

/// Legend for the map characters
pub fn legend() -> String {
    "~ Water  . Sand  , Marsh  \" Plains  T Forest  ^ Mountains  * Snow  + Road  # Settlement\n"
        .to_string()
}
