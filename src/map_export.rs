//! PNG export of generated worlds
//!
//! One pixel per cell with flat terrain colors, roads and settlements drawn
//! on top. Meant for quickly eyeballing a seed, not for in-game rendering.

use std::error::Error;

use image::{Rgb, RgbImage};

use crate::terrain::Terrain;
use crate::world::WorldGrid;

const ROAD_COLOR: Rgb<u8> = Rgb([120, 90, 60]);
const SETTLEMENT_COLOR: Rgb<u8> = Rgb([220, 40, 40]);

/// Flat color per terrain type
pub fn terrain_color(terrain: Terrain) -> Rgb<u8> {
    match terrain {
        Terrain::Undefined => Rgb([0, 0, 0]),
        Terrain::Water => Rgb([40, 80, 160]),
        Terrain::Sand => Rgb([210, 190, 140]),
        Terrain::Marsh => Rgb([110, 140, 90]),
        Terrain::Plains => Rgb([90, 160, 70]),
        Terrain::Forest => Rgb([40, 100, 45]),
        Terrain::Mountains => Rgb([130, 120, 110]),
        Terrain::Snow => Rgb([235, 235, 240]),
    }
}

/// Export the world as a PNG image, one pixel per cell.
pub fn export_png(grid: &WorldGrid, path: &str) -> Result<(), Box<dyn Error>> {
    let mut img = RgbImage::new(grid.width as u32, grid.height as u32);

    for y in 0..grid.height as i32 {
        for x in 0..grid.width as i32 {
            let color = if grid.is_settlement(x, y) {
                SETTLEMENT_COLOR
            } else if !grid.road_directions(x, y).is_empty() {
                ROAD_COLOR
            } else {
                terrain_color(grid.terrain(x, y))
            };
            img.put_pixel(x as u32, y as u32, color);
        }
    }

    img.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terrain_colors_are_distinct() {
        let all = [
            Terrain::Water,
            Terrain::Sand,
            Terrain::Marsh,
            Terrain::Plains,
            Terrain::Forest,
            Terrain::Mountains,
            Terrain::Snow,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in all.iter().skip(i + 1) {
                assert_ne!(terrain_color(*a), terrain_color(*b));
            }
        }
    }
}
