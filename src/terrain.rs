//! Terrain classification from the smoothed noise field
//!
//! Maps scalar field values to discrete terrain through an ascending
//! threshold ladder, forces a water margin around the map edge, and collects
//! the cells eligible for settlement placement.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::tilemap::Tilemap;
use crate::topology::TilePoint;

// Ascending classification thresholds over the smoothed field
pub const WATER_THRESHOLD: f64 = 0.35;
pub const SAND_THRESHOLD: f64 = 0.43;
pub const MARSH_THRESHOLD: f64 = 0.45;
pub const PLAINS_THRESHOLD: f64 = 0.60;
pub const FOREST_THRESHOLD: f64 = 0.75;
pub const MOUNTAINS_THRESHOLD: f64 = 0.95;

// Forced-water margin around the map edge, in cells. Wider on the y axis
// because diamond rows are half-height.
const BORDER_X: i32 = 4;
const BORDER_Y: i32 = 8;

/// Number of decorative foliage variants per terrain type.
pub const FOLIAGE_VARIANTS: u8 = 11;

const WATER_FOLIAGE_CHANCE: f64 = 0.1;

/// Discrete terrain classification for a cell.
///
/// Ordered by visual dominance: a higher variant overlays a lower one at a
/// boundary. `Undefined` is the out-of-bounds answer, never generated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Terrain {
    #[default]
    Undefined,
    Water,
    Sand,
    Marsh,
    Plains,
    Forest,
    Mountains,
    Snow,
}

impl Terrain {
    pub fn name(self) -> &'static str {
        match self {
            Terrain::Undefined => "Undefined",
            Terrain::Water => "Water",
            Terrain::Sand => "Sand",
            Terrain::Marsh => "Marsh",
            Terrain::Plains => "Plains",
            Terrain::Forest => "Forest",
            Terrain::Mountains => "Mountains",
            Terrain::Snow => "Snow",
        }
    }

    pub fn is_water(self) -> bool {
        self == Terrain::Water
    }
}

/// Classify one smoothed field value.
pub fn classify(value: f64) -> Terrain {
    if value < WATER_THRESHOLD {
        Terrain::Water
    } else if value < SAND_THRESHOLD {
        Terrain::Sand
    } else if value < MARSH_THRESHOLD {
        Terrain::Marsh
    } else if value < PLAINS_THRESHOLD {
        Terrain::Plains
    } else if value < FOREST_THRESHOLD {
        Terrain::Forest
    } else if value < MOUNTAINS_THRESHOLD {
        Terrain::Mountains
    } else {
        Terrain::Snow
    }
}

/// Whether a cell falls in the forced-water border margin.
pub fn is_border(x: i32, y: i32, width: i32, height: i32) -> bool {
    x < BORDER_X || y < BORDER_Y || x > width - BORDER_X || y > height - BORDER_Y
}

/// A classified map: terrain per cell, decorative variants, and the cells
/// eligible for settlement placement.
pub struct Classified {
    pub terrain: Tilemap<Terrain>,
    pub foliage: Tilemap<Option<u8>>,
    pub candidates: Vec<TilePoint>,
}

/// Classify a whole field.
///
/// Border cells are forced to water regardless of their value and never
/// become settlement candidates. The foliage variant is a cosmetic per-cell
/// draw from the shared stream: land cells always get one, water cells only
/// occasionally, border cells never.
pub fn classify_field(field: &Tilemap<f64>, rng: &mut ChaCha8Rng) -> Classified {
    let width = field.width;
    let height = field.height;
    let mut terrain = Tilemap::new_with(width, height, Terrain::Undefined);
    let mut foliage = Tilemap::new_with(width, height, None);
    let mut candidates = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let variant = rng.gen_range(0..FOLIAGE_VARIANTS);
            let border = is_border(x as i32, y as i32, width as i32, height as i32);
            let class = if border {
                Terrain::Water
            } else {
                classify(*field.get(x, y))
            };
            terrain.set(x, y, class);

            let decorated = if border {
                None
            } else if class.is_water() {
                rng.gen_bool(WATER_FOLIAGE_CHANCE).then_some(variant)
            } else {
                Some(variant)
            };
            foliage.set(x, y, decorated);

            if !border && !class.is_water() {
                candidates.push(TilePoint::new(x as i32, y as i32));
            }
        }
    }

    Classified {
        terrain,
        foliage,
        candidates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_threshold_ladder() {
        assert_eq!(classify(0.0), Terrain::Water);
        assert_eq!(classify(0.34), Terrain::Water);
        assert_eq!(classify(0.40), Terrain::Sand);
        assert_eq!(classify(0.44), Terrain::Marsh);
        assert_eq!(classify(0.50), Terrain::Plains);
        assert_eq!(classify(0.70), Terrain::Forest);
        assert_eq!(classify(0.90), Terrain::Mountains);
        assert_eq!(classify(0.99), Terrain::Snow);
    }

    #[test]
    fn test_border_cells_force_water() {
        // A field of all-high values would classify as snow everywhere, but
        // the margin must still come out as water.
        let field = Tilemap::new_with(20, 30, 0.99f64);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let classified = classify_field(&field, &mut rng);

        for (x, y, class) in classified.terrain.iter() {
            if is_border(x as i32, y as i32, 20, 30) {
                assert_eq!(*class, Terrain::Water, "border cell ({x}, {y}) not water");
            } else {
                assert_eq!(*class, Terrain::Snow);
            }
        }
        assert_eq!(*classified.terrain.get(0, 15), Terrain::Water);
        assert_eq!(*classified.terrain.get(10, 0), Terrain::Water);
    }

    #[test]
    fn test_candidates_exclude_water_and_border() {
        let mut field = Tilemap::new_with(20, 30, 0.50f64);
        field.set(10, 15, 0.1); // interior water cell
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let classified = classify_field(&field, &mut rng);

        assert!(!classified.candidates.is_empty());
        for p in &classified.candidates {
            assert!(!is_border(p.x, p.y, 20, 30), "candidate {p} is in the border");
            assert!(
                !classified.terrain.get(p.x as usize, p.y as usize).is_water(),
                "candidate {p} is water"
            );
        }
        assert!(!classified.candidates.contains(&TilePoint::new(10, 15)));
    }

    #[test]
    fn test_land_cells_always_get_a_variant() {
        let field = Tilemap::new_with(20, 30, 0.50f64);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let classified = classify_field(&field, &mut rng);

        for p in &classified.candidates {
            let variant = classified.foliage.get(p.x as usize, p.y as usize);
            assert!(variant.is_some());
            assert!(variant.unwrap() < FOLIAGE_VARIANTS);
        }
    }
}
