//! Noise-driven terrain field synthesis
//!
//! Combines four independent Perlin fields into one normalized scalar field:
//! a base elevation layer, a river layer whose mid-band carves water and
//! beaches, a desert layer that overrides mid-range elevations, and a forest
//! layer gated on both. A final 3x3 box smoothing pass removes the
//! high-frequency artifacts the overrides introduce.

use noise::{NoiseFn, Perlin, Seedable};

use crate::tilemap::Tilemap;

// Sampling frequencies for each layer (higher = smaller features)
const BASE_FREQUENCY: f64 = 8.0;
const RIVER_FREQUENCY: f64 = 4.0;
const FOREST_FREQUENCY: f64 = 12.0;
const DESERT_FREQUENCY: f64 = 6.0;

// fBm parameters shared by all four layers
const NOISE_OCTAVES: u32 = 3;
const NOISE_PERSISTENCE: f64 = 0.5;
const NOISE_LACUNARITY: f64 = 2.0;

// River layer bands: the outer band carves water, the inner band becomes beach
const RIVER_BAND_LO: f64 = 0.48;
const RIVER_BAND_HI: f64 = 0.52;
const RIVER_SHORE_LO: f64 = 0.49;
const RIVER_SHORE_HI: f64 = 0.51;
const RIVER_CARVE_FACTOR: f64 = 0.3;
const SHORE_VALUE: f64 = 0.42;

// Desert override: strong desert noise over mid-range base elevation
const DESERT_CUTOFF: f64 = 0.7;
const DESERT_VALUE: f64 = 0.65;

// Forest override: dense forest noise over mid-range base, outside deserts
const FOREST_CUTOFF: f64 = 0.6;
const FOREST_VALUE: f64 = 0.75;

/// Generate the composed, smoothed scalar field for a map.
///
/// Values are normalized to [0, 1]. The same seed and dimensions always
/// produce a bit-identical field.
pub fn generate_noise_field(width: usize, height: usize, seed: u32) -> Tilemap<f64> {
    let base_noise = Perlin::new(1).set_seed(seed);
    let river_noise = Perlin::new(1).set_seed(seed.wrapping_add(1));
    let forest_noise = Perlin::new(1).set_seed(seed.wrapping_add(2));
    let desert_noise = Perlin::new(1).set_seed(seed.wrapping_add(3));

    let mut field = Tilemap::new_with(width, height, 0.0f64);

    for y in 0..height {
        for x in 0..width {
            let nx = x as f64 / width as f64;
            let ny = y as f64 / height as f64;

            let base = sample(&base_noise, nx * BASE_FREQUENCY, ny * BASE_FREQUENCY);
            let river = sample(&river_noise, nx * RIVER_FREQUENCY, ny * RIVER_FREQUENCY);
            let forest = sample(&forest_noise, nx * FOREST_FREQUENCY, ny * FOREST_FREQUENCY);
            let desert = sample(&desert_noise, nx * DESERT_FREQUENCY, ny * DESERT_FREQUENCY);

            let mut value = base;

            // Carve river channels, with sandy shores in the inner band
            if river > RIVER_BAND_LO && river < RIVER_BAND_HI {
                value *= RIVER_CARVE_FACTOR;
                if river > RIVER_SHORE_LO && river < RIVER_SHORE_HI {
                    value = SHORE_VALUE;
                }
            }

            // Desert regions replace mid-range elevations
            if desert > DESERT_CUTOFF && base > 0.3 && base < 0.8 {
                value = DESERT_VALUE;
            }

            // Forest clusters, kept out of deserts
            if forest > FOREST_CUTOFF && base > 0.4 && base < 0.8 && desert < FOREST_CUTOFF {
                value = FOREST_VALUE;
            }

            field.set(x, y, value);
        }
    }

    box_smooth(&field)
}

/// Sample multi-octave noise normalized to [0, 1].
fn sample(noise: &Perlin, x: f64, y: f64) -> f64 {
    (fbm(noise, x, y, NOISE_OCTAVES, NOISE_PERSISTENCE, NOISE_LACUNARITY) + 1.0) / 2.0
}

/// Fractional Brownian Motion noise
fn fbm(
    noise: &impl NoiseFn<f64, 2>,
    x: f64,
    y: f64,
    octaves: u32,
    persistence: f64,
    lacunarity: f64,
) -> f64 {
    let mut total = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = 1.0;
    let mut max_value = 0.0;

    for _ in 0..octaves {
        total += amplitude * noise.get([x * frequency, y * frequency]);
        max_value += amplitude;
        amplitude *= persistence;
        frequency *= lacunarity;
    }

    total / max_value
}

/// Average every cell with its in-bounds 3x3 neighborhood.
fn box_smooth(field: &Tilemap<f64>) -> Tilemap<f64> {
    let width = field.width;
    let height = field.height;
    let mut smoothed = Tilemap::new_with(width, height, 0.0f64);

    for y in 0..height {
        for x in 0..width {
            let mut sum = 0.0;
            let mut count = 0.0;
            for dy in -1i32..=1 {
                for dx in -1i32..=1 {
                    let nx = x as i32 + dx;
                    let ny = y as i32 + dy;
                    if field.in_bounds(nx, ny) {
                        sum += *field.get(nx as usize, ny as usize);
                        count += 1.0;
                    }
                }
            }
            smoothed.set(x, y, sum / count);
        }
    }

    smoothed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_is_bit_identical() {
        let a = generate_noise_field(32, 24, 12345);
        let b = generate_noise_field(32, 24, 12345);
        for (x, y, value) in a.iter() {
            assert_eq!(value.to_bits(), b.get(x, y).to_bits(), "mismatch at ({x}, {y})");
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = generate_noise_field(32, 24, 1);
        let b = generate_noise_field(32, 24, 2);
        let differing = a
            .iter()
            .filter(|(x, y, value)| *value != b.get(*x, *y))
            .count();
        assert!(differing > 0, "distinct seeds produced identical fields");
    }

    #[test]
    fn test_values_are_normalized() {
        let field = generate_noise_field(40, 40, 7);
        for (x, y, value) in field.iter() {
            assert!(
                (0.0..=1.0).contains(value),
                "value {value} at ({x}, {y}) outside [0, 1]"
            );
        }
    }

    #[test]
    fn test_smoothing_averages_neighbors() {
        let mut field = Tilemap::new_with(3, 3, 0.0f64);
        field.set(1, 1, 0.9);
        let smoothed = box_smooth(&field);
        // Center averages the full 3x3 block; the corner only sees 4 cells.
        assert!((smoothed.get(1, 1) - 0.1).abs() < 1e-12);
        assert!((smoothed.get(0, 0) - 0.225).abs() < 1e-12);
    }
}
