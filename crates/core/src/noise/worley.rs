//! Worley (cellular) noise on a toroidal feature-point lattice.
//!
//! The lattice holds one jittered feature point per cell of a
//! `GRID_SIZE³` grid. It is built once per construction; sampling only
//! reads it.

use super::Noise;
use glam::DVec3;

/// Cells per axis. The noise repeats with this period on every axis.
pub const GRID_SIZE: usize = 32;

/// Normalization divisor for the minimum Manhattan distance.
///
/// The nearest feature point is never farther than the one in the query's
/// own cell, which is at most 3 away, so results stay in [0, 1].
const DISTANCE_NORM: f64 = 3.0;

/// Cellular noise: the Manhattan distance to the nearest feature point,
/// divided by 3.
#[derive(Clone)]
pub struct WorleyNoise {
    points: Vec<DVec3>,
}

impl WorleyNoise {
    /// Builds the full `GRID_SIZE³` lattice, jittering each feature point
    /// inside its cell by a hash of the cell coordinates and `seed`.
    pub fn new(seed: u64) -> Self {
        let n = GRID_SIZE;
        let mut points = Vec::with_capacity(n * n * n);
        for cz in 0..n {
            for cy in 0..n {
                for cx in 0..n {
                    let cell = DVec3::new(cx as f64, cy as f64, cz as f64);
                    points.push(cell + jitter(seed, [cx, cy, cz]));
                }
            }
        }
        Self { points }
    }

    /// Feature point of a cell given in-range cell indices.
    fn feature_point(&self, [cx, cy, cz]: [usize; 3]) -> Option<DVec3> {
        let n = GRID_SIZE;
        self.points.get((cz * n + cy) * n + cx).copied()
    }
}

/// SplitMix64 finalizer.
fn mix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Offset in [0, 1)³ for a cell, a pure function of the seed and coordinates.
fn jitter(seed: u64, [cx, cy, cz]: [usize; 3]) -> DVec3 {
    let key = seed
        ^ (cx as u64).wrapping_mul(0x8CB9_2BA7_2F3D_8DD7)
        ^ (cy as u64).wrapping_mul(0xD6E8_FEB8_6659_FD93)
        ^ (cz as u64).wrapping_mul(0xA076_1D64_78BD_642F);
    let a = mix64(key);
    let b = mix64(a);
    let c = mix64(b);
    let unit = |h: u64| (h >> 11) as f64 / (1u64 << 53) as f64;
    DVec3::new(unit(a), unit(b), unit(c))
}

impl Noise for WorleyNoise {
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let period = GRID_SIZE as f64;
        let p = DVec3::new(
            x.rem_euclid(period),
            y.rem_euclid(period),
            z.rem_euclid(period),
        );
        if p.is_nan() {
            return f64::NAN;
        }

        let base = p.floor();
        let (bx, by, bz) = (base.x as i64, base.y as i64, base.z as i64);
        let n = GRID_SIZE as i64;
        let mut nearest = f64::INFINITY;

        for dz in -1..=1 {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    let neighbour = [bx + dx, by + dy, bz + dz];
                    let wrapped = neighbour.map(|c| c.rem_euclid(n));
                    let Some(point) = self.feature_point(wrapped.map(|c| c as usize)) else {
                        continue;
                    };
                    // Move the stored point to the unwrapped neighbour so
                    // distances across the seam are measured correctly.
                    let shift = DVec3::new(
                        (neighbour[0] - wrapped[0]) as f64,
                        (neighbour[1] - wrapped[1]) as f64,
                        (neighbour[2] - wrapped[2]) as f64,
                    );
                    let d = (point + shift - p).abs().element_sum();
                    nearest = nearest.min(d);
                }
            }
        }

        nearest / DISTANCE_NORM
    }
}
