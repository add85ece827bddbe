//! Deterministic white noise.

use super::Noise;

/// Hash-style white noise in [-1, 1].
///
/// Every coordinate triple maps to an independent-looking value, but the
/// mapping is a pure function of the coordinates and the seed.
#[derive(Debug, Clone, Copy)]
pub struct WhiteNoise {
    seed: f64,
}

impl WhiteNoise {
    /// Only the low 16 bits of `seed` are used. Larger seeds would swamp
    /// the coordinate terms inside `sin` and flatten the output.
    pub fn new(seed: u64) -> Self {
        Self {
            seed: (seed & 0xFFFF) as f64,
        }
    }
}

impl Noise for WhiteNoise {
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let n = (x * 12.9898 + y * 78.233 + z * 37.719 + self.seed * 43758.5453).sin() * 43758.5453;
        (n - n.floor()) * 2.0 - 1.0
    }
}
