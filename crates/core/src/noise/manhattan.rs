//! Stateless trigonometric pseudo-noise.

use super::Noise;

/// `(|sin(x+y+z)| + |sin(x−y+z)| + |sin(x+y−z)|) mod 1`, in [0, 1).
///
/// No state, no seed, no construction cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManhattanNoise;

impl Noise for ManhattanNoise {
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        ((x + y + z).sin().abs() + (x - y + z).sin().abs() + (x + y - z).sin().abs()) % 1.0
    }
}
