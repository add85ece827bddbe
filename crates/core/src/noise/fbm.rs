//! Fractional Brownian motion over a 2D value-noise primitive.
//!
//! Each octave samples the value noise, then rotates the point by
//! [`ROTATION`] radians, doubles it, and shifts it by [`SHIFT`] so the
//! octave lattices do not line up. Amplitude starts at 0.5 and halves.

use super::Noise;
use glam::DVec2;

/// Octaves accumulated per sample.
pub const OCTAVES: usize = 5;
/// Per-octave rotation in radians.
pub const ROTATION: f64 = 0.5;
/// Per-octave translation applied after rotating and scaling.
pub const SHIFT: DVec2 = DVec2::new(100.0, 100.0);

/// Five-octave fBm. Ignores `z`. Output lies in [0, 0.96875].
#[derive(Debug, Clone)]
pub struct FbmNoise {
    cos: f64,
    sin: f64,
}

impl FbmNoise {
    pub fn new() -> Self {
        Self {
            cos: ROTATION.cos(),
            sin: ROTATION.sin(),
        }
    }
}

impl Default for FbmNoise {
    fn default() -> Self {
        Self::new()
    }
}

/// `fract(sin(dot(p, (12.9898, 78.233))) * 43758.5453123)`, in [0, 1).
fn hash(p: DVec2) -> f64 {
    let n = (p.x * 12.9898 + p.y * 78.233).sin() * 43758.5453123;
    n - n.floor()
}

fn mix(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Smoothstep-blended value noise on the unit lattice.
fn value_noise(p: DVec2) -> f64 {
    let i = p.floor();
    let f = p - i;

    let a = hash(i);
    let b = hash(i + DVec2::new(1.0, 0.0));
    let c = hash(i + DVec2::new(0.0, 1.0));
    let d = hash(i + DVec2::new(1.0, 1.0));

    let u = f * f * (DVec2::splat(3.0) - 2.0 * f);

    // Folded form of bilinear interpolation; do not expand.
    mix(a, b, u.x) + (c - a) * u.y * (1.0 - u.x) + (d - b) * u.x * u.y
}

impl Noise for FbmNoise {
    fn sample(&self, x: f64, y: f64, _z: f64) -> f64 {
        let mut p = DVec2::new(x, y);
        let mut value = 0.0;
        let mut amplitude = 0.5;
        for _ in 0..OCTAVES {
            value += amplitude * value_noise(p);
            let rotated = DVec2::new(
                self.cos * p.x - self.sin * p.y,
                self.sin * p.x + self.cos * p.y,
            );
            p = rotated * 2.0 + SHIFT;
            amplitude *= 0.5;
        }
        value
    }
}
