//! Classic 3D improved Perlin noise over a seeded permutation table.

use super::Noise;
use crate::prng::Xorshift64;

/// 3D gradient noise with a 512-entry doubled permutation table.
///
/// Output is nominally in [-1, 1] but not clamped.
#[derive(Clone)]
pub struct PerlinNoise {
    perm: [u8; 512],
}

impl PerlinNoise {
    /// Shuffles `0..=255` with the seeded PRNG and doubles it so lattice
    /// lookups never need a modulo.
    pub fn new(seed: u64) -> Self {
        let mut base: [u8; 256] = std::array::from_fn(|i| i as u8);
        Xorshift64::new(seed).shuffle(&mut base);

        let mut perm = [0u8; 512];
        perm[..256].copy_from_slice(&base);
        perm[256..].copy_from_slice(&base);
        Self { perm }
    }

    #[inline]
    fn p(&self, i: usize) -> usize {
        self.perm[i] as usize
    }
}

/// Quintic fade `6t^5 - 15t^4 + 10t^3`.
#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Dot product of the offset with one of the 12 edge gradients selected by
/// the low four bits of `hash` (four of the sixteen cases repeat).
#[inline]
fn grad(hash: usize, x: f64, y: f64, z: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}

/// Lattice index of a coordinate. NaN and infinities land on some cell; the
/// fractional part carries the NaN through instead.
#[inline]
fn cell(c: f64) -> usize {
    (c as i64 & 255) as usize
}

impl Noise for PerlinNoise {
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let (fx, fy, fz) = (x.floor(), y.floor(), z.floor());
        let xi = cell(fx);
        let yi = cell(fy);
        let zi = cell(fz);
        let x = x - fx;
        let y = y - fy;
        let z = z - fz;

        let u = fade(x);
        let v = fade(y);
        let w = fade(z);

        let a = self.p(xi) + yi;
        let aa = self.p(a) + zi;
        let ab = self.p(a + 1) + zi;
        let b = self.p(xi + 1) + yi;
        let ba = self.p(b) + zi;
        let bb = self.p(b + 1) + zi;

        lerp(
            lerp(
                lerp(
                    grad(self.p(aa), x, y, z),
                    grad(self.p(ba), x - 1.0, y, z),
                    u,
                ),
                lerp(
                    grad(self.p(ab), x, y - 1.0, z),
                    grad(self.p(bb), x - 1.0, y - 1.0, z),
                    u,
                ),
                v,
            ),
            lerp(
                lerp(
                    grad(self.p(aa + 1), x, y, z - 1.0),
                    grad(self.p(ba + 1), x - 1.0, y, z - 1.0),
                    u,
                ),
                lerp(
                    grad(self.p(ab + 1), x, y - 1.0, z - 1.0),
                    grad(self.p(bb + 1), x - 1.0, y - 1.0, z - 1.0),
                    u,
                ),
                v,
            ),
            w,
        )
    }
}
