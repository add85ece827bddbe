//! Simplex noise normalized to [0, 1].

use super::Noise;
use ::noise::{NoiseFn, Simplex};

/// Seeded 2D/3D simplex noise.
///
/// A `z` of exactly `0.0` samples the 2D generator, anything else the 3D
/// one. Both raw outputs are clamped to [-1, 1] then mapped by `(v + 1) / 2`.
#[derive(Clone)]
pub struct SimplexNoise {
    inner: Simplex,
}

impl SimplexNoise {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Simplex::new(fold_seed(seed)),
        }
    }
}

/// Folds a 64-bit seed into the 32 bits the generator accepts, keeping
/// entropy from both halves.
fn fold_seed(seed: u64) -> u32 {
    (seed ^ (seed >> 32)) as u32
}

impl Noise for SimplexNoise {
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let raw = if z == 0.0 {
            self.inner.get([x, y])
        } else {
            self.inner.get([x, y, z])
        };
        (raw.clamp(-1.0, 1.0) + 1.0) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_z_uses_the_2d_generator() {
        let noise = SimplexNoise::new(11);
        let inner = Simplex::new(fold_seed(11));
        let expected = (inner.get([0.3, 1.7]).clamp(-1.0, 1.0) + 1.0) / 2.0;
        assert_eq!(noise.sample(0.3, 1.7, 0.0).to_bits(), expected.to_bits());
    }

    #[test]
    fn nonzero_z_uses_the_3d_generator() {
        let noise = SimplexNoise::new(11);
        let inner = Simplex::new(fold_seed(11));
        let expected = (inner.get([0.3, 1.7, 0.2]).clamp(-1.0, 1.0) + 1.0) / 2.0;
        assert_eq!(noise.sample(0.3, 1.7, 0.2).to_bits(), expected.to_bits());
    }

    #[test]
    fn fold_seed_mixes_high_bits() {
        assert_ne!(fold_seed(1), fold_seed(1 | (1 << 40)));
    }

    #[test]
    fn same_seed_same_output() {
        let a = SimplexNoise::new(3);
        let b = SimplexNoise::new(3);
        assert_eq!(a.sample(4.2, 1.1, 0.7), b.sample(4.2, 1.1, 0.7));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn output_in_unit_interval(
                seed in any::<u64>(),
                x in -1000.0_f64..1000.0,
                y in -1000.0_f64..1000.0,
                z in prop_oneof![Just(0.0_f64), -1000.0_f64..1000.0],
            ) {
                let v = SimplexNoise::new(seed).sample(x, y, z);
                prop_assert!((0.0..=1.0).contains(&v), "simplex out of range: {v}");
            }
        }
    }
}
