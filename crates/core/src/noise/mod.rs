//! Scalar noise sources.
//!
//! Six interchangeable generators share one contract, [`Noise::sample`],
//! mapping `(x, y, z)` to a scalar. [`NoiseSource`] is the closed set the
//! rest of the crate works with: it is rebuilt only when the noise type or
//! seed changes, never per frame.

mod fbm;
mod manhattan;
mod perlin;
mod simplex;
mod white;
mod worley;

pub use fbm::FbmNoise;
pub use manhattan::ManhattanNoise;
pub use perlin::PerlinNoise;
pub use simplex::SimplexNoise;
pub use white::WhiteNoise;
pub use worley::{WorleyNoise, GRID_SIZE};

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A scalar noise generator.
///
/// Implementations are pure over their own construction-time state: the
/// same instance returns the same value for the same coordinates. Finite
/// inputs never panic; NaN inputs propagate as NaN.
pub trait Noise: Send + Sync {
    /// Sample the noise at `(x, y, z)`.
    fn sample(&self, x: f64, y: f64, z: f64) -> f64;
}

/// Identity of a noise algorithm, named the way the settings store names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NoiseKind {
    Perlin,
    Simplex,
    Worley,
    Manhattan,
    FractionalBrownian,
    White,
}

impl NoiseKind {
    /// Every kind, in menu order.
    pub const ALL: [NoiseKind; 6] = [
        NoiseKind::Perlin,
        NoiseKind::Simplex,
        NoiseKind::Worley,
        NoiseKind::Manhattan,
        NoiseKind::FractionalBrownian,
        NoiseKind::White,
    ];

    /// Store name of this kind (`"perlin"`, `"fractionalBrownian"`, ...).
    pub fn name(self) -> &'static str {
        match self {
            NoiseKind::Perlin => "perlin",
            NoiseKind::Simplex => "simplex",
            NoiseKind::Worley => "worley",
            NoiseKind::Manhattan => "manhattan",
            NoiseKind::FractionalBrownian => "fractionalBrownian",
            NoiseKind::White => "white",
        }
    }

    /// Parses a store name.
    ///
    /// Returns `EngineError::UnknownNoise` if the name is not recognized.
    pub fn from_name(name: &str) -> Result<Self, EngineError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| EngineError::UnknownNoise(name.to_string()))
    }

    /// All recognized store names.
    pub fn list_names() -> Vec<&'static str> {
        Self::ALL.iter().map(|k| k.name()).collect()
    }

    /// The range a sample from this kind nominally falls in.
    ///
    /// Used to rescale samples into dot radii. Perlin is not hard-bounded;
    /// the sampler clamps whatever falls outside.
    pub fn nominal_range(self) -> (f64, f64) {
        match self {
            NoiseKind::Perlin | NoiseKind::White => (-1.0, 1.0),
            NoiseKind::Simplex
            | NoiseKind::Worley
            | NoiseKind::Manhattan
            | NoiseKind::FractionalBrownian => (0.0, 1.0),
        }
    }
}

impl fmt::Display for NoiseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The active noise generator: one of the six algorithms.
///
/// Owns all generator state (permutation tables, feature-point lattice).
pub enum NoiseSource {
    Perlin(PerlinNoise),
    Simplex(SimplexNoise),
    Worley(WorleyNoise),
    Manhattan(ManhattanNoise),
    FractionalBrownian(FbmNoise),
    White(WhiteNoise),
}

impl NoiseSource {
    /// Builds the generator for `kind`, seeding every stateful variant from `seed`.
    ///
    /// Fully completes construction (including the Worley lattice) before
    /// returning, so a caller can swap the result in atomically.
    pub fn new(kind: NoiseKind, seed: u64) -> Self {
        let source = match kind {
            NoiseKind::Perlin => NoiseSource::Perlin(PerlinNoise::new(seed)),
            NoiseKind::Simplex => NoiseSource::Simplex(SimplexNoise::new(seed)),
            NoiseKind::Worley => NoiseSource::Worley(WorleyNoise::new(seed)),
            NoiseKind::Manhattan => NoiseSource::Manhattan(ManhattanNoise),
            NoiseKind::FractionalBrownian => NoiseSource::FractionalBrownian(FbmNoise::new()),
            NoiseKind::White => NoiseSource::White(WhiteNoise::new(seed)),
        };
        tracing::debug!(%kind, seed, "built noise source");
        source
    }

    /// Which algorithm this source runs.
    pub fn kind(&self) -> NoiseKind {
        match self {
            NoiseSource::Perlin(_) => NoiseKind::Perlin,
            NoiseSource::Simplex(_) => NoiseKind::Simplex,
            NoiseSource::Worley(_) => NoiseKind::Worley,
            NoiseSource::Manhattan(_) => NoiseKind::Manhattan,
            NoiseSource::FractionalBrownian(_) => NoiseKind::FractionalBrownian,
            NoiseSource::White(_) => NoiseKind::White,
        }
    }
}

impl Noise for NoiseSource {
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        match self {
            NoiseSource::Perlin(n) => n.sample(x, y, z),
            NoiseSource::Simplex(n) => n.sample(x, y, z),
            NoiseSource::Worley(n) => n.sample(x, y, z),
            NoiseSource::Manhattan(n) => n.sample(x, y, z),
            NoiseSource::FractionalBrownian(n) => n.sample(x, y, z),
            NoiseSource::White(n) => n.sample(x, y, z),
        }
    }
}

impl fmt::Debug for NoiseSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NoiseSource({})", self.kind())
    }
}
