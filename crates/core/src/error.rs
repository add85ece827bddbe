//! Error types for the fluid core.

use thiserror::Error;

/// Errors produced when settings are applied or outputs are written.
///
/// Sampling itself never fails: every variant here is raised at
/// construction or settings-apply time, before any frame is drawn.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Grid dimensions were zero, above the supported maximum, or overflowed.
    #[error("invalid dimensions: {0} (expected 1..={max})", max = crate::settings::MAX_DIMENSIONS)]
    InvalidDimensions(usize),

    /// Dot spacing was not a finite positive number.
    #[error("invalid size: {0} (must be finite and > 0)")]
    InvalidSize(f64),

    /// Noise frequency was not a finite positive number.
    #[error("invalid frequency: {0} (must be finite and > 0)")]
    InvalidFrequency(f64),

    /// Noise amplitude or wave offset was not finite.
    #[error("invalid {name}: {value} (must be finite)")]
    NonFinite { name: &'static str, value: f64 },

    /// The dot radius range was empty, negative, or non-finite.
    #[error("invalid dot range: min {min} must be <= max {max}, both finite and >= 0")]
    InvalidDotRange { min: f64, max: f64 },

    /// A repulsion parameter was negative or non-finite.
    #[error("invalid repel parameter '{name}': {value}")]
    InvalidRepel { name: &'static str, value: f64 },

    /// A noise type name was not recognized.
    #[error("unknown noise type: {0}")]
    UnknownNoise(String),

    /// A color mode name was not recognized.
    #[error("unknown color mode: {0}")]
    UnknownColorMode(String),

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// Raster scale was not finite and positive, or produced an oversized canvas.
    #[error("invalid scale: {0} (must be finite, > 0, and fit the canvas limit)")]
    InvalidScale(f64),

    /// Writing an output file failed.
    #[error("i/o error: {0}")]
    Io(String),
}
