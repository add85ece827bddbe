//! Two-dimensional scalar field with toroidal wrapping and clamped values.
//!
//! A `Field` stores `width * height` f64 values in the range [0, 1] using
//! row-major layout. The dot grid writes one normalized intensity per dot
//! into a `Field` each frame so that callers can inspect a frame without
//! walking the dot buffer.

use crate::error::EngineError;

/// A 2D scalar field with values clamped to [0, 1] and toroidal coordinate wrapping.
#[derive(Debug, Clone)]
pub struct Field {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl Field {
    /// Creates a zero-filled field of the given dimensions.
    ///
    /// Returns `EngineError::InvalidDimensions` if either dimension is zero
    /// or if `width * height` overflows `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimensions(width.min(height)));
        }
        let len = width
            .checked_mul(height)
            .ok_or(EngineError::InvalidDimensions(width.max(height)))?;
        Ok(Self {
            width,
            height,
            data: vec![0.0; len],
        })
    }

    /// Field width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Field height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Read-only access to the underlying row-major data.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Sets the value at `(x, y)` with toroidal wrapping.
    ///
    /// The value is clamped to [0, 1]; NaN is stored as 0.
    pub fn set(&mut self, x: isize, y: isize, value: f64) {
        let xi = x.rem_euclid(self.width as isize) as usize;
        let yi = y.rem_euclid(self.height as isize) as usize;
        self.data[yi * self.width + xi] = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0)
        };
    }

    /// Arithmetic mean of all cells.
    pub fn mean(&self) -> f64 {
        self.data.iter().sum::<f64>() / self.data.len() as f64
    }
}
