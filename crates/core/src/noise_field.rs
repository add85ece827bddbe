//! The active noise source plus the spatial and temporal transform that
//! turns grid indices into sample coordinates.

use crate::error::EngineError;
use crate::noise::{Noise, NoiseSource};

/// A [`NoiseSource`] evaluated over grid indices.
///
/// A point `(gx, gy)` samples the source at
/// `(gx·frequency + wave_offset, gy·frequency + wave_offset, time)`. The
/// unscaled value sets dot intensity; scaled by `amplitude` it becomes the
/// dot's positional displacement.
#[derive(Debug)]
pub struct NoiseField {
    source: NoiseSource,
    frequency: f64,
    amplitude: f64,
    wave_offset: f64,
    time: f64,
}

fn check_transform(frequency: f64, amplitude: f64, wave_offset: f64) -> Result<(), EngineError> {
    if !(frequency.is_finite() && frequency > 0.0) {
        return Err(EngineError::InvalidFrequency(frequency));
    }
    for (name, value) in [("amplitude", amplitude), ("waves", wave_offset)] {
        if !value.is_finite() {
            return Err(EngineError::NonFinite { name, value });
        }
    }
    Ok(())
}

impl NoiseField {
    /// Time starts at 0.
    ///
    /// Returns `EngineError::InvalidFrequency` unless `frequency` is finite and
    /// positive, and `EngineError::NonFinite` for a non-finite amplitude or offset.
    pub fn new(
        source: NoiseSource,
        frequency: f64,
        amplitude: f64,
        wave_offset: f64,
    ) -> Result<Self, EngineError> {
        check_transform(frequency, amplitude, wave_offset)?;
        Ok(Self {
            source,
            frequency,
            amplitude,
            wave_offset,
            time: 0.0,
        })
    }

    /// Source value at grid indices `(grid_x, grid_y)` at an explicit `time`,
    /// before amplitude scaling.
    pub fn evaluate_unscaled(&self, grid_x: f64, grid_y: f64, time: f64) -> f64 {
        let x = grid_x * self.frequency + self.wave_offset;
        let y = grid_y * self.frequency + self.wave_offset;
        self.source.sample(x, y, time)
    }

    /// Displacement at grid indices at an explicit `time`: the source value
    /// scaled by `amplitude`.
    pub fn evaluate(&self, grid_x: f64, grid_y: f64, time: f64) -> f64 {
        self.evaluate_unscaled(grid_x, grid_y, time) * self.amplitude
    }

    pub fn sample_unscaled(&self, grid_x: f64, grid_y: f64) -> f64 {
        self.evaluate_unscaled(grid_x, grid_y, self.time)
    }

    /// Displacement at grid indices at the field's current time.
    pub fn sample(&self, grid_x: f64, grid_y: f64) -> f64 {
        self.evaluate(grid_x, grid_y, self.time)
    }

    /// Moves time forward by `dt`. Negative or non-finite steps are ignored.
    pub fn advance(&mut self, dt: f64) {
        if dt.is_finite() && dt > 0.0 {
            self.time += dt;
        }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// Swaps in a fully built source and hands back the old one.
    pub fn replace_source(&mut self, source: NoiseSource) -> NoiseSource {
        tracing::debug!(from = %self.source.kind(), to = %source.kind(), "swapping noise source");
        std::mem::replace(&mut self.source, source)
    }

    pub fn source(&self) -> &NoiseSource {
        &self.source
    }

    /// Updates the transform in one step. On error nothing changes.
    pub fn set_transform(
        &mut self,
        frequency: f64,
        amplitude: f64,
        wave_offset: f64,
    ) -> Result<(), EngineError> {
        check_transform(frequency, amplitude, wave_offset)?;
        self.frequency = frequency;
        self.amplitude = amplitude;
        self.wave_offset = wave_offset;
        Ok(())
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn wave_offset(&self) -> f64 {
        self.wave_offset
    }

    /// The active source's nominal output range, independent of amplitude.
    pub fn nominal_range(&self) -> (f64, f64) {
        self.source.kind().nominal_range()
    }
}
