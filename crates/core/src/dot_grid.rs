//! The dot-grid engine: a noise field sampled over a square grid of dots.

use crate::engine::Engine;
use crate::error::EngineError;
use crate::field::Field;
use crate::noise::NoiseSource;
use crate::noise_field::NoiseField;
use crate::sampler::{Dot, GridSampler};
use crate::settings::Settings;
use glam::DVec2;
use serde_json::Value;

/// Time added to the noise field per [`Engine::step`].
pub const DEFAULT_TIME_STEP: f64 = 0.01;

/// Owns the active noise field, the settings snapshot, and the frame buffers.
///
/// `frame` writes the dots and refreshes the intensity [`Field`]
/// (`dimensions × dimensions`, normalized field values). `step` advances
/// time unless paused.
#[derive(Debug)]
pub struct DotGrid {
    settings: Settings,
    noise: NoiseField,
    sampler: GridSampler,
    dots: Vec<Dot>,
    intensity: Field,
}

impl DotGrid {
    pub fn new(settings: Settings) -> Result<Self, EngineError> {
        let sampler = GridSampler::new(&settings)?;
        let noise = NoiseField::new(
            NoiseSource::new(settings.noise_type, settings.seed),
            settings.frequency,
            settings.amplitude,
            settings.waves,
        )?;
        let d = settings.dimensions;
        Ok(Self {
            intensity: Field::new(d, d)?,
            dots: Vec::with_capacity(d * d),
            settings,
            noise,
            sampler,
        })
    }

    /// Replaces the settings snapshot.
    ///
    /// Everything is validated and built before any state changes, so an
    /// error leaves the grid exactly as it was. The noise source is rebuilt
    /// only when the noise type or seed differs; time carries over.
    pub fn apply_settings(&mut self, settings: Settings) -> Result<(), EngineError> {
        let sampler = GridSampler::new(&settings)?;
        let d = settings.dimensions;
        let intensity = if d == self.intensity.width() {
            None
        } else {
            Some(Field::new(d, d)?)
        };
        let source = (settings.noise_type != self.settings.noise_type
            || settings.seed != self.settings.seed)
            .then(|| NoiseSource::new(settings.noise_type, settings.seed));

        self.noise
            .set_transform(settings.frequency, settings.amplitude, settings.waves)?;
        if let Some(source) = source {
            self.noise.replace_source(source);
        }
        if let Some(intensity) = intensity {
            self.intensity = intensity;
        }
        self.sampler = sampler;
        self.settings = settings;
        tracing::debug!(
            noise = %self.settings.noise_type,
            dimensions = d,
            paused = self.settings.is_paused,
            "applied settings"
        );
        Ok(())
    }

    /// Applies a store-style JSON patch over the current settings.
    pub fn update(&mut self, patch: &Value) -> Result<(), EngineError> {
        let next = self.settings.merged(patch)?;
        self.apply_settings(next)
    }

    pub fn toggle_pause(&mut self) {
        self.settings.is_paused = !self.settings.is_paused;
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.settings.is_paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.settings.is_paused
    }

    /// Samples one frame at the current time.
    pub fn frame(&mut self, cursor: Option<DVec2>) -> &[Dot] {
        self.dots.clear();
        for point in self.sampler.points(&self.noise, cursor) {
            self.intensity
                .set(point.grid_x as isize, point.grid_y as isize, point.intensity);
            self.dots.push(self.sampler.dot(&point));
        }
        tracing::trace!(time = self.noise.time(), dots = self.dots.len(), "sampled frame");
        &self.dots
    }

    /// Dots from the most recent [`DotGrid::frame`].
    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn noise_field(&self) -> &NoiseField {
        &self.noise
    }

    pub fn time(&self) -> f64 {
        self.noise.time()
    }
}

impl Engine for DotGrid {
    fn step(&mut self) -> Result<(), EngineError> {
        if !self.settings.is_paused {
            self.noise.advance(DEFAULT_TIME_STEP);
        }
        Ok(())
    }

    fn field(&self) -> &Field {
        &self.intensity
    }

    fn params(&self) -> Value {
        self.settings.to_json()
    }

    fn param_schema(&self) -> Value {
        Settings::param_schema()
    }
}
