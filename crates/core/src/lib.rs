#![deny(unsafe_code)]
//! Core of the fluid dot-grid engine.
//!
//! Six interchangeable noise generators (`noise`), the transform that
//! samples them over grid indices and time (`NoiseField`), pointer
//! repulsion (`Repel`), the grid sampler that turns a field into dots
//! (`GridSampler`), the settings snapshot (`Settings`), and the `DotGrid`
//! engine that ties them together behind the `Engine` trait. Color types,
//! `Palette`, the `Field` grid, and the `Xorshift64` PRNG support them.

pub mod color;
pub mod dot_grid;
pub mod engine;
pub mod error;
pub mod field;
pub mod force;
pub mod noise;
pub mod noise_field;
pub mod palette;
pub mod params;
pub mod prng;
pub mod sampler;
pub mod settings;

pub use color::{LinearRgb, OkLab, OkLch, Srgb};
pub use dot_grid::{DotGrid, DEFAULT_TIME_STEP};
pub use engine::Engine;
pub use error::EngineError;
pub use field::Field;
pub use force::Repel;
pub use noise::{Noise, NoiseKind, NoiseSource};
pub use noise_field::NoiseField;
pub use palette::Palette;
pub use prng::Xorshift64;
pub use sampler::{Dot, GridPoint, GridSampler};
pub use settings::{ColorMode, Settings, MAX_DIMENSIONS};
