//! The `Engine` trait: a step-driven generator exposing a scalar [`Field`].
//!
//! The trait is object-safe so callers can hold `Box<dyn Engine>`.

use crate::error::EngineError;
use crate::field::Field;
use serde_json::Value;

/// A step-driven generator.
///
/// Each step moves internal state forward; [`Engine::field`] exposes the
/// latest scalar snapshot with values in [0, 1].
pub trait Engine {
    /// Advance one step.
    fn step(&mut self) -> Result<(), EngineError>;

    /// The primary scalar field output.
    fn field(&self) -> &Field;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all parameters: type, range, default, description.
    fn param_schema(&self) -> Value;
}
