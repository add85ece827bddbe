//! Dot-grid settings: the read-only snapshot the engine consumes each frame.
//!
//! Field names and defaults follow the settings store the UI writes to.
//! The engine never mutates a `Settings`; callers build a new one (directly
//! or with [`Settings::merged`]) and hand it over, and validation happens
//! there, before any frame samples.

use crate::color::Srgb;
use crate::error::EngineError;
use crate::noise::NoiseKind;
use crate::params::{param_bool, param_f64, param_str, param_u64, param_usize};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// Largest accepted grid side.
pub const MAX_DIMENSIONS: usize = 300;

const DEFAULT_DIMENSIONS: usize = 88;
const DEFAULT_SIZE: f64 = 0.85;
const DEFAULT_SOLID_COLOR: Srgb = Srgb::WHITE;
const DEFAULT_DOT_MIN: f64 = 0.3;
const DEFAULT_DOT_MAX: f64 = 4.0;
const DEFAULT_AMPLITUDE: f64 = 20.0;
const DEFAULT_WAVES: f64 = 0.1;
const DEFAULT_FREQUENCY: f64 = 0.002;
const DEFAULT_REPEL_RADIUS: f64 = 75.0;
const DEFAULT_REPEL_STRENGTH: f64 = 15.0;
const DEFAULT_MAX_DISPLACEMENT: f64 = 40.0;

/// `#00d492`
const DEFAULT_GRADIENT_START: Srgb = Srgb {
    r: 0.0,
    g: 212.0 / 255.0,
    b: 146.0 / 255.0,
};
/// `#51a2ff`
const DEFAULT_GRADIENT_END: Srgb = Srgb {
    r: 81.0 / 255.0,
    g: 162.0 / 255.0,
    b: 1.0,
};

/// How dots are colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorMode {
    /// Every dot uses `solid_color`.
    Solid,
    /// Dots blend from `gradient_start` to `gradient_end` by intensity.
    Gradient,
}

impl ColorMode {
    pub fn name(self) -> &'static str {
        match self {
            ColorMode::Solid => "solid",
            ColorMode::Gradient => "gradient",
        }
    }

    /// Returns `EngineError::UnknownColorMode` if the name is not recognized.
    pub fn from_name(name: &str) -> Result<Self, EngineError> {
        match name {
            "solid" => Ok(ColorMode::Solid),
            "gradient" => Ok(ColorMode::Gradient),
            _ => Err(EngineError::UnknownColorMode(name.to_string())),
        }
    }

    pub fn list_names() -> [&'static str; 2] {
        [ColorMode::Solid.name(), ColorMode::Gradient.name()]
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything the dot grid reads per frame.
///
/// Serializes with the store's camelCase keys. Missing keys take their
/// defaults on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Dots per side; the grid has `dimensions²` dots.
    pub dimensions: usize,
    /// Spacing between neighbouring dots in world units.
    pub size: f64,
    pub color_mode: ColorMode,
    pub solid_color: Srgb,
    pub gradient_start: Srgb,
    pub gradient_end: Srgb,
    /// Smallest dot radius.
    pub dot_min: f64,
    /// Largest dot radius.
    pub dot_max: f64,
    /// Multiplier on every noise sample.
    pub amplitude: f64,
    /// Offset added to both sample coordinates.
    pub waves: f64,
    /// Grid-index to noise-space scale; must be > 0.
    pub frequency: f64,
    pub repel_enabled: bool,
    pub repel_radius: f64,
    pub repel_strength: f64,
    pub max_displacement: f64,
    pub noise_type: NoiseKind,
    /// Freezes time advancement only.
    pub is_paused: bool,
    /// Seed for every stateful noise source.
    pub seed: u64,
}

impl Default for Settings {
    /// Store defaults with a freshly drawn seed.
    fn default() -> Self {
        Self::with_seed(rand::random())
    }
}

impl Settings {
    /// Store defaults with a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            dimensions: DEFAULT_DIMENSIONS,
            size: DEFAULT_SIZE,
            color_mode: ColorMode::Gradient,
            solid_color: DEFAULT_SOLID_COLOR,
            gradient_start: DEFAULT_GRADIENT_START,
            gradient_end: DEFAULT_GRADIENT_END,
            dot_min: DEFAULT_DOT_MIN,
            dot_max: DEFAULT_DOT_MAX,
            amplitude: DEFAULT_AMPLITUDE,
            waves: DEFAULT_WAVES,
            frequency: DEFAULT_FREQUENCY,
            repel_enabled: false,
            repel_radius: DEFAULT_REPEL_RADIUS,
            repel_strength: DEFAULT_REPEL_STRENGTH,
            max_displacement: DEFAULT_MAX_DISPLACEMENT,
            noise_type: NoiseKind::Perlin,
            is_paused: false,
            seed,
        }
    }

    /// Checks every constraint the sampler relies on.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.dimensions == 0 || self.dimensions > MAX_DIMENSIONS {
            return Err(EngineError::InvalidDimensions(self.dimensions));
        }
        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(EngineError::InvalidSize(self.size));
        }
        if !(self.frequency.is_finite() && self.frequency > 0.0) {
            return Err(EngineError::InvalidFrequency(self.frequency));
        }
        for (name, value) in [("amplitude", self.amplitude), ("waves", self.waves)] {
            if !value.is_finite() {
                return Err(EngineError::NonFinite { name, value });
            }
        }
        let dots_ok = self.dot_min.is_finite()
            && self.dot_max.is_finite()
            && self.dot_min >= 0.0
            && self.dot_min <= self.dot_max;
        if !dots_ok {
            return Err(EngineError::InvalidDotRange {
                min: self.dot_min,
                max: self.dot_max,
            });
        }
        for (name, value) in [
            ("repelRadius", self.repel_radius),
            ("maxDisplacement", self.max_displacement),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(EngineError::InvalidRepel { name, value });
            }
        }
        if !self.repel_strength.is_finite() {
            return Err(EngineError::InvalidRepel {
                name: "repelStrength",
                value: self.repel_strength,
            });
        }
        Ok(())
    }

    /// Applies a partial update keyed like the store (`{"dotMin": 1.0}`).
    ///
    /// Keys that are missing or hold the wrong JSON type keep their current
    /// value; unknown keys are ignored. Unknown enum names and malformed
    /// colors are errors. The merged result is validated before it is
    /// returned, so `self` is never replaced by an invalid snapshot.
    pub fn merged(&self, patch: &Value) -> Result<Settings, EngineError> {
        let mut next = Settings {
            dimensions: param_usize(patch, "dimensions", self.dimensions),
            size: param_f64(patch, "size", self.size),
            dot_min: param_f64(patch, "dotMin", self.dot_min),
            dot_max: param_f64(patch, "dotMax", self.dot_max),
            amplitude: param_f64(patch, "amplitude", self.amplitude),
            waves: param_f64(patch, "waves", self.waves),
            frequency: param_f64(patch, "frequency", self.frequency),
            repel_enabled: param_bool(patch, "repelEnabled", self.repel_enabled),
            repel_radius: param_f64(patch, "repelRadius", self.repel_radius),
            repel_strength: param_f64(patch, "repelStrength", self.repel_strength),
            max_displacement: param_f64(patch, "maxDisplacement", self.max_displacement),
            is_paused: param_bool(patch, "isPaused", self.is_paused),
            seed: param_u64(patch, "seed", self.seed),
            ..self.clone()
        };
        if let Some(name) = param_str(patch, "colorMode") {
            next.color_mode = ColorMode::from_name(name)?;
        }
        if let Some(name) = param_str(patch, "noiseType") {
            next.noise_type = NoiseKind::from_name(name)?;
        }
        if let Some(hex) = param_str(patch, "solidColor") {
            next.solid_color = Srgb::from_hex(hex)?;
        }
        if let Some(hex) = param_str(patch, "gradientStart") {
            next.gradient_start = Srgb::from_hex(hex)?;
        }
        if let Some(hex) = param_str(patch, "gradientEnd") {
            next.gradient_end = Srgb::from_hex(hex)?;
        }
        next.validate()?;
        Ok(next)
    }

    /// Current values as a JSON object with store keys.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }

    /// Type, default, range, and description of every setting.
    pub fn param_schema() -> Value {
        json!({
            "dimensions": {
                "type": "integer",
                "default": DEFAULT_DIMENSIONS,
                "min": 1,
                "max": MAX_DIMENSIONS,
                "description": "Dots per side of the square grid"
            },
            "size": {
                "type": "number",
                "default": DEFAULT_SIZE,
                "min": 0.0,
                "description": "Spacing between neighbouring dots"
            },
            "colorMode": {
                "type": "string",
                "default": ColorMode::Gradient.name(),
                "enum": ColorMode::list_names(),
                "description": "Solid color or two-stop gradient keyed by intensity"
            },
            "solidColor": {
                "type": "color",
                "default": DEFAULT_SOLID_COLOR.to_hex(),
                "description": "Dot color in solid mode"
            },
            "gradientStart": {
                "type": "color",
                "default": DEFAULT_GRADIENT_START.to_hex(),
                "description": "Color of the least intense dots in gradient mode"
            },
            "gradientEnd": {
                "type": "color",
                "default": DEFAULT_GRADIENT_END.to_hex(),
                "description": "Color of the most intense dots in gradient mode"
            },
            "dotMin": {
                "type": "number",
                "default": DEFAULT_DOT_MIN,
                "min": 0.0,
                "description": "Smallest dot radius"
            },
            "dotMax": {
                "type": "number",
                "default": DEFAULT_DOT_MAX,
                "min": 0.0,
                "description": "Largest dot radius"
            },
            "amplitude": {
                "type": "number",
                "default": DEFAULT_AMPLITUDE,
                "description": "Multiplier applied to every noise sample"
            },
            "waves": {
                "type": "number",
                "default": DEFAULT_WAVES,
                "description": "Offset added to both noise coordinates"
            },
            "frequency": {
                "type": "number",
                "default": DEFAULT_FREQUENCY,
                "min": 0.0,
                "exclusiveMin": true,
                "description": "Scale from grid index to noise coordinates"
            },
            "repelEnabled": {
                "type": "boolean",
                "default": false,
                "description": "Push dots away from the pointer"
            },
            "repelRadius": {
                "type": "number",
                "default": DEFAULT_REPEL_RADIUS,
                "min": 0.0,
                "description": "Distance within which the pointer pushes dots"
            },
            "repelStrength": {
                "type": "number",
                "default": DEFAULT_REPEL_STRENGTH,
                "description": "Push magnitude at the pointer"
            },
            "maxDisplacement": {
                "type": "number",
                "default": DEFAULT_MAX_DISPLACEMENT,
                "min": 0.0,
                "description": "Cap on how far a dot can be pushed"
            },
            "noiseType": {
                "type": "string",
                "default": NoiseKind::Perlin.name(),
                "enum": NoiseKind::list_names(),
                "description": "Noise algorithm driving the grid"
            },
            "isPaused": {
                "type": "boolean",
                "default": false,
                "description": "Freeze time advancement"
            },
            "seed": {
                "type": "integer",
                "min": 0,
                "description": "Seed for the noise generators"
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Settings {
        Settings::with_seed(42)
    }

    #[test]
    fn defaults_match_the_store() {
        let s = base();
        assert_eq!(s.dimensions, 88);
        assert_eq!(s.size, 0.85);
        assert_eq!(s.color_mode, ColorMode::Gradient);
        assert_eq!(s.solid_color.to_hex(), "#ffffff");
        assert_eq!(s.gradient_start.to_hex(), "#00d492");
        assert_eq!(s.gradient_end.to_hex(), "#51a2ff");
        assert_eq!((s.dot_min, s.dot_max), (0.3, 4.0));
        assert_eq!((s.amplitude, s.waves, s.frequency), (20.0, 0.1, 0.002));
        assert!(!s.repel_enabled);
        assert_eq!(
            (s.repel_radius, s.repel_strength, s.max_displacement),
            (75.0, 15.0, 40.0)
        );
        assert_eq!(s.noise_type, NoiseKind::Perlin);
        assert!(!s.is_paused);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_and_oversized_dimensions() {
        for d in [0, MAX_DIMENSIONS + 1] {
            let s = Settings {
                dimensions: d,
                ..base()
            };
            assert!(matches!(s.validate(), Err(EngineError::InvalidDimensions(v)) if v == d));
        }
    }

    #[test]
    fn validate_rejects_non_positive_frequency() {
        for f in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            let s = Settings {
                frequency: f,
                ..base()
            };
            assert!(
                matches!(s.validate(), Err(EngineError::InvalidFrequency(_))),
                "accepted frequency {f}"
            );
        }
    }

    #[test]
    fn validate_rejects_non_finite_amplitude_and_waves() {
        let s = Settings {
            amplitude: f64::NAN,
            ..base()
        };
        assert!(matches!(
            s.validate(),
            Err(EngineError::NonFinite { name: "amplitude", .. })
        ));
        let s = Settings {
            waves: f64::INFINITY,
            ..base()
        };
        assert!(matches!(
            s.validate(),
            Err(EngineError::NonFinite { name: "waves", .. })
        ));
        let s = Settings {
            amplitude: -5.0,
            ..base()
        };
        assert!(s.validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_positive_size() {
        let s = Settings {
            size: 0.0,
            ..base()
        };
        assert!(matches!(s.validate(), Err(EngineError::InvalidSize(_))));
    }

    #[test]
    fn validate_rejects_inverted_dot_range() {
        let s = Settings {
            dot_min: 5.0,
            dot_max: 1.0,
            ..base()
        };
        assert!(matches!(
            s.validate(),
            Err(EngineError::InvalidDotRange { .. })
        ));
    }

    #[test]
    fn validate_accepts_equal_dot_bounds() {
        let s = Settings {
            dot_min: 2.0,
            dot_max: 2.0,
            ..base()
        };
        assert!(s.validate().is_ok());
    }

    #[test]
    fn validate_rejects_negative_repel_radius() {
        let s = Settings {
            repel_radius: -1.0,
            ..base()
        };
        assert!(matches!(
            s.validate(),
            Err(EngineError::InvalidRepel {
                name: "repelRadius",
                ..
            })
        ));
    }

    #[test]
    fn merged_overrides_known_keys_and_ignores_unknown() {
        let patch = json!({
            "dimensions": 12,
            "noiseType": "worley",
            "colorMode": "solid",
            "solidColor": "#ff0000",
            "repelEnabled": true,
            "bogus": 1,
        });
        let next = base().merged(&patch).unwrap();
        assert_eq!(next.dimensions, 12);
        assert_eq!(next.noise_type, NoiseKind::Worley);
        assert_eq!(next.color_mode, ColorMode::Solid);
        assert_eq!(next.solid_color.to_hex(), "#ff0000");
        assert!(next.repel_enabled);
        assert_eq!(next.frequency, base().frequency);
        assert_eq!(next.seed, 42);
    }

    #[test]
    fn merged_keeps_value_for_wrong_json_type() {
        let next = base().merged(&json!({"size": "big"})).unwrap();
        assert_eq!(next.size, 0.85);
    }

    #[test]
    fn merged_rejects_unknown_noise_name() {
        let err = base().merged(&json!({"noiseType": "pink"})).unwrap_err();
        assert!(matches!(err, EngineError::UnknownNoise(_)));
    }

    #[test]
    fn merged_validates_result() {
        let err = base()
            .merged(&json!({"dotMin": 10.0, "dotMax": 1.0}))
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidDotRange { .. }));
    }

    #[test]
    fn serde_uses_store_keys() {
        let v = serde_json::to_value(base()).unwrap();
        for key in ["dotMin", "noiseType", "repelEnabled", "maxDisplacement", "isPaused"] {
            assert!(v.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(v["noiseType"], "perlin");
        assert_eq!(v["colorMode"], "gradient");
    }

    #[test]
    fn deserialize_fills_missing_keys_with_defaults() {
        let s: Settings =
            serde_json::from_value(json!({"dimensions": 4, "noiseType": "manhattan", "seed": 1}))
                .unwrap();
        assert_eq!(s.dimensions, 4);
        assert_eq!(s.noise_type, NoiseKind::Manhattan);
        assert_eq!(s.dot_max, 4.0);
        assert_eq!(s.seed, 1);
    }

    #[test]
    fn param_schema_covers_every_serialized_key() {
        let schema = Settings::param_schema();
        let values = base().to_json();
        for key in values.as_object().unwrap().keys() {
            assert!(schema.get(key).is_some(), "schema missing {key}");
            assert!(schema[key].get("type").is_some(), "{key} missing type");
            assert!(
                schema[key].get("description").is_some(),
                "{key} missing description"
            );
        }
    }

    #[test]
    fn color_mode_names_round_trip() {
        for name in ColorMode::list_names() {
            assert_eq!(ColorMode::from_name(name).unwrap().name(), name);
        }
        assert!(matches!(
            ColorMode::from_name("rainbow"),
            Err(EngineError::UnknownColorMode(_))
        ));
    }
}
