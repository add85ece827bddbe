//! Grid sampling: turns a [`NoiseField`] into one frame of dots.
//!
//! The grid is `dimensions × dimensions` points spaced `size` apart. Each
//! point samples the field at its integer indices. The unscaled value maps
//! onto the dot radius range over the source's nominal range; scaled by
//! amplitude it shifts the dot vertically. The shifted dot is then
//! optionally pushed away from the cursor.

use crate::color::Srgb;
use crate::error::EngineError;
use crate::force::Repel;
use crate::noise_field::NoiseField;
use crate::palette::Palette;
use crate::settings::{ColorMode, Settings};
use glam::DVec2;

/// One grid point for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPoint {
    pub grid_x: usize,
    pub grid_y: usize,
    /// `(grid_x, grid_y) · size`, before any displacement.
    pub world: DVec2,
    /// Source value at this point, before amplitude scaling.
    pub raw_noise: f64,
    /// `raw_noise` normalized over the source's nominal range; keys both
    /// radius and gradient color.
    pub intensity: f64,
    /// `raw_noise · amplitude`, applied along y.
    pub displacement: f64,
    /// Cursor repulsion offset, applied after `displacement`.
    pub repel: DVec2,
    pub radius: f64,
}

/// A dot ready to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: Srgb,
}

#[derive(Debug, Clone)]
enum DotColor {
    Solid(Srgb),
    Gradient(Palette),
}

/// Per-frame snapshot of everything sampling needs from [`Settings`].
#[derive(Debug, Clone)]
pub struct GridSampler {
    dimensions: usize,
    size: f64,
    dot_min: f64,
    dot_max: f64,
    color: DotColor,
    repel: Option<Repel>,
}

/// Maps `value` onto [0, 1] over `(lo, hi)`.
///
/// NaN and a zero-width range map to 0.
pub fn normalize(value: f64, (lo, hi): (f64, f64)) -> f64 {
    let span = hi - lo;
    if span == 0.0 || !span.is_finite() {
        return 0.0;
    }
    let t = (value - lo) / span;
    if t.is_nan() {
        0.0
    } else {
        t.clamp(0.0, 1.0)
    }
}

impl GridSampler {
    /// Validates `settings` and captures the sampling snapshot.
    pub fn new(settings: &Settings) -> Result<Self, EngineError> {
        settings.validate()?;
        let color = match settings.color_mode {
            ColorMode::Solid => DotColor::Solid(settings.solid_color),
            ColorMode::Gradient => DotColor::Gradient(Palette::two_stop(
                settings.gradient_start,
                settings.gradient_end,
            )),
        };
        Ok(Self {
            dimensions: settings.dimensions,
            size: settings.size,
            dot_min: settings.dot_min,
            dot_max: settings.dot_max,
            color,
            repel: Repel::from_settings(settings),
        })
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn repel(&self) -> Option<&Repel> {
        self.repel.as_ref()
    }

    /// Samples the point at grid indices `(grid_x, grid_y)`.
    pub fn sample_point(
        &self,
        field: &NoiseField,
        grid_x: usize,
        grid_y: usize,
        cursor: Option<DVec2>,
    ) -> GridPoint {
        let raw_noise = field.sample_unscaled(grid_x as f64, grid_y as f64);
        let intensity = normalize(raw_noise, field.nominal_range());
        let displacement = raw_noise * field.amplitude();
        let world = DVec2::new(grid_x as f64, grid_y as f64) * self.size;
        let shifted = world + DVec2::new(0.0, displacement);
        let repel = self
            .repel
            .map_or(DVec2::ZERO, |repel| repel.offset(shifted, cursor));
        GridPoint {
            grid_x,
            grid_y,
            world,
            raw_noise,
            intensity,
            displacement,
            repel,
            radius: (self.dot_min + intensity * (self.dot_max - self.dot_min))
                .clamp(self.dot_min, self.dot_max),
        }
    }

    /// Every grid point in row-major order.
    pub fn points<'a>(
        &'a self,
        field: &'a NoiseField,
        cursor: Option<DVec2>,
    ) -> impl Iterator<Item = GridPoint> + 'a {
        let d = self.dimensions;
        (0..d).flat_map(move |gy| (0..d).map(move |gx| self.sample_point(field, gx, gy, cursor)))
    }

    /// The drawable dot for a sampled point.
    pub fn dot(&self, point: &GridPoint) -> Dot {
        let position = point.world + DVec2::new(0.0, point.displacement) + point.repel;
        let color = match &self.color {
            DotColor::Solid(c) => *c,
            DotColor::Gradient(palette) => palette.sample(point.intensity),
        };
        Dot {
            x: position.x,
            y: position.y,
            radius: point.radius,
            color,
        }
    }

    /// Clears `out` and fills it with `dimensions²` dots, row-major.
    pub fn sample_into(&self, field: &NoiseField, cursor: Option<DVec2>, out: &mut Vec<Dot>) {
        out.clear();
        out.reserve(self.dimensions * self.dimensions);
        out.extend(self.points(field, cursor).map(|p| self.dot(&p)));
    }

    pub fn sample(&self, field: &NoiseField, cursor: Option<DVec2>) -> Vec<Dot> {
        let mut out = Vec::new();
        self.sample_into(field, cursor, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::{NoiseKind, NoiseSource};

    const GOLDEN_MANHATTAN_RADII: [f64; 16] = [
        0.3,
        2.2403279313676503,
        2.993201437765066,
        1.866432089464526,
        2.2403279313676503,
        3.3288009585100444,
        0.7577307034322347,
        1.8647389445336904,
        2.993201437765066,
        0.7577307034322347,
        2.200338465278669,
        3.1094822762964416,
        1.866432089464526,
        1.8647389445336904,
        3.1094822762964416,
        2.3676746866720513,
    ];

    fn manhattan_settings(dimensions: usize) -> Settings {
        Settings {
            dimensions,
            size: 10.0,
            noise_type: NoiseKind::Manhattan,
            frequency: 1.0,
            amplitude: 1.0,
            waves: 0.0,
            ..Settings::with_seed(7)
        }
    }

    fn field_for(settings: &Settings) -> NoiseField {
        NoiseField::new(
            NoiseSource::new(settings.noise_type, settings.seed),
            settings.frequency,
            settings.amplitude,
            settings.waves,
        )
        .unwrap()
    }

    #[test]
    fn normalize_policy() {
        assert_eq!(normalize(0.5, (0.0, 1.0)), 0.5);
        assert_eq!(normalize(0.0, (-1.0, 1.0)), 0.5);
        assert_eq!(normalize(5.0, (0.0, 1.0)), 1.0);
        assert_eq!(normalize(-5.0, (0.0, 1.0)), 0.0);
        assert_eq!(normalize(f64::NAN, (0.0, 1.0)), 0.0);
        assert_eq!(normalize(0.3, (0.0, 0.0)), 0.0);
    }

    #[test]
    fn new_rejects_invalid_settings() {
        let s = Settings {
            dimensions: 0,
            ..Settings::with_seed(1)
        };
        assert!(matches!(
            GridSampler::new(&s),
            Err(EngineError::InvalidDimensions(0))
        ));
    }

    #[test]
    fn manhattan_grid_matches_golden_radii() {
        let settings = manhattan_settings(4);
        let sampler = GridSampler::new(&settings).unwrap();
        let dots = sampler.sample(&field_for(&settings), None);
        assert_eq!(dots.len(), 16);
        for (i, (dot, expected)) in dots.iter().zip(GOLDEN_MANHATTAN_RADII).enumerate() {
            assert!(
                (dot.radius - expected).abs() < 1e-12,
                "dot {i}: {} != {expected}",
                dot.radius
            );
        }
    }

    #[test]
    fn sampling_is_bit_reproducible() {
        let settings = manhattan_settings(4);
        let sampler = GridSampler::new(&settings).unwrap();
        let a = sampler.sample(&field_for(&settings), None);
        let b = sampler.sample(&field_for(&settings), None);
        let bits = |dots: &[Dot]| dots.iter().map(|d| d.radius.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&a), bits(&b));
    }

    #[test]
    fn dots_are_row_major_and_shifted_by_scaled_noise() {
        let settings = manhattan_settings(3);
        let sampler = GridSampler::new(&settings).unwrap();
        let field = field_for(&settings);
        let dots = sampler.sample(&field, None);
        for gy in 0..3 {
            for gx in 0..3 {
                let dot = dots[gy * 3 + gx];
                let shift = field.sample(gx as f64, gy as f64);
                assert_eq!(dot.x, gx as f64 * 10.0);
                assert_eq!(dot.y, gy as f64 * 10.0 + shift);
            }
        }
    }

    #[test]
    fn amplitude_changes_positions_but_not_radii() {
        let quiet = manhattan_settings(4);
        let loud = Settings {
            amplitude: 5.0,
            ..manhattan_settings(4)
        };
        let a = GridSampler::new(&quiet)
            .unwrap()
            .sample(&field_for(&quiet), None);
        let b = GridSampler::new(&loud)
            .unwrap()
            .sample(&field_for(&loud), None);
        assert_ne!(a, b);
        for (i, (q, l)) in a.iter().zip(&b).enumerate() {
            assert_eq!(q.radius, l.radius, "dot {i}");
            assert_eq!(q.x, l.x, "dot {i}");
            let (dq, dl) = (q.y - (i / 4) as f64 * 10.0, l.y - (i / 4) as f64 * 10.0);
            assert!((dl - 5.0 * dq).abs() < 1e-9, "dot {i}: {dl} vs 5 * {dq}");
        }
    }

    #[test]
    fn zero_amplitude_keeps_dots_on_the_lattice() {
        let settings = Settings {
            amplitude: 0.0,
            ..manhattan_settings(3)
        };
        let sampler = GridSampler::new(&settings).unwrap();
        let dots = sampler.sample(&field_for(&settings), None);
        for (i, dot) in dots.iter().enumerate() {
            assert_eq!((dot.x, dot.y), ((i % 3) as f64 * 10.0, (i / 3) as f64 * 10.0));
        }
        assert!((dots[4].radius - GOLDEN_MANHATTAN_RADII[5]).abs() < 1e-12);
    }

    #[test]
    fn sample_into_reuses_and_clears_buffer() {
        let settings = manhattan_settings(2);
        let sampler = GridSampler::new(&settings).unwrap();
        let field = field_for(&settings);
        let mut out = sampler.sample(&field, None);
        let stale = out.clone();
        out.extend(stale);
        sampler.sample_into(&field, None, &mut out);
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn solid_mode_colors_every_dot() {
        let settings = Settings {
            color_mode: ColorMode::Solid,
            solid_color: Srgb::from_hex("#ff8800").unwrap(),
            ..manhattan_settings(3)
        };
        let sampler = GridSampler::new(&settings).unwrap();
        for dot in sampler.sample(&field_for(&settings), None) {
            assert_eq!(dot.color.to_hex(), "#ff8800");
        }
    }

    #[test]
    fn gradient_mode_starts_at_gradient_start() {
        let settings = manhattan_settings(1);
        let sampler = GridSampler::new(&settings).unwrap();
        let dots = sampler.sample(&field_for(&settings), None);
        // Manhattan is 0 at the origin, so the only dot sits at t = 0.
        assert_eq!(dots[0].radius, settings.dot_min);
        assert_eq!(dots[0].color.to_hex(), settings.gradient_start.to_hex());
    }

    #[test]
    fn equal_dot_bounds_give_constant_radius() {
        let settings = Settings {
            dot_min: 2.0,
            dot_max: 2.0,
            ..manhattan_settings(4)
        };
        let sampler = GridSampler::new(&settings).unwrap();
        for dot in sampler.sample(&field_for(&settings), None) {
            assert_eq!(dot.radius, 2.0);
        }
    }

    #[test]
    fn repel_moves_dots_near_the_cursor_only() {
        let settings = Settings {
            repel_enabled: true,
            repel_radius: 15.0,
            ..manhattan_settings(4)
        };
        let sampler = GridSampler::new(&settings).unwrap();
        let field = field_for(&settings);
        let plain = sampler.sample_point(&field, 1, 1, None);
        let cursor = DVec2::new(12.0, 10.0 + plain.displacement);
        let near = sampler.sample_point(&field, 1, 1, Some(cursor));
        let far = sampler.sample_point(&field, 3, 3, Some(cursor));
        assert!(near.repel.x < 0.0, "{near:?}");
        assert_eq!(far.repel, DVec2::ZERO);
        assert_eq!(near.radius, plain.radius);
        assert_eq!(near.displacement, plain.displacement);
        let moved = sampler.dot(&near);
        assert_eq!(moved.x, 10.0 + near.repel.x);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn kind_strategy() -> impl Strategy<Value = NoiseKind> {
            proptest::sample::select(NoiseKind::ALL.to_vec())
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(32))]

            #[test]
            fn every_grid_has_d_squared_dots_in_radius_range(
                kind in kind_strategy(),
                dimensions in 1_usize..12,
                seed in any::<u64>(),
                time in 0.0_f64..100.0,
                dot_min in 0.0_f64..3.0,
                span in 0.0_f64..5.0,
            ) {
                let settings = Settings {
                    dimensions,
                    noise_type: kind,
                    dot_min,
                    dot_max: dot_min + span,
                    ..Settings::with_seed(seed)
                };
                let sampler = GridSampler::new(&settings).unwrap();
                let mut field = field_for(&settings);
                field.advance(time);
                let dots = sampler.sample(&field, None);
                prop_assert_eq!(dots.len(), dimensions * dimensions);
                for dot in dots {
                    prop_assert!(
                        dot.radius >= settings.dot_min && dot.radius <= settings.dot_max,
                        "radius {} outside [{}, {}]", dot.radius, settings.dot_min, settings.dot_max
                    );
                }
            }
        }
    }
}
