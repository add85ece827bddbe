//! Two-stop gradient stored in OKLCh, sampled by interpolation.
//!
//! The dot grid's gradient color mode is keyed by the same normalized value
//! that sets each dot's radius. Interpolating in OKLCh with shortest-arc hue
//! keeps the midpoint from going muddy.

use crate::color::{oklch_to_srgb, srgb_to_oklch, OkLch, Srgb};

/// Gradient between two colors: `sample(0.0)` is the start, `sample(1.0)` the end.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    start: OkLch,
    end: OkLch,
}

impl Palette {
    /// Gradient from `start` to `end`.
    pub fn two_stop(start: Srgb, end: Srgb) -> Self {
        Self {
            start: srgb_to_oklch(start),
            end: srgb_to_oklch(end),
        }
    }

    /// Samples at `t`, clamped to [0, 1]. NaN samples the start color.
    pub fn sample(&self, t: f64) -> Srgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let (c0, c1) = (&self.start, &self.end);
        oklch_to_srgb(OkLch {
            l: c0.l + t * (c1.l - c0.l),
            c: c0.c + t * (c1.c - c0.c),
            h: interpolate_hue(c0.h, c1.h, t),
        })
    }
}

/// Shortest-arc hue interpolation, wrapping at 360.
fn interpolate_hue(h0: f64, h1: f64, t: f64) -> f64 {
    let delta = match h1 - h0 {
        d if d > 180.0 => d - 360.0,
        d if d < -180.0 => d + 360.0,
        d => d,
    };
    (h0 + t * delta).rem_euclid(360.0)
}
