//! Pure-computation RGBA8 rasterization of a dot frame.
//!
//! This module has no feature gate so any output path can share it.

use fluid_core::color::Srgb;
use fluid_core::error::EngineError;
use fluid_core::sampler::Dot;
use fluid_core::settings::Settings;

/// Largest canvas side in pixels.
pub const MAX_CANVAS_SIDE: usize = 16_384;

/// Square pixel canvas and the world-to-pixel mapping onto it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Canvas width and height in pixels.
    pub side: usize,
    /// Pixels per world unit.
    pub scale: f64,
    /// World-space border around the grid.
    pub margin: f64,
}

impl Viewport {
    /// Pixel coordinates of a world-space point.
    pub fn to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        ((x + self.margin) * self.scale, (y + self.margin) * self.scale)
    }
}

/// Sizes a square canvas for `settings` at `scale` pixels per world unit.
///
/// The margin fits the largest dot plus the largest noise shift
/// (`|amplitude|`, since every source stays within [-1, 1]), plus the
/// largest push when repulsion is enabled. Returns `EngineError::InvalidScale` if `scale` is not
/// finite and positive or the canvas would exceed [`MAX_CANVAS_SIDE`].
pub fn canvas_extent(settings: &Settings, scale: f64) -> Result<Viewport, EngineError> {
    settings.validate()?;
    if !(scale.is_finite() && scale > 0.0) {
        return Err(EngineError::InvalidScale(scale));
    }
    let push = if settings.repel_enabled {
        settings.max_displacement
    } else {
        0.0
    };
    let margin = settings.dot_max + settings.amplitude.abs() + push;
    let span = (settings.dimensions - 1) as f64 * settings.size + 2.0 * margin;
    let side = (span * scale).ceil();
    if !side.is_finite() || side > MAX_CANVAS_SIDE as f64 {
        return Err(EngineError::InvalidScale(scale));
    }
    Ok(Viewport {
        side: (side as usize).max(1),
        scale,
        margin,
    })
}

/// Draws `dots` in order over a `background` fill.
///
/// Each dot is a hard-edged disc: a pixel takes the dot's color when its
/// centre lies within `radius · scale` of the dot's centre. Later dots
/// cover earlier ones. Returns `side * side * 4` bytes, alpha always 255.
pub fn rasterize(dots: &[Dot], viewport: &Viewport, background: Srgb) -> Vec<u8> {
    let side = viewport.side;
    let [br, bg, bb] = background.to_rgb8();
    let mut buf: Vec<u8> = std::iter::repeat([br, bg, bb, 255])
        .take(side * side)
        .flatten()
        .collect();

    for dot in dots {
        let (cx, cy) = viewport.to_pixel(dot.x, dot.y);
        let r = dot.radius * viewport.scale;
        if !(cx.is_finite() && cy.is_finite() && r > 0.0) {
            continue;
        }
        let span = |c: f64| {
            let lo = (c - r).floor().max(0.0) as usize;
            let hi = (c + r).ceil().min(side as f64) as usize;
            lo..hi
        };
        let [cr, cg, cb] = dot.color.to_rgb8();
        let r2 = r * r;
        for py in span(cy) {
            let dy = py as f64 + 0.5 - cy;
            for px in span(cx) {
                let dx = px as f64 + 0.5 - cx;
                if dx * dx + dy * dy <= r2 {
                    let i = (py * side + px) * 4;
                    buf[i..i + 4].copy_from_slice(&[cr, cg, cb, 255]);
                }
            }
        }
    }
    buf
}
