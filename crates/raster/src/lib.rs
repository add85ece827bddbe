#![deny(unsafe_code)]
//! CPU rasterization of dot grids.
//!
//! [`pixel`] turns a frame of dots into an RGBA8 buffer and is always
//! available. [`snapshot`] writes that buffer as a PNG and sits behind the
//! `png` feature (default on) so the `image` crate stays optional.

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

pub use pixel::{canvas_extent, rasterize, Viewport, MAX_CANVAS_SIDE};
