//! PNG output of a rasterized frame.
//!
//! Feature-gated behind `png` (default on). The buffer itself comes from
//! [`crate::pixel::rasterize`].

use fluid_core::error::EngineError;
use std::path::Path;

/// Writes an RGBA8 buffer of `width × height` pixels as a PNG.
///
/// Returns `EngineError::Io` if a side overflows `u32`, the buffer length
/// does not match, or the write fails.
pub fn write_png(buffer: Vec<u8>, width: usize, height: usize, path: &Path) -> Result<(), EngineError> {
    let w = u32::try_from(width).map_err(|_| EngineError::Io(format!("width {width} too large")))?;
    let h =
        u32::try_from(height).map_err(|_| EngineError::Io(format!("height {height} too large")))?;
    let img = image::RgbaImage::from_raw(w, h, buffer)
        .ok_or_else(|| EngineError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| EngineError::Io(e.to_string()))?;
    tracing::debug!(path = %path.display(), width, height, "wrote png");
    Ok(())
}
