//! PNG output of rendered frames.

use std::path::{Path, PathBuf};

use particle_field_core::{Canvas, FieldError, Surface};

/// Writes the canvas pixels as an RGBA PNG.
///
/// Returns `FieldError::InvalidDimensions` if the canvas dimensions overflow
/// `u32`, or `FieldError::Io` on write failure.
pub fn write_png(canvas: &Canvas, path: &Path) -> Result<(), FieldError> {
    let w = u32::try_from(canvas.width()).map_err(|_| FieldError::InvalidDimensions)?;
    let h = u32::try_from(canvas.height()).map_err(|_| FieldError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, canvas.pixels().to_vec())
        .ok_or_else(|| FieldError::Io("RGBA buffer size mismatch".into()))?;
    img.save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| FieldError::Io(format!("{}: {e}", path.display())))
}

/// `dir/frame_NNNNN.png` for frame index `frame`.
pub fn frame_path(dir: &Path, frame: u64) -> PathBuf {
    dir.join(format!("frame_{frame:05}.png"))
}
