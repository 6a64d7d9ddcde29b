//! The drawing surface an engine renders onto.

use crate::color::Rgb;

/// A raster target supporting the two operations the field renderer needs.
///
/// Implementations decide how fractional and out-of-range coordinates map to
/// pixels; callers never clamp.
pub trait Surface {
    fn width(&self) -> usize;

    fn height(&self) -> usize;

    /// Resets every pixel so nothing from the previous frame remains visible.
    fn clear(&mut self);

    /// Fills an axis-aligned square of side `size` with its top-left corner at `(x, y)`.
    fn fill_rect(&mut self, x: f64, y: f64, size: f64, color: Rgb);
}
