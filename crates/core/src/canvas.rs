//! In-memory RGBA raster implementing [`Surface`].
//!
//! A [`Canvas`] holds dimensions, an optional background colour, and a
//! row-major RGBA8 pixel buffer. Clearing resets every pixel to the
//! background (or fully transparent when there is none); rectangles are
//! opaque overwrites snapped to the nearest pixel edges.

use crate::color::Rgb;
use crate::error::FieldError;
use crate::surface::Surface;

const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

/// An RGBA8 raster with a clear colour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    background: Option<Rgb>,
    pixels: Vec<u8>,
}

impl Canvas {
    /// Creates a cleared canvas.
    ///
    /// Returns `FieldError::InvalidDimensions` if width or height is zero,
    /// or if the buffer size would overflow `usize`.
    pub fn new(width: usize, height: usize, background: Option<Rgb>) -> Result<Self, FieldError> {
        if width == 0 || height == 0 {
            return Err(FieldError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(FieldError::InvalidDimensions)?;
        let mut canvas = Self {
            width,
            height,
            background,
            pixels: vec![0; len],
        };
        canvas.clear();
        Ok(canvas)
    }

    /// Clear colour; `None` clears to transparent.
    pub fn background(&self) -> Option<Rgb> {
        self.background
    }

    /// Sets the clear colour; takes effect at the next `clear`.
    pub fn set_background(&mut self, background: Option<Rgb>) {
        self.background = background;
    }

    /// Row-major RGBA8 bytes, `width * height * 4` long.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// RGBA at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        let p = &self.pixels[i..i + 4];
        Some([p[0], p[1], p[2], p[3]])
    }

    /// Number of pixels whose alpha is non-zero.
    pub fn painted_count(&self) -> usize {
        self.pixels.chunks_exact(4).filter(|p| p[3] != 0).count()
    }

    /// Half-open pixel span `[round(start), round(start + size))` clipped to `[0, limit)`.
    ///
    /// Rounding keeps a particle resting one ulp short of its origin on the
    /// same pixels as one resting exactly on it.
    fn span(start: f64, size: f64, limit: usize) -> Option<(usize, usize)> {
        let lo = start.round().max(0.0);
        let hi = (start + size).round().min(limit as f64);
        (lo < hi).then(|| (lo as usize, hi as usize))
    }
}

impl Surface for Canvas {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn clear(&mut self) {
        let fill = self.background.map_or(TRANSPARENT, Rgb::to_rgba);
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&fill);
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, size: f64, color: Rgb) {
        if !(x.is_finite() && y.is_finite() && size.is_finite()) || size <= 0.0 {
            return;
        }
        let (Some((x0, x1)), Some((y0, y1))) = (
            Self::span(x, size, self.width),
            Self::span(y, size, self.height),
        ) else {
            return;
        };
        let rgba = color.to_rgba();
        for row in y0..y1 {
            let start = (row * self.width + x0) * 4;
            let end = (row * self.width + x1) * 4;
            for px in self.pixels[start..end].chunks_exact_mut(4) {
                px.copy_from_slice(&rgba);
            }
        }
    }
}
