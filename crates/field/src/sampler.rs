//! Converts a decoded image into particle seeds.
//!
//! The image is scanned on a `stride`-spaced grid, row by row. Every grid
//! point whose alpha is non-zero yields one particle homed at that pixel
//! (translated by the placement offset) and scattered to a random starting
//! point inside the field, so the image assembles itself over the first
//! frames. Transparent pixels yield nothing, leaving only the silhouette.

use glam::DVec2;
use particle_field_core::{FieldError, Rgb, SourceImage, Xorshift64};

use crate::particle::Particle;

/// Where the image sits inside the field.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Placement {
    /// Centred, rounded down to whole pixels. The offset is negative when
    /// the image is larger than the field.
    #[default]
    Centered,
    /// Explicit top-left corner in field coordinates.
    Offset { x: f64, y: f64 },
}

impl Placement {
    /// Top-left corner of an `image_*` sized image inside a `field_*` sized field.
    pub fn resolve(
        &self,
        image_width: usize,
        image_height: usize,
        field_width: usize,
        field_height: usize,
    ) -> DVec2 {
        match *self {
            Placement::Centered => DVec2::new(
                ((field_width as f64 - image_width as f64) / 2.0).floor(),
                ((field_height as f64 - image_height as f64) / 2.0).floor(),
            ),
            Placement::Offset { x, y } => DVec2::new(x, y),
        }
    }
}

/// Grid sampler settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampler {
    stride: usize,
    offset: DVec2,
    tint: Option<Rgb>,
}

impl Sampler {
    /// Returns `FieldError::InvalidStride` if `stride` is zero.
    pub fn new(stride: usize, offset: DVec2) -> Result<Self, FieldError> {
        if stride == 0 {
            return Err(FieldError::InvalidStride);
        }
        Ok(Self {
            stride,
            offset,
            tint: None,
        })
    }

    /// Paints every particle `tint` instead of its sampled colour.
    pub fn with_tint(mut self, tint: Option<Rgb>) -> Self {
        self.tint = tint;
        self
    }

    /// Scans `image` and returns particles in row-major grid order.
    ///
    /// Starting positions are drawn from `rng` inside `[0, bounds.x) x [0, bounds.y)`,
    /// one `(x, y)` pair per emitted particle in emission order.
    pub fn sample(&self, image: &SourceImage, bounds: DVec2, rng: &mut Xorshift64) -> Vec<Particle> {
        let mut particles = Vec::new();
        let size = self.stride as f64;
        for y in (0..image.height()).step_by(self.stride) {
            for x in (0..image.width()).step_by(self.stride) {
                let Some([r, g, b, a]) = image.pixel(x, y) else {
                    continue;
                };
                if a == 0 {
                    continue;
                }
                let origin = self.offset + DVec2::new(x as f64, y as f64);
                let color = self.tint.unwrap_or(Rgb::new(r, g, b));
                let position = rng.next_point_in(bounds.x, bounds.y);
                particles.push(Particle::new(origin, position, color, size));
            }
        }
        particles
    }
}
