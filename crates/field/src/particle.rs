//! The particle record.

use glam::DVec2;
use particle_field_core::Rgb;

/// One animated point sampled from an opaque source pixel.
///
/// Plain data with no reference back to its field; shared settings reach
/// the integrator as parameters. `origin`, `color`, and `size` are fixed at
/// construction, only `position` and `velocity` evolve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    origin: DVec2,
    color: Rgb,
    size: f64,
    /// Current location in field coordinates.
    pub position: DVec2,
    /// Displacement carried into the next tick.
    pub velocity: DVec2,
}

impl Particle {
    /// A particle at rest at `position`, homing to `origin`.
    pub fn new(origin: DVec2, position: DVec2, color: Rgb, size: f64) -> Self {
        Self {
            origin,
            color,
            size,
            position,
            velocity: DVec2::ZERO,
        }
    }

    /// Same particle with a non-zero starting velocity.
    pub fn with_velocity(mut self, velocity: DVec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Home position in field coordinates (image offset plus pixel position).
    pub fn origin(&self) -> DVec2 {
        self.origin
    }

    /// Fill colour, sampled or tinted.
    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Side length of the rendered square (the sampling stride).
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Whether the particle sits exactly on its origin.
    pub fn is_home(&self) -> bool {
        self.position == self.origin
    }
}
