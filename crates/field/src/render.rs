//! Draws particles onto a [`Surface`].

use particle_field_core::Surface;

use crate::particle::Particle;

/// Fills one `size`-sided square per particle at its current position, in field order.
///
/// Later particles overwrite earlier ones where they overlap. The surface is
/// not cleared here.
pub fn render(surface: &mut dyn Surface, particles: &[Particle]) {
    for p in particles {
        surface.fill_rect(p.position.x, p.position.y, p.size(), p.color());
    }
}
