//! One-tick update of a single particle: pointer repulsion, friction, spring-back.
//!
//! Evaluation order is fixed so results reproduce bit for bit:
//!
//! 1. `d = pointer - position`, `distance = d.x² + d.y²`
//! 2. `force = -repulsion_radius_sq / distance`
//! 3. if `distance < repulsion_radius_sq`: `velocity += force * (cos θ, sin θ)`, `θ = atan2(d.y, d.x)`
//! 4. `velocity *= friction`
//! 5. `position += velocity + (origin - position) * ease`
//!
//! The force numerator is the same constant the squared distance is compared
//! against, so the push scales as `R / d²` rather than a symmetric inverse
//! square law. A pointer exactly on a particle divides by zero; the
//! resulting infinities and NaNs are left to propagate.

use glam::DVec2;

use crate::particle::Particle;

pub const DEFAULT_REPULSION_RADIUS_SQ: f64 = 10_000.0;
pub const DEFAULT_FRICTION: f64 = 0.8;
pub const DEFAULT_EASE: f64 = 0.25;

/// Constants shared by every particle in a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Forces {
    /// Squared-distance threshold for repulsion, also the force numerator.
    pub repulsion_radius_sq: f64,
    /// Per-tick multiplicative velocity damping.
    pub friction: f64,
    /// Per-tick fraction of the remaining distance to origin.
    pub ease: f64,
}

impl Default for Forces {
    fn default() -> Self {
        Self {
            repulsion_radius_sq: DEFAULT_REPULSION_RADIUS_SQ,
            friction: DEFAULT_FRICTION,
            ease: DEFAULT_EASE,
        }
    }
}

/// Advances `particle` by one tick.
///
/// With no pointer, repulsion is skipped; friction and spring-back still apply.
pub fn update(particle: &mut Particle, pointer: Option<DVec2>, forces: &Forces) {
    if let Some(pointer) = pointer {
        let dx = pointer.x - particle.position.x;
        let dy = pointer.y - particle.position.y;
        let distance = dx * dx + dy * dy;
        let force = -forces.repulsion_radius_sq / distance;
        if distance < forces.repulsion_radius_sq {
            let angle = dy.atan2(dx);
            particle.velocity.x += force * angle.cos();
            particle.velocity.y += force * angle.sin();
        }
    }

    particle.velocity.x *= forces.friction;
    particle.velocity.y *= forces.friction;

    let origin = particle.origin();
    particle.position.x += particle.velocity.x + (origin.x - particle.position.x) * forces.ease;
    particle.position.y += particle.velocity.y + (origin.y - particle.position.y) * forces.ease;
}

/// Resets non-finite velocity components to zero and non-finite position
/// components to the origin. Returns whether anything was reset.
pub fn sanitize(particle: &mut Particle) -> bool {
    let origin = particle.origin();
    let mut touched = false;
    for axis in 0..2 {
        if !particle.velocity[axis].is_finite() {
            particle.velocity[axis] = 0.0;
            touched = true;
        }
        if !particle.position[axis].is_finite() {
            particle.position[axis] = origin[axis];
            touched = true;
        }
    }
    touched
}
