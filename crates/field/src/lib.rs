#![deny(unsafe_code)]
//! Image-sampled particle field engine.
//!
//! A source image is sampled into a sparse grid of coloured particles, each
//! homed at its pixel's position. Every tick, particles are pushed away from
//! the pointer when it comes within the repulsion radius, damped by friction,
//! and eased back toward their origin. Particles start scattered across the
//! field, so the image assembles itself over the first frames.

pub mod integrator;
pub mod params;
pub mod particle;
pub mod render;
pub mod sampler;

use glam::DVec2;
use log::{debug, info, warn};
use particle_field_core::{Engine, FieldError, SourceImage, Surface, Xorshift64};
use serde_json::Value;

pub use integrator::Forces;
pub use params::FieldParams;
pub use particle::Particle;
pub use sampler::{Placement, Sampler};

/// A field of particles sampled from one image.
#[derive(Debug, Clone)]
pub struct ParticleField {
    width: usize,
    height: usize,
    offset: DVec2,
    params: FieldParams,
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Samples `image` into a `width` x `height` field.
    ///
    /// Initial positions come from a PRNG seeded with `seed`; a different seed
    /// gives the same particles scattered differently. Fails on zero field
    /// dimensions or invalid params. An image with no opaque pixels yields an
    /// empty field.
    pub fn new(
        width: usize,
        height: usize,
        image: &SourceImage,
        params: FieldParams,
        seed: u64,
    ) -> Result<Self, FieldError> {
        if width == 0 || height == 0 {
            return Err(FieldError::InvalidDimensions);
        }
        params.validate()?;

        let offset = params
            .placement
            .resolve(image.width(), image.height(), width, height);
        let sampler = Sampler::new(params.stride, offset)?.with_tint(params.tint);
        let mut rng = Xorshift64::new(seed);
        let particles = sampler.sample(
            image,
            DVec2::new(width as f64, height as f64),
            &mut rng,
        );

        if particles.is_empty() {
            warn!(
                "{}x{} image has no opaque pixels on a stride-{} grid; field is empty",
                image.width(),
                image.height(),
                params.stride
            );
        } else {
            info!(
                "sampled {} particles from {}x{} image (stride {}, offset {:?})",
                particles.len(),
                image.width(),
                image.height(),
                params.stride,
                offset
            );
        }

        Ok(Self {
            width,
            height,
            offset,
            params,
            particles,
        })
    }

    /// Builds a field from a JSON params object (see [`FieldParams::from_json`]).
    pub fn from_json(
        width: usize,
        height: usize,
        image: &SourceImage,
        json_params: &Value,
        seed: u64,
    ) -> Result<Self, FieldError> {
        Self::new(width, height, image, FieldParams::from_json(json_params)?, seed)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Top-left corner of the sampled image in field coordinates.
    pub fn offset(&self) -> DVec2 {
        self.offset
    }

    pub fn field_params(&self) -> &FieldParams {
        &self.params
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Mean distance from position to origin; 0 once every particle is home.
    pub fn mean_displacement(&self) -> f64 {
        if self.particles.is_empty() {
            return 0.0;
        }
        let total: f64 = self
            .particles
            .iter()
            .map(|p| p.position.distance(p.origin()))
            .sum();
        total / self.particles.len() as f64
    }
}

impl Engine for ParticleField {
    fn step(&mut self, pointer: Option<DVec2>) {
        let forces = self.params.forces;
        for p in &mut self.particles {
            integrator::update(p, pointer, &forces);
        }
        if self.params.sanitize_non_finite {
            let reset = self
                .particles
                .iter_mut()
                .map(integrator::sanitize)
                .filter(|&touched| touched)
                .count();
            if reset > 0 {
                debug!("reset {reset} particles with non-finite state");
            }
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        render::render(surface, &self.particles);
    }

    fn params(&self) -> Value {
        self.params.to_json()
    }

    fn param_schema(&self) -> Value {
        FieldParams::schema()
    }
}
