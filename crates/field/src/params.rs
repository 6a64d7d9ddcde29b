//! Tunable settings of a particle field and their JSON form.

use particle_field_core::params::{param_bool, param_f64, param_opt_f64, param_str, param_usize};
use particle_field_core::{FieldError, Rgb};
use serde_json::{json, Value};

use crate::integrator::{Forces, DEFAULT_EASE, DEFAULT_FRICTION, DEFAULT_REPULSION_RADIUS_SQ};
use crate::sampler::Placement;

/// Default spacing between sampled pixels.
pub const DEFAULT_STRIDE: usize = 2;

/// Everything needed to build and animate a field, apart from the image.
///
/// [`Default`] matches the portfolio hero animation except for the tint,
/// which is off so sampled colours show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldParams {
    /// Pixel spacing of the sampling grid, also the rendered square size.
    pub stride: usize,
    pub forces: Forces,
    pub placement: Placement,
    /// Fixed colour for every particle instead of the sampled one.
    pub tint: Option<Rgb>,
    /// Reset non-finite particle state after each step.
    pub sanitize_non_finite: bool,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            stride: DEFAULT_STRIDE,
            forces: Forces::default(),
            placement: Placement::Centered,
            tint: None,
            sanitize_non_finite: false,
        }
    }
}

impl FieldParams {
    /// Reads params from a JSON object, falling back to defaults per key.
    ///
    /// `offset_x` and `offset_y` must both be present to select an explicit
    /// placement. Fails on a zero stride, an unparsable tint, or non-finite
    /// force constants.
    pub fn from_json(params: &Value) -> Result<Self, FieldError> {
        let forces = Forces {
            repulsion_radius_sq: param_f64(
                params,
                "repulsion_radius_sq",
                DEFAULT_REPULSION_RADIUS_SQ,
            ),
            friction: param_f64(params, "friction", DEFAULT_FRICTION),
            ease: param_f64(params, "ease", DEFAULT_EASE),
        };

        let placement = match (
            param_opt_f64(params, "offset_x"),
            param_opt_f64(params, "offset_y"),
        ) {
            (Some(x), Some(y)) => Placement::Offset { x, y },
            _ => Placement::Centered,
        };

        let tint = param_str(params, "tint").map(Rgb::from_hex).transpose()?;

        let parsed = Self {
            stride: param_usize(params, "stride", DEFAULT_STRIDE),
            forces,
            placement,
            tint,
            sanitize_non_finite: param_bool(params, "sanitize_non_finite", false),
        };
        parsed.validate()?;
        Ok(parsed)
    }

    /// Checks the stride, the force ranges advertised by [`schema`](Self::schema)
    /// and that offsets are finite.
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.stride == 0 {
            return Err(FieldError::InvalidStride);
        }
        finite("repulsion_radius_sq", self.forces.repulsion_radius_sq)?;
        in_range("repulsion_radius_sq", self.forces.repulsion_radius_sq, 0.0, f64::INFINITY)?;
        in_range("friction", self.forces.friction, 0.0, 1.0)?;
        in_range("ease", self.forces.ease, 0.0, 1.0)?;
        if let Placement::Offset { x, y } = self.placement {
            finite("offset_x", x)?;
            finite("offset_y", y)?;
        }
        Ok(())
    }

    pub fn to_json(&self) -> Value {
        let mut v = json!({
            "stride": self.stride,
            "repulsion_radius_sq": self.forces.repulsion_radius_sq,
            "friction": self.forces.friction,
            "ease": self.forces.ease,
            "sanitize_non_finite": self.sanitize_non_finite,
        });
        if let Placement::Offset { x, y } = self.placement {
            v["offset_x"] = json!(x);
            v["offset_y"] = json!(y);
        }
        if let Some(tint) = self.tint {
            v["tint"] = json!(tint.to_hex());
        }
        v
    }

    pub fn schema() -> Value {
        json!({
            "stride": {
                "type": "integer",
                "default": DEFAULT_STRIDE,
                "min": 1,
                "description": "Pixel spacing of the sampling grid and size of each rendered particle"
            },
            "repulsion_radius_sq": {
                "type": "number",
                "default": DEFAULT_REPULSION_RADIUS_SQ,
                "min": 0.0,
                "description": "Squared pointer distance below which particles are pushed away; also the force numerator"
            },
            "friction": {
                "type": "number",
                "default": DEFAULT_FRICTION,
                "min": 0.0,
                "max": 1.0,
                "description": "Per-tick velocity damping factor"
            },
            "ease": {
                "type": "number",
                "default": DEFAULT_EASE,
                "min": 0.0,
                "max": 1.0,
                "description": "Per-tick fraction of the way back to the origin"
            },
            "offset_x": {
                "type": "number",
                "description": "Image left edge in field coordinates; centred when omitted"
            },
            "offset_y": {
                "type": "number",
                "description": "Image top edge in field coordinates; centred when omitted"
            },
            "tint": {
                "type": "string",
                "description": "Hex colour painted on every particle instead of the sampled colour"
            },
            "sanitize_non_finite": {
                "type": "boolean",
                "default": false,
                "description": "Reset NaN/infinite particle state after each tick"
            }
        })
    }
}

fn in_range(name: &str, value: f64, min: f64, max: f64) -> Result<(), FieldError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(FieldError::InvalidParam {
            name: name.to_owned(),
            reason: format!("must be in [{min}, {max}], got {value}"),
        })
    }
}

fn finite(name: &str, value: f64) -> Result<(), FieldError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(FieldError::InvalidParam {
            name: name.to_owned(),
            reason: format!("must be finite, got {value}"),
        })
    }
}
