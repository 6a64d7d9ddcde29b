//! Error types for the particle-field core.

use thiserror::Error;

/// Errors produced while constructing fields, images, and surfaces.
///
/// Simulation ticks never fail; every variant here is a construction-time
/// or I/O failure.
#[derive(Debug, Error)]
pub enum FieldError {
    /// Width or height was zero (or their product overflowed).
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// The sampling stride was zero.
    #[error("invalid stride: sampling stride must be at least 1")]
    InvalidStride,

    /// An RGBA buffer did not match `width * height * 4` bytes.
    #[error("image buffer has {got} bytes, expected {expected}")]
    ImageBufferMismatch { expected: usize, got: usize },

    /// A colour string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A parameter had a value outside its accepted domain.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParam { name: String, reason: String },

    /// Reading or writing an external resource failed.
    #[error("i/o error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_displays_readable_message() {
        let msg = FieldError::InvalidDimensions.to_string();
        assert!(
            msg.contains("width") && msg.contains("height"),
            "expected message mentioning width and height, got: {msg}"
        );
    }

    #[test]
    fn invalid_stride_mentions_stride() {
        let msg = FieldError::InvalidStride.to_string();
        assert!(msg.contains("stride"), "got: {msg}");
    }

    #[test]
    fn buffer_mismatch_includes_both_sizes() {
        let msg = FieldError::ImageBufferMismatch {
            expected: 64,
            got: 60,
        }
        .to_string();
        assert!(msg.contains("64"), "missing expected size in: {msg}");
        assert!(msg.contains("60"), "missing actual size in: {msg}");
    }

    #[test]
    fn invalid_param_includes_name_and_reason() {
        let msg = FieldError::InvalidParam {
            name: "friction".into(),
            reason: "must be finite".into(),
        }
        .to_string();
        assert!(msg.contains("friction"), "missing name in: {msg}");
        assert!(msg.contains("finite"), "missing reason in: {msg}");
    }

    #[test]
    fn io_includes_message() {
        let msg = FieldError::Io("disk full".into()).to_string();
        assert!(msg.contains("disk full"), "missing message in: {msg}");
    }

    #[test]
    fn field_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FieldError>();
    }

    #[test]
    fn field_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<FieldError>();
    }
}
