//! 8-bit RGB colour sampled from source images.
//!
//! Particles carry the colour of the pixel they were sampled from, so the
//! colour type stays in the image's native 8-bit space. Hex strings are the
//! human-readable form used in params and serialized output.

use crate::error::FieldError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An opaque 8-bit sRGB colour.
///
/// Serializes as a hex string `"#rrggbb"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Creates a colour from its three channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a hex colour string like "#ff00aa" or "ff00aa" (case insensitive).
    ///
    /// Returns `FieldError::InvalidColor` if the input is not a valid 6-digit hex colour.
    pub fn from_hex(hex: &str) -> Result<Rgb, FieldError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(FieldError::InvalidColor(format!(
                "expected 6 hex digits, got '{hex}'"
            )));
        }
        let channel = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|e| FieldError::InvalidColor(format!("invalid {name} component: {e}")))
        };
        Ok(Rgb {
            r: channel(0..2, "red")?,
            g: channel(2..4, "green")?,
            b: channel(4..6, "blue")?,
        })
    }

    /// Formats the colour as `"#rrggbb"`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// The colour as an opaque RGBA quadruple.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_hex_parses_with_and_without_hash() {
        assert_eq!(Rgb::from_hex("#191924").unwrap(), Rgb::new(25, 25, 36));
        assert_eq!(Rgb::from_hex("ff00AA").unwrap(), Rgb::new(255, 0, 170));
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        assert!(matches!(
            Rgb::from_hex("#fff"),
            Err(FieldError::InvalidColor(_))
        ));
    }

    #[test]
    fn from_hex_rejects_non_hex_digits() {
        assert!(Rgb::from_hex("#gg0000").is_err());
    }

    #[test]
    fn from_hex_rejects_multibyte_input() {
        // Six bytes but not six ASCII digits; slicing must not panic.
        assert!(Rgb::from_hex("ééé").is_err());
    }

    #[test]
    fn to_hex_is_lowercase_with_hash() {
        assert_eq!(Rgb::new(255, 0, 170).to_hex(), "#ff00aa");
    }

    #[test]
    fn to_rgba_is_opaque() {
        assert_eq!(Rgb::new(1, 2, 3).to_rgba(), [1, 2, 3, 255]);
    }

    #[test]
    fn serializes_as_hex_string() {
        let json = serde_json::to_string(&Rgb::new(25, 25, 36)).unwrap();
        assert_eq!(json, "\"#191924\"");
        let back: Rgb = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Rgb::new(25, 25, 36));
    }

    #[test]
    fn deserialize_rejects_bad_hex() {
        assert!(serde_json::from_str::<Rgb>("\"nope\"").is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn hex_round_trip_is_lossless(r: u8, g: u8, b: u8) {
                let c = Rgb::new(r, g, b);
                prop_assert_eq!(Rgb::from_hex(&c.to_hex()).unwrap(), c);
            }
        }
    }
}
