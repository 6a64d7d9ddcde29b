//! Decoding image files into a [`SourceImage`].

use std::path::Path;

use log::debug;
use particle_field_core::{FieldError, SourceImage};

/// Decodes the image at `path` (format guessed from contents) into RGBA8.
///
/// Returns `FieldError::Io` if the file cannot be read or decoded, and
/// `FieldError::InvalidDimensions` for a zero-sized image.
pub fn load_image(path: &Path) -> Result<SourceImage, FieldError> {
    let img = image::ImageReader::open(path)
        .map_err(|e| FieldError::Io(format!("{}: {e}", path.display())))?
        .with_guessed_format()
        .map_err(|e| FieldError::Io(format!("{}: {e}", path.display())))?
        .decode()
        .map_err(|e| FieldError::Io(format!("{}: {e}", path.display())))?;
    debug!(
        "decoded {} ({}x{})",
        path.display(),
        img.width(),
        img.height()
    );
    into_source(img)
}

/// Decodes an in-memory encoded image into RGBA8.
pub fn decode_bytes(bytes: &[u8]) -> Result<SourceImage, FieldError> {
    let img = image::load_from_memory(bytes).map_err(|e| FieldError::Io(e.to_string()))?;
    into_source(img)
}

fn into_source(img: image::DynamicImage) -> Result<SourceImage, FieldError> {
    let rgba = img.into_rgba8();
    let (w, h) = rgba.dimensions();
    SourceImage::from_rgba(w as usize, h as usize, rgba.into_raw())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded_png(w: u32, h: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_fn(w, h, |x, _| {
            if x == 0 {
                image::Rgba([10, 20, 30, 255])
            } else {
                image::Rgba([0, 0, 0, 0])
            }
        });
        let mut bytes = Vec::new();
        img.write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )
        .unwrap();
        bytes
    }

    #[test]
    fn decode_bytes_keeps_alpha_and_color() {
        let img = decode_bytes(&encoded_png(3, 2)).unwrap();
        assert_eq!((img.width(), img.height()), (3, 2));
        assert_eq!(img.pixel(0, 1), Some([10, 20, 30, 255]));
        assert_eq!(img.pixel(2, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn decode_bytes_rejects_garbage() {
        assert!(matches!(
            decode_bytes(b"definitely not a png"),
            Err(FieldError::Io(_))
        ));
    }

    #[test]
    fn load_image_reads_file_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portrait");
        std::fs::write(&path, encoded_png(4, 4)).unwrap();
        let img = load_image(&path).unwrap();
        assert_eq!(img.width(), 4);
    }

    #[test]
    fn load_image_reports_missing_file_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.png");
        let err = load_image(&path).unwrap_err();
        assert!(err.to_string().contains("missing.png"), "got: {err}");
    }
}
