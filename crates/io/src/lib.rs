#![deny(unsafe_code)]
//! File-side collaborators of the particle field: decoding source images and
//! writing rendered frames.
//!
//! The core crates never touch the filesystem or an image codec; the CLI and
//! tests go through this crate. PNG is always available, JPEG and WebP
//! decoding sit behind the `jpeg` and `webp` features.

pub mod decode;
pub mod snapshot;

pub use decode::{decode_bytes, load_image};
pub use snapshot::{frame_path, write_png};
