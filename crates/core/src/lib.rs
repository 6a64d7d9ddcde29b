#![deny(unsafe_code)]
//! Core types and traits for the particle-field animation system.
//!
//! Provides the `Engine` trait, the `Surface` drawing abstraction with its
//! RGBA `Canvas` implementation, the decoded `SourceImage`, the shared
//! `PointerCell`, the `Controller` animation loop, `Rgb` colours, the
//! `Xorshift64` PRNG, and parameter helpers.

pub mod canvas;
pub mod color;
pub mod controller;
pub mod engine;
pub mod error;
pub mod image;
pub mod params;
pub mod pointer;
pub mod prng;
pub mod surface;

pub use canvas::Canvas;
pub use color::Rgb;
pub use controller::{CancellationToken, Controller, FrameClock};
pub use engine::Engine;
pub use error::FieldError;
pub use image::SourceImage;
pub use pointer::{PointerCell, ViewportMapping};
pub use prng::Xorshift64;
pub use surface::Surface;
