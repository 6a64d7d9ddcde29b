//! The `Engine` trait driven by the [`Controller`](crate::controller::Controller).
//!
//! The trait is object-safe so hosts can hold a `Box<dyn Engine>`.

use glam::DVec2;
use serde_json::Value;

use crate::surface::Surface;

/// A per-frame animation that draws itself onto a [`Surface`].
///
/// Stepping is infallible: any degenerate numeric state is carried into the
/// next frame rather than reported.
pub trait Engine {
    /// Advance the simulation by one tick.
    ///
    /// `pointer` is the latest pointer position in field coordinates, or
    /// `None` if the host has not reported one.
    fn step(&mut self, pointer: Option<DVec2>);

    /// Draw the current state. The surface is not cleared here.
    fn render(&self, surface: &mut dyn Surface);

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing each parameter's type, default, and meaning.
    fn param_schema(&self) -> Value;
}
