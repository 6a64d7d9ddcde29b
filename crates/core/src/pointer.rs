//! Shared pointer position and client-to-field coordinate mapping.
//!
//! The pointer is written by the host's input handling and read once per
//! animation tick. [`PointerCell`] is a cheap clonable handle over one locked
//! slot, so input and frame callbacks may live on different threads and a
//! reader always sees an (x, y) pair that was written together.

use std::sync::{Arc, PoisonError, RwLock};

use glam::DVec2;

/// Shared pointer position in field coordinates.
#[derive(Debug, Clone, Default)]
pub struct PointerCell {
    slot: Arc<RwLock<Option<DVec2>>>,
}

impl PointerCell {
    /// A cell with no pointer position.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new position. Values are not clamped; a NaN component
    /// counts as no pointer.
    pub fn set(&self, position: DVec2) {
        let value = (!position.is_nan()).then_some(position);
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = value;
    }

    /// Forgets the position, e.g. when the pointer leaves the page.
    pub fn clear(&self) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// The latest position, or `None` if none was reported.
    pub fn get(&self) -> Option<DVec2> {
        *self.slot.read().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Maps page client coordinates onto a field centred in the viewport.
///
/// The field is assumed to be horizontally and vertically centred in the
/// viewport, shifted up by `bias_y` pixels, on a page scrolled by `scroll_y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportMapping {
    pub field_width: f64,
    pub field_height: f64,
    pub bias_y: f64,
}

impl ViewportMapping {
    /// Vertical offset of the hero canvas below the top of the page.
    pub const DEFAULT_BIAS_Y: f64 = 225.0;

    pub fn new(field_width: f64, field_height: f64) -> Self {
        Self {
            field_width,
            field_height,
            bias_y: Self::DEFAULT_BIAS_Y,
        }
    }

    pub fn with_bias_y(mut self, bias_y: f64) -> Self {
        self.bias_y = bias_y;
        self
    }

    /// Converts a client-space pointer position into field coordinates.
    pub fn to_field(
        &self,
        client: DVec2,
        viewport_width: f64,
        viewport_height: f64,
        scroll_y: f64,
    ) -> DVec2 {
        DVec2::new(
            client.x - (viewport_width - self.field_width) / 2.0,
            client.y + scroll_y - self.bias_y - (viewport_height - self.field_height) / 2.0,
        )
    }
}
