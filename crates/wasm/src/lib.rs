//! Browser host for the particle field.
//!
//! JS owns the `requestAnimationFrame` loop: it forwards pointer events and
//! calls `tick()` then `draw(ctx)` once per frame until `teardown()`.

use glam::DVec2;
use particle_field_core::{
    Canvas, Controller, FieldError, PointerCell, SourceImage, Surface, ViewportMapping,
};
use particle_field_sim::ParticleField;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::Clamped;
use web_sys::{CanvasRenderingContext2d, ImageData};

/// Platform-independent state behind [`ParticleFieldView`].
struct ViewState {
    controller: Controller<ParticleField>,
    canvas: Canvas,
    mapping: ViewportMapping,
}

impl ViewState {
    fn new(
        field_width: usize,
        field_height: usize,
        rgba: Vec<u8>,
        image_width: usize,
        image_height: usize,
        seed: u64,
        params_json: &str,
    ) -> Result<Self, FieldError> {
        let params: Value = if params_json.trim().is_empty() {
            Value::Object(Default::default())
        } else {
            serde_json::from_str(params_json).map_err(|e| FieldError::InvalidParam {
                name: "params".into(),
                reason: e.to_string(),
            })?
        };
        let image = SourceImage::from_rgba(image_width, image_height, rgba)?;
        let field = ParticleField::from_json(field_width, field_height, &image, &params, seed)?;
        let canvas = Canvas::new(field_width, field_height, None)?;
        let mapping = ViewportMapping::new(field_width as f64, field_height as f64);
        log::debug!("view created: {} particles", field.len());
        Ok(Self {
            controller: Controller::new(field, PointerCell::new()),
            canvas,
            mapping,
        })
    }

    fn set_pointer(&self, client: DVec2, viewport_w: f64, viewport_h: f64, scroll_y: f64) {
        let p = self.mapping.to_field(client, viewport_w, viewport_h, scroll_y);
        self.controller.pointer().set(p);
    }
}

/// A running particle field bound to one 2D canvas.
#[wasm_bindgen]
pub struct ParticleFieldView {
    state: ViewState,
}

#[wasm_bindgen]
impl ParticleFieldView {
    /// `rgba` is the decoded image, row-major, 4 bytes per pixel.
    #[wasm_bindgen(constructor)]
    pub fn new(
        field_width: usize,
        field_height: usize,
        rgba: Vec<u8>,
        image_width: usize,
        image_height: usize,
        seed: u32,
        params_json: &str,
    ) -> Result<ParticleFieldView, JsError> {
        let state = ViewState::new(
            field_width,
            field_height,
            rgba,
            image_width,
            image_height,
            u64::from(seed),
            params_json,
        )
        .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(ParticleFieldView { state })
    }

    /// Pointer position in client coordinates, as delivered by mouse events.
    pub fn set_pointer(
        &self,
        client_x: f64,
        client_y: f64,
        viewport_width: f64,
        viewport_height: f64,
        scroll_y: f64,
    ) {
        self.state.set_pointer(
            DVec2::new(client_x, client_y),
            viewport_width,
            viewport_height,
            scroll_y,
        );
    }

    /// Pointer position already in field coordinates.
    pub fn set_pointer_field(&self, x: f64, y: f64) {
        self.state.controller.pointer().set(DVec2::new(x, y));
    }

    pub fn clear_pointer(&self) {
        self.state.controller.pointer().clear();
    }

    /// Renders the current frame into the backing canvas and advances one step.
    /// Returns `false` once torn down.
    pub fn tick(&mut self) -> bool {
        self.state.controller.tick(&mut self.state.canvas)
    }

    /// Blits the last rendered frame onto `ctx` at the origin.
    pub fn draw(&self, ctx: &CanvasRenderingContext2d) -> Result<(), JsValue> {
        let canvas = &self.state.canvas;
        let data = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(canvas.pixels()),
            canvas.width() as u32,
            canvas.height() as u32,
        )?;
        ctx.put_image_data(&data, 0.0, 0.0)
    }

    /// Stops the loop; subsequent `tick()` calls return `false`.
    pub fn teardown(&self) {
        self.state.controller.teardown();
    }

    pub fn particle_count(&self) -> usize {
        self.state.controller.engine().len()
    }

    pub fn frames(&self) -> u64 {
        self.state.controller.frames()
    }
}
