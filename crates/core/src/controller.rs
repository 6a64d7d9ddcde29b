//! Animation loop: clear, render, then step, once per display frame.
//!
//! The controller never schedules itself. The host either calls
//! [`Controller::tick`] from its own frame callback, or hands a
//! [`FrameClock`] to [`Controller::run`]. Teardown is cooperative through a
//! [`CancellationToken`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::debug;

use crate::engine::Engine;
use crate::pointer::PointerCell;
use crate::surface::Surface;

/// Shared teardown flag. Clones observe the same cancellation.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// A token that has not been cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that the loop stop before its next frame.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether [`cancel`](Self::cancel) was called on this token or a clone.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// The host's "suspend until the display wants the next frame" primitive.
pub trait FrameClock {
    /// Blocks until the next frame is due.
    fn wait_for_frame(&mut self);
}

/// Drives an [`Engine`] once per frame until torn down.
pub struct Controller<E> {
    engine: E,
    pointer: PointerCell,
    cancel: CancellationToken,
    frames: u64,
}

impl<E: Engine> Controller<E> {
    /// Takes ownership of the engine and a handle to the host's pointer cell.
    pub fn new(engine: E, pointer: PointerCell) -> Self {
        Self {
            engine,
            pointer,
            cancel: CancellationToken::new(),
            frames: 0,
        }
    }

    /// The engine being animated.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The pointer cell read once per tick.
    pub fn pointer(&self) -> &PointerCell {
        &self.pointer
    }

    /// A token the host can use to stop the loop from elsewhere.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Whether the loop has been cancelled or torn down.
    pub fn is_torn_down(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Runs one frame. Returns `false` without touching the surface once torn down.
    ///
    /// Rendering happens before the update, so frame N shows the positions
    /// computed at the end of frame N-1.
    pub fn tick(&mut self, surface: &mut dyn Surface) -> bool {
        if self.cancel.is_cancelled() {
            return false;
        }
        surface.clear();
        self.engine.render(surface);
        self.engine.step(self.pointer.get());
        self.frames += 1;
        true
    }

    /// Waits on `clock` and ticks until cancelled. Returns frames rendered by this call.
    pub fn run<C: FrameClock + ?Sized>(&mut self, clock: &mut C, surface: &mut dyn Surface) -> u64 {
        let start = self.frames;
        loop {
            clock.wait_for_frame();
            if !self.tick(surface) {
                break;
            }
        }
        debug!("animation loop stopped after {} frames", self.frames - start);
        self.frames - start
    }

    /// Stops further ticks. Idempotent.
    pub fn teardown(&self) {
        if !self.cancel.is_cancelled() {
            debug!("tearing down controller at frame {}", self.frames);
        }
        self.cancel.cancel();
    }

    /// Tears down and hands back the engine.
    pub fn into_engine(self) -> E {
        self.teardown();
        self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::color::Rgb;
    use glam::DVec2;
    use serde_json::{json, Value};

    /// Records the order of calls and the pointers it was stepped with.
    #[derive(Default)]
    struct Probe {
        x: f64,
        log: Vec<&'static str>,
        pointers: Vec<Option<DVec2>>,
    }

    impl Engine for Probe {
        fn step(&mut self, pointer: Option<DVec2>) {
            self.x += 1.0;
            self.log.push("step");
            self.pointers.push(pointer);
        }

        fn render(&self, surface: &mut dyn Surface) {
            surface.fill_rect(self.x, 0.0, 1.0, Rgb::new(9, 9, 9));
        }

        fn params(&self) -> Value {
            json!({})
        }

        fn param_schema(&self) -> Value {
            json!({})
        }
    }

    /// Cancels the token after `remaining` frames.
    struct CountdownClock {
        remaining: u32,
        waits: u32,
        token: CancellationToken,
    }

    impl FrameClock for CountdownClock {
        fn wait_for_frame(&mut self) {
            self.waits += 1;
            if self.remaining == 0 {
                self.token.cancel();
            } else {
                self.remaining -= 1;
            }
        }
    }

    fn controller() -> Controller<Probe> {
        Controller::new(Probe::default(), PointerCell::new())
    }

    #[test]
    fn tick_renders_before_stepping() {
        let mut c = controller();
        let mut canvas = Canvas::new(4, 1, None).unwrap();
        assert!(c.tick(&mut canvas));
        // Drawn at x=0 (pre-step), engine now at x=1.
        assert_eq!(canvas.pixel(0, 0), Some([9, 9, 9, 255]));
        assert_eq!(canvas.pixel(1, 0), Some([0, 0, 0, 0]));
        assert_eq!(c.engine().x, 1.0);
    }

    #[test]
    fn tick_clears_previous_frame() {
        let mut c = controller();
        let mut canvas = Canvas::new(4, 1, None).unwrap();
        c.tick(&mut canvas);
        c.tick(&mut canvas);
        assert_eq!(canvas.painted_count(), 1);
        assert_eq!(canvas.pixel(1, 0), Some([9, 9, 9, 255]));
        assert_eq!(c.frames(), 2);
    }

    #[test]
    fn tick_passes_latest_pointer() {
        let pointer = PointerCell::new();
        let mut c = Controller::new(Probe::default(), pointer.clone());
        let mut canvas = Canvas::new(2, 2, None).unwrap();
        c.tick(&mut canvas);
        pointer.set(DVec2::new(3.0, 4.0));
        c.tick(&mut canvas);
        assert_eq!(
            c.engine().pointers,
            vec![None, Some(DVec2::new(3.0, 4.0))]
        );
    }

    #[test]
    fn teardown_stops_ticks() {
        let mut c = controller();
        let mut canvas = Canvas::new(2, 2, None).unwrap();
        c.teardown();
        c.teardown();
        assert!(c.is_torn_down());
        assert!(!c.tick(&mut canvas));
        assert_eq!(c.frames(), 0);
        assert!(c.engine().log.is_empty());
    }

    #[test]
    fn run_stops_when_clock_cancels() {
        let mut c = controller();
        let mut clock = CountdownClock {
            remaining: 5,
            waits: 0,
            token: c.cancellation_token(),
        };
        let mut canvas = Canvas::new(8, 1, None).unwrap();
        let rendered = c.run(&mut clock, &mut canvas);
        assert_eq!(rendered, 5);
        assert_eq!(clock.waits, 6);
        assert_eq!(c.engine().log.len(), 5);
    }

    #[test]
    fn run_on_torn_down_controller_renders_nothing() {
        let mut c = controller();
        c.teardown();
        let mut clock = CountdownClock {
            remaining: 5,
            waits: 0,
            token: c.cancellation_token(),
        };
        let mut canvas = Canvas::new(2, 2, None).unwrap();
        assert_eq!(c.run(&mut clock, &mut canvas), 0);
    }

    #[test]
    fn into_engine_returns_state() {
        let mut c = controller();
        let mut canvas = Canvas::new(2, 2, None).unwrap();
        c.tick(&mut canvas);
        let engine = c.into_engine();
        assert_eq!(engine.log, vec!["step"]);
    }

    #[test]
    fn cancellation_token_clones_share_flag() {
        let a = CancellationToken::new();
        let b = a.clone();
        assert!(!b.is_cancelled());
        a.cancel();
        assert!(b.is_cancelled());
    }
}
