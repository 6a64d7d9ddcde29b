use std::time::{Duration, Instant};

use particle_field_core::{CancellationToken, FrameClock};

/// Sleeps so consecutive frames start at most `fps` times per second.
pub struct Framepacer {
    last: Instant,
    frametime: f32,
}

impl Framepacer {
    /// `fps` of 0 disables pacing.
    pub fn new(fps: u32) -> Self {
        Self {
            last: Instant::now(),
            frametime: if fps == 0 { 0.0 } else { 1.0 / fps as f32 },
        }
    }

    fn elapsed(&self) -> f32 {
        self.last.elapsed().as_secs_f32()
    }

    /// Blocks until the current frame has lasted `frametime`, then starts the next.
    pub fn pace(&mut self) {
        if self.frametime > f32::EPSILON {
            const ACCURACY: f32 = 0.0001; // 100 microseconds
            let sleep_time = self.frametime - self.elapsed() - ACCURACY;

            if sleep_time > 0.0 {
                std::thread::sleep(Duration::from_secs_f32(sleep_time));

                while self.elapsed() < self.frametime {
                    std::thread::yield_now();
                }
            }
        }
        self.last = Instant::now();
    }
}

/// Frame clock for finite CLI runs: paces frames, then cancels after `frames` waits.
pub struct BudgetClock {
    pacer: Framepacer,
    remaining: u64,
    token: CancellationToken,
}

impl BudgetClock {
    pub fn new(frames: u64, fps: u32, token: CancellationToken) -> Self {
        Self {
            pacer: Framepacer::new(fps),
            remaining: frames,
            token,
        }
    }
}

impl FrameClock for BudgetClock {
    fn wait_for_frame(&mut self) {
        if self.remaining == 0 {
            self.token.cancel();
            return;
        }
        self.remaining -= 1;
        self.pacer.pace();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_clock_cancels_after_budget() {
        let token = CancellationToken::new();
        let mut clock = BudgetClock::new(2, 0, token.clone());
        clock.wait_for_frame();
        clock.wait_for_frame();
        assert!(!token.is_cancelled());
        clock.wait_for_frame();
        assert!(token.is_cancelled());
    }

    #[test]
    fn pacer_holds_frames_to_rate() {
        let mut pacer = Framepacer::new(200);
        let start = Instant::now();
        for _ in 0..4 {
            pacer.pace();
        }
        // Four 5ms frames.
        assert!(start.elapsed() >= Duration::from_millis(18), "{:?}", start.elapsed());
    }

    #[test]
    fn zero_fps_does_not_sleep() {
        let mut pacer = Framepacer::new(0);
        let start = Instant::now();
        for _ in 0..1000 {
            pacer.pace();
        }
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
