//! Per-frame delta and elapsed time for the host loop.

use web_time::{Duration, Instant};

/// Delta and total time for one frame of the host loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTime {
    /// Time since the previous frame.
    pub dt: Duration,
    /// Time since the clock was created.
    pub elapsed: Duration,
}

/// Frame clock feeding `dt`/`elapsed` into the scene, with a smoothed FPS
/// readout.
pub struct FrameClock {
    /// Creation timestamp
    start: Instant,
    /// Last frame timestamp
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameClock {
    /// Start a clock at the current instant.
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            smoothed_fps: 60.0, // Start with reasonable default
            smoothing: 0.05,    // 5% new value, 95% old value
        }
    }

    /// Call once per frame. Returns the delta since the previous call and
    /// the total elapsed time.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame);
        self.last_frame = now;

        let frame_time = dt.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }

        FrameTime {
            dt,
            elapsed: now.duration_since(self.start),
        }
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_is_monotonic_and_covers_dt() {
        let mut clock = FrameClock::new();
        let first = clock.tick();
        let second = clock.tick();
        assert!(second.elapsed >= first.elapsed);
        assert!(second.elapsed >= second.dt);
    }

    #[test]
    fn fps_starts_at_default() {
        let clock = FrameClock::default();
        assert_eq!(clock.fps(), 60.0);
    }
}
