use web_time::{Duration, Instant};

/// Tick source bookkeeping: hands out monotonically increasing frame
/// timestamps, optionally rate-limited, and keeps a smoothed FPS figure.
pub struct FrameClock {
    /// Minimum spacing between ticks (zero = unlimited).
    min_frame_duration: Duration,
    /// Timestamp of the last accepted tick.
    last_tick: Option<Instant>,
    /// Exponential moving average of the tick rate.
    smoothed_fps: f32,
    /// Weight of each new sample (0.0-1.0, lower = smoother).
    smoothing: f32,
    /// Number of ticks accepted so far.
    frames: u64,
}

impl FrameClock {
    /// Create a clock targeting `target_fps` ticks per second (0 = unlimited).
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        let min_frame_duration = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        } else {
            Duration::ZERO
        };

        Self {
            min_frame_duration,
            last_tick: None,
            smoothed_fps: 60.0,
            smoothing: 0.05,
            frames: 0,
        }
    }

    /// Offer a candidate tick at `now`.
    ///
    /// Returns the timestamp to drive the engine with, or `None` when the
    /// frame budget has not elapsed yet. Returned timestamps never go
    /// backwards even if the caller's clock does.
    pub fn tick(&mut self, now: Instant) -> Option<Instant> {
        let Some(last) = self.last_tick else {
            self.last_tick = Some(now);
            self.frames = 1;
            return Some(now);
        };

        let elapsed = now.saturating_duration_since(last);
        if elapsed < self.min_frame_duration || elapsed.is_zero() {
            return None;
        }

        let frame_time = elapsed.as_secs_f32();
        let instant_fps = 1.0 / frame_time;
        self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
            + instant_fps * self.smoothing;

        self.last_tick = Some(now);
        self.frames += 1;
        Some(now)
    }

    /// Smoothed ticks per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }

    /// Number of ticks handed out.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Timestamp of the most recent tick.
    #[must_use]
    pub fn last_tick(&self) -> Option<Instant> {
        self.last_tick
    }
}
