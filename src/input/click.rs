use web_time::{Duration, Instant};

/// Clicks needed inside one burst to fire.
const BURST_CLICKS: u32 = 3;

/// Result of registering a click with a [`ClickBurst`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstResult {
    /// The burst is still accumulating; carries the running count.
    Counting(u32),
    /// The burst reached its target count and the counter was reset.
    Fired,
}

/// Timeout-based multi-click counter.
///
/// Clicks less than `window` apart accumulate. The third click fires and
/// resets the counter; a gap longer than the window starts a new burst.
#[derive(Debug, Clone)]
pub struct ClickBurst {
    window: Duration,
    count: u32,
    last_click: Option<Instant>,
}

impl ClickBurst {
    /// Create a counter with the given inter-click window.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            count: 0,
            last_click: None,
        }
    }

    /// Register a click at `now`.
    pub fn click(&mut self, now: Instant) -> BurstResult {
        let within_window = self
            .last_click
            .is_some_and(|last| now.duration_since(last) < self.window);
        self.count = if within_window { self.count + 1 } else { 1 };
        self.last_click = Some(now);

        if self.count >= BURST_CLICKS {
            self.reset();
            BurstResult::Fired
        } else {
            BurstResult::Counting(self.count)
        }
    }

    /// Drop the count if the window has lapsed since the last click.
    pub fn expire(&mut self, now: Instant) {
        if self
            .last_click
            .is_some_and(|last| now.duration_since(last) >= self.window)
        {
            self.reset();
        }
    }

    /// Clicks accumulated in the current burst.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Forget any partial burst.
    pub fn reset(&mut self) {
        self.count = 0;
        self.last_click = None;
    }
}
