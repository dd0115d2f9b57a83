use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use web_time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Timing", inline)]
#[serde(default)]
/// Timer lengths for idle detection, the demo, and the overlay sequence.
///
/// Overlay deadlines are measured from the moment the sequence starts.
pub struct TimingOptions {
    /// Quiet time before idle auto-rotate kicks in.
    #[schemars(title = "Idle Delay (ms)", range(min = 500, max = 60000))]
    pub idle_delay_ms: u64,
    /// Demo auto-stop.
    #[schemars(title = "Demo Length (ms)", range(min = 1000, max = 300_000))]
    pub demo_max_ms: u64,
    /// End of the dark phase; the demo starts here.
    #[schemars(skip)]
    pub dark_phase_ms: u64,
    /// End of the revealing phase.
    #[schemars(skip)]
    pub reveal_complete_ms: u64,
    /// Return to no overlay.
    #[schemars(skip)]
    pub phase_reset_ms: u64,
    /// Fade-to-black length at the start of the dark phase.
    #[schemars(skip)]
    pub dark_fade_ms: u64,
    /// Fade-from-black length at the start of the revealing phase.
    #[schemars(skip)]
    pub reveal_fade_ms: u64,
    /// Maximum gap between clicks of one burst.
    #[schemars(title = "Click Window (ms)", range(min = 100, max = 2000))]
    pub click_window_ms: u64,
}

impl Default for TimingOptions {
    fn default() -> Self {
        Self {
            idle_delay_ms: 5000,
            demo_max_ms: 30_000,
            dark_phase_ms: 1200,
            reveal_complete_ms: 4500,
            phase_reset_ms: 5500,
            dark_fade_ms: 600,
            reveal_fade_ms: 3000,
            click_window_ms: 800,
        }
    }
}

impl TimingOptions {
    /// Idle delay as a duration.
    #[must_use]
    pub const fn idle_delay(&self) -> Duration {
        Duration::from_millis(self.idle_delay_ms)
    }

    /// Demo auto-stop as a duration.
    #[must_use]
    pub const fn demo_max(&self) -> Duration {
        Duration::from_millis(self.demo_max_ms)
    }

    /// Click burst window as a duration.
    #[must_use]
    pub const fn click_window(&self) -> Duration {
        Duration::from_millis(self.click_window_ms)
    }
}
