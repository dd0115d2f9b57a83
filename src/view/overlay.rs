//! Dark-to-light overlay sequence that fronts the cinematic demo.
//!
//! Phases run on deadlines measured from [`OverlaySequencer::start`]:
//! dark until `dark_phase`, revealing until `reveal_complete`, complete
//! until `phase_reset`, then none. The sequencer only tracks phase and
//! opacity; the view decides what starting the reveal means.

use serde::Serialize;
use web_time::{Duration, Instant};

use crate::options::TimingOptions;
use crate::util::easing::EasingFunction;

/// Overlay sub-phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayPhase {
    /// No overlay.
    #[default]
    None,
    /// Fading to black; the demo has not started.
    Dark,
    /// Fading back in over the running demo.
    Revealing,
    /// Fully transparent, sequence winding down.
    Complete,
}

/// Phase deadlines and fade lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OverlayTiming {
    dark_phase: Duration,
    reveal_complete: Duration,
    phase_reset: Duration,
    dark_fade: Duration,
    reveal_fade: Duration,
}

/// Deadline-driven overlay phase tracker.
#[derive(Debug, Clone)]
pub struct OverlaySequencer {
    timing: OverlayTiming,
    started_at: Option<Instant>,
    phase: OverlayPhase,
}

impl OverlaySequencer {
    /// Idle sequencer using the overlay timings in `timing`.
    ///
    /// Deadlines are forced into order so a misconfigured preset cannot
    /// skip a phase backwards.
    #[must_use]
    pub fn new(timing: &TimingOptions) -> Self {
        let dark_phase = Duration::from_millis(timing.dark_phase_ms);
        let reveal_complete =
            Duration::from_millis(timing.reveal_complete_ms).max(dark_phase);
        let phase_reset =
            Duration::from_millis(timing.phase_reset_ms).max(reveal_complete);
        Self {
            timing: OverlayTiming {
                dark_phase,
                reveal_complete,
                phase_reset,
                dark_fade: Duration::from_millis(timing.dark_fade_ms),
                reveal_fade: Duration::from_millis(timing.reveal_fade_ms),
            },
            started_at: None,
            phase: OverlayPhase::None,
        }
    }

    /// Begin the sequence at `now`, restarting it if already running.
    pub fn start(&mut self, now: Instant) {
        self.started_at = Some(now);
        self.phase = OverlayPhase::Dark;
    }

    /// Abandon the sequence; the overlay disappears immediately.
    pub fn cancel(&mut self) {
        self.started_at = None;
        self.phase = OverlayPhase::None;
    }

    /// Move to the phase for `now` and return it.
    ///
    /// A stalled tick source may jump several phases at once.
    pub fn advance(&mut self, now: Instant) -> OverlayPhase {
        let Some(started_at) = self.started_at else {
            return self.phase;
        };
        let elapsed = now.saturating_duration_since(started_at);
        self.phase = if elapsed < self.timing.dark_phase {
            OverlayPhase::Dark
        } else if elapsed < self.timing.reveal_complete {
            OverlayPhase::Revealing
        } else if elapsed < self.timing.phase_reset {
            OverlayPhase::Complete
        } else {
            self.started_at = None;
            OverlayPhase::None
        };
        self.phase
    }

    /// Phase as of the last [`advance`](Self::advance).
    #[must_use]
    pub fn phase(&self) -> OverlayPhase {
        self.phase
    }

    /// Whether a sequence is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.started_at.is_some()
    }

    /// Overlay opacity at `now`, in `[0, 1]`.
    ///
    /// Dark ramps up with ease-in over the dark fade; revealing ramps down
    /// with ease-out over the reveal fade; other phases are transparent.
    #[must_use]
    pub fn opacity(&self, now: Instant) -> f32 {
        let Some(started_at) = self.started_at else {
            return 0.0;
        };
        let elapsed = now.saturating_duration_since(started_at);
        match self.phase {
            OverlayPhase::Dark => EasingFunction::QuadraticIn
                .evaluate(fraction(elapsed, self.timing.dark_fade)),
            OverlayPhase::Revealing => {
                let since = elapsed.saturating_sub(self.timing.dark_phase);
                1.0 - EasingFunction::QuadraticOut
                    .evaluate(fraction(since, self.timing.reveal_fade))
            }
            OverlayPhase::None | OverlayPhase::Complete => 0.0,
        }
    }
}

/// `elapsed / span`, with a zero span counting as already done.
fn fraction(elapsed: Duration, span: Duration) -> f32 {
    if span.is_zero() {
        1.0
    } else {
        elapsed.as_secs_f32() / span.as_secs_f32()
    }
}
