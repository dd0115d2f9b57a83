use crate::options::ZoomOptions;

/// Pinch gesture state captured at the second finger's touch-down.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PinchState {
    start_distance: f32,
    base_zoom: f32,
}

/// Converts wheel and pinch gestures into a zoom factor clamped to
/// `[min, max]`.
///
/// Every write goes through the clamp; non-finite inputs are dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomController {
    value: f32,
    min: f32,
    max: f32,
    step: f32,
    initial: f32,
    pinch: Option<PinchState>,
}

impl ZoomController {
    /// Create a controller from zoom options.
    #[must_use]
    pub fn new(options: &ZoomOptions) -> Self {
        Self::with_range(
            options.min,
            options.max,
            options.step,
            options.initial,
        )
    }

    /// Create a controller with explicit bounds, step, and starting value.
    ///
    /// Swapped bounds are reordered and non-finite values fall back to the
    /// defaults.
    #[must_use]
    pub fn with_range(min: f32, max: f32, step: f32, initial: f32) -> Self {
        let defaults = ZoomOptions::default();
        let pick =
            |v: f32, fallback: f32| if v.is_finite() { v } else { fallback };
        let a = pick(min, defaults.min);
        let b = pick(max, defaults.max);
        let (min, max) = if a <= b { (a, b) } else { (b, a) };
        let step = pick(step, defaults.step).abs();
        let initial = pick(initial, defaults.initial).clamp(min, max);

        Self {
            value: initial,
            min,
            max,
            step,
            initial,
            pinch: None,
        }
    }

    fn store(&mut self, value: f32) -> f32 {
        if value.is_finite() {
            self.value = value.clamp(self.min, self.max);
        }
        self.value
    }

    /// Step by one `step` per wheel event: positive `delta_y` (scrolling
    /// down) zooms out, negative zooms in. A zero delta changes nothing.
    pub fn wheel(&mut self, delta_y: f32) -> f32 {
        if delta_y > 0.0 {
            self.store(self.value - self.step)
        } else if delta_y < 0.0 {
            self.store(self.value + self.step)
        } else {
            self.value
        }
    }

    /// Capture the base zoom and initial two-finger distance.
    pub fn pinch_start(&mut self, distance: f32) {
        self.pinch = (distance.is_finite() && distance > 0.0).then_some(
            PinchState {
                start_distance: distance,
                base_zoom: self.value,
            },
        );
    }

    /// Update the pinch with the current two-finger distance.
    pub fn pinch_move(&mut self, distance: f32) -> f32 {
        match self.pinch {
            Some(pinch) => self.pinch(distance / pinch.start_distance),
            None => self.value,
        }
    }

    /// Apply a current-to-initial distance ratio to the captured base zoom.
    ///
    /// Without an active pinch the current value is the base.
    pub fn pinch(&mut self, ratio: f32) -> f32 {
        let base = self.pinch.map_or(self.value, |p| p.base_zoom);
        self.store(base * ratio)
    }

    /// Finish the pinch gesture.
    pub fn pinch_end(&mut self) {
        self.pinch = None;
    }

    /// Whether a pinch gesture is in progress.
    #[must_use]
    pub fn is_pinching(&self) -> bool {
        self.pinch.is_some()
    }

    /// Clamp and store `value` directly.
    pub fn set(&mut self, value: f32) -> f32 {
        self.store(value)
    }

    /// Zoom in by one step; a no-op at the ceiling.
    pub fn zoom_in(&mut self) -> f32 {
        self.store(self.value + self.step)
    }

    /// Zoom out by one step; a no-op at the floor.
    pub fn zoom_out(&mut self) -> f32 {
        self.store(self.value - self.step)
    }

    /// Return to the initial zoom and drop any pinch.
    pub fn reset(&mut self) -> f32 {
        self.pinch = None;
        self.store(self.initial)
    }

    /// Current zoom factor.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Current zoom as a whole percentage, for display.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percentage(&self) -> u32 {
        (self.value * 100.0).round() as u32
    }

    /// Lower bound.
    #[must_use]
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub fn max(&self) -> f32 {
        self.max
    }
}

impl Default for ZoomController {
    fn default() -> Self {
        Self::new(&ZoomOptions::default())
    }
}
