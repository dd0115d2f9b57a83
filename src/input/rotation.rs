//! Pointer and scroll mapping onto rotation parameters.
//!
//! Two mappings live here, with opposite sign conventions:
//!
//! - [`PointerRotationMapper`]: horizontal drags step a discrete frame
//!   index on a ring. The new frame is `base - frameDelta`, so dragging
//!   right moves the index down and dragging left moves it up.
//! - [`ScrollTilt`]: an element's offset from the viewport center maps to a
//!   clamped tilt angle of `distance * -gain`. It is recomputed from scratch
//!   on every evaluation, not accumulated.

use serde::Serialize;

use crate::options::RotationOptions;

/// A discrete rotation parameter on a ring of `total_steps` frames.
///
/// `frame` is always in `0..total_steps`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RotationParam {
    /// Current frame index.
    pub frame: u32,
    /// Number of frames in a full turn.
    pub total_steps: u32,
}

/// Converts drag deltas into a wrapped frame index.
#[derive(Debug, Clone)]
pub struct PointerRotationMapper {
    total_steps: u32,
    pixels_per_frame: f32,
    sensitivity: f32,
    initial_frame: u32,
    /// Last computed frame.
    frame: u32,
    /// Frame captured at drag start; drags are relative to it.
    base_frame: u32,
    /// Pointer x at drag start, while a drag is active.
    origin_x: Option<f32>,
}

impl PointerRotationMapper {
    /// Create a mapper from rotation options.
    #[must_use]
    pub fn new(options: &RotationOptions) -> Self {
        Self::with_steps(
            options.total_steps,
            options.pixels_per_frame,
            options.sensitivity,
            options.initial_frame,
        )
    }

    /// Create a mapper with explicit parameters.
    ///
    /// Out-of-domain values are corrected rather than rejected: zero steps
    /// becomes one, non-positive pixel pitch and non-finite sensitivity
    /// fall back to defaults, and the initial frame is wrapped.
    #[must_use]
    pub fn with_steps(
        total_steps: u32,
        pixels_per_frame: f32,
        sensitivity: f32,
        initial_frame: u32,
    ) -> Self {
        let defaults = RotationOptions::default();
        let total_steps = total_steps.max(1);
        let pixels_per_frame =
            if pixels_per_frame.is_finite() && pixels_per_frame > 0.0 {
                pixels_per_frame
            } else {
                defaults.pixels_per_frame
            };
        let sensitivity = if sensitivity.is_finite() {
            sensitivity
        } else {
            defaults.sensitivity
        };
        let initial_frame = initial_frame % total_steps;

        Self {
            total_steps,
            pixels_per_frame,
            sensitivity,
            initial_frame,
            frame: initial_frame,
            base_frame: initial_frame,
            origin_x: None,
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn wrap(&self, frame: i64) -> u32 {
        frame.rem_euclid(i64::from(self.total_steps)) as u32
    }

    /// Start a drag at pointer x, snapshotting the current frame as base.
    pub fn begin(&mut self, x: f32) {
        if !x.is_finite() {
            return;
        }
        self.origin_x = Some(x);
        self.base_frame = self.frame;
    }

    /// Update the drag with the pointer at `x` and return the new frame.
    ///
    /// Without an active drag this is a no-op returning the current frame.
    #[allow(clippy::cast_possible_truncation)]
    pub fn move_to(&mut self, x: f32) -> u32 {
        let Some(origin_x) = self.origin_x else {
            return self.frame;
        };
        if !x.is_finite() {
            return self.frame;
        }

        let delta = x - origin_x;
        let frame_delta =
            (delta / self.pixels_per_frame * self.sensitivity).round() as i64;
        let frame_delta =
            frame_delta.rem_euclid(i64::from(self.total_steps));
        self.frame = self.wrap(i64::from(self.base_frame) - frame_delta);
        self.frame
    }

    /// Finish the drag, committing the last computed frame as the new base.
    pub fn end(&mut self) {
        if self.origin_x.take().is_some() {
            self.base_frame = self.frame;
        }
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.origin_x.is_some()
    }

    /// Current frame index.
    #[must_use]
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Number of frames in a full turn.
    #[must_use]
    pub fn total_steps(&self) -> u32 {
        self.total_steps
    }

    /// Current frame as a rotation parameter.
    #[must_use]
    pub fn param(&self) -> RotationParam {
        RotationParam {
            frame: self.frame,
            total_steps: self.total_steps,
        }
    }

    /// Jump to `frame` (wrapped) and make it the new base.
    pub fn set_frame(&mut self, frame: i64) {
        self.frame = self.wrap(frame);
        self.base_frame = self.frame;
    }

    /// Step one frame down, wrapping.
    pub fn rotate_left(&mut self) {
        self.set_frame(i64::from(self.frame) - 1);
    }

    /// Step one frame up, wrapping.
    pub fn rotate_right(&mut self) {
        self.set_frame(i64::from(self.frame) + 1);
    }

    /// Return to the initial frame and drop any active drag.
    pub fn reset(&mut self) {
        self.origin_x = None;
        self.set_frame(i64::from(self.initial_frame));
    }
}

/// An element's vertical placement, relative to its scroll container's top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementRect {
    /// Distance from the container's top edge to the element's top edge.
    pub top: f32,
    /// Element height.
    pub height: f32,
}

/// Maps an element's scroll position to a tilt angle in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTilt {
    gain: f32,
    max_angle: f32,
}

impl ScrollTilt {
    /// Create a tilt mapping from rotation options.
    #[must_use]
    pub fn new(options: &RotationOptions) -> Self {
        Self::with_gain(options.tilt_gain, options.max_tilt)
    }

    /// Create a tilt mapping with explicit gain and limit (degrees).
    ///
    /// Non-finite values fall back to the defaults.
    #[must_use]
    pub fn with_gain(gain: f32, max_angle: f32) -> Self {
        let defaults = RotationOptions::default();
        let pick =
            |v: f32, fallback: f32| if v.is_finite() { v } else { fallback };
        Self {
            gain: pick(gain, defaults.tilt_gain),
            max_angle: pick(max_angle, defaults.max_tilt).abs(),
        }
    }

    /// Tilt for `element` inside a viewport of `viewport_height`.
    ///
    /// The element center's signed distance from the viewport center,
    /// normalized by the viewport height, is scaled by `-gain` and clamped
    /// to `[-max_angle, max_angle]`. Degenerate viewports yield 0.
    #[must_use]
    pub fn angle(&self, element: ElementRect, viewport_height: f32) -> f32 {
        if !(viewport_height.is_finite() && viewport_height > 0.0) {
            return 0.0;
        }
        let element_center = element.top + element.height / 2.0;
        let viewport_center = viewport_height / 2.0;
        let distance = (element_center - viewport_center) / viewport_height;
        let angle = distance * -self.gain;
        if angle.is_nan() {
            return 0.0;
        }
        angle.clamp(-self.max_angle, self.max_angle)
    }

    /// Tilt for each element, in order.
    #[must_use]
    pub fn angles(
        &self,
        elements: &[ElementRect],
        viewport_height: f32,
    ) -> Vec<f32> {
        elements
            .iter()
            .map(|e| self.angle(*e, viewport_height))
            .collect()
    }
}
