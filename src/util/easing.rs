//! Easing functions for camera and overlay interpolation.
//!
//! Every curve maps `[0, 1]` onto `[0, 1]`, hits both endpoints exactly, and
//! is monotonic non-decreasing. Inputs outside the unit interval are clamped.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Easing function variants for animation curves.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-in (slow start, fast end).
    QuadraticIn,
    /// Quadratic ease-out (fast start, slow end).
    QuadraticOut,
    /// Cubic ease-out, `1 - (1 - t)^3`. Used by the intro sweep.
    CubicOut,
    /// Cubic ease-in-out. Used between cinematic keyframes.
    CubicInOut,
}

impl EasingFunction {
    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0]. NaN maps to 0.0.
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        match self {
            Self::Linear => t,
            Self::QuadraticIn => t * t,
            Self::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            Self::CubicOut => ease_out_cubic(t),
            Self::CubicInOut => ease_in_out_cubic(t),
        }
    }
}

impl Default for EasingFunction {
    #[inline]
    fn default() -> Self {
        Self::CubicInOut
    }
}

/// `1 - (1 - t)^3`, for `t` already in `[0, 1]`.
#[inline]
#[must_use]
pub fn ease_out_cubic(t: f32) -> f32 {
    let omt = 1.0 - t;
    1.0 - omt * omt * omt
}

/// `4t^3` below the midpoint, `1 - (-2t + 2)^3 / 2` above it.
#[inline]
#[must_use]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let k = -2.0 * t + 2.0;
        1.0 - k * k * k / 2.0
    }
}
