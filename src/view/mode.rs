use std::fmt;

use serde::Serialize;
use web_time::Instant;

use crate::camera::{KeyframeAnimator, OrbitRig};

/// Which motion source owns the camera pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Pose follows drag rotation and zoom.
    Manual,
    /// Slow turntable spin after a quiet period.
    IdleAutoRotate,
    /// One-shot establishing sweep on mount.
    Intro,
    /// Looping keyframe tour.
    CinematicDemo,
    /// Dark overlay before the demo; the pose is held.
    Transitioning,
}

impl Mode {
    /// Whether keyframes drive the pose in this mode.
    #[must_use]
    pub fn is_scripted(self) -> bool {
        matches!(self, Self::Intro | Self::CinematicDemo)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Manual => "manual",
            Self::IdleAutoRotate => "idle auto-rotate",
            Self::Intro => "intro",
            Self::CinematicDemo => "cinematic demo",
            Self::Transitioning => "transitioning",
        };
        f.write_str(name)
    }
}

/// Per-mode state. Exactly one variant is live, and only it writes the
/// pose.
#[derive(Debug, Clone)]
pub(crate) enum Motion {
    /// `rig` is anchored lazily on the first input so entering manual
    /// never moves the camera.
    Manual { rig: Option<OrbitRig> },
    IdleAutoRotate,
    Intro { animator: KeyframeAnimator },
    CinematicDemo {
        animator: KeyframeAnimator,
        started_at: Instant,
    },
    Transitioning,
}

impl Motion {
    pub(crate) const fn manual() -> Self {
        Self::Manual { rig: None }
    }

    pub(crate) const fn mode(&self) -> Mode {
        match self {
            Self::Manual { .. } => Mode::Manual,
            Self::IdleAutoRotate => Mode::IdleAutoRotate,
            Self::Intro { .. } => Mode::Intro,
            Self::CinematicDemo { .. } => Mode::CinematicDemo,
            Self::Transitioning => Mode::Transitioning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_serialize_names() {
        assert_eq!(Mode::CinematicDemo.to_string(), "cinematic demo");
        assert_eq!(
            serde_json::to_string(&Mode::IdleAutoRotate).unwrap(),
            "\"idle_auto_rotate\""
        );
        assert!(Mode::Intro.is_scripted());
        assert!(!Mode::Transitioning.is_scripted());
        assert_eq!(Motion::manual().mode(), Mode::Manual);
    }
}
