//! Camera system for product viewing.
//!
//! Provides the camera pose value type, perspective projection and GPU
//! uniform, keyframed camera motion, and the orbital rig used by manual
//! control and auto-rotate.

/// Perspective projection, screen-space projection, and GPU uniform.
pub mod core;
/// Keyframe sequences and the interpolation cursor that walks them.
pub mod keyframe;
/// Orbital rig and vertical-axis rotation helpers.
pub mod orbit;
/// Camera pose value type.
pub mod pose;

pub use self::core::{Camera, PoseUniform};
pub use keyframe::{Keyframe, KeyframeAnimator, Playback};
pub use orbit::OrbitRig;
pub use pose::CameraPose;
