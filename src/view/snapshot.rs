//! Serializable view summary for UI bridges.

use serde::Serialize;

use super::mode::Mode;
use super::overlay::OverlayPhase;
use crate::camera::CameraPose;

/// Everything a UI layer needs to draw controls for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSnapshot {
    /// Current mode.
    pub mode: Mode,
    /// Overlay phase.
    pub overlay_phase: OverlayPhase,
    /// Overlay opacity in `[0, 1]`.
    pub overlay_opacity: f32,
    /// Zoom as a whole percentage.
    pub zoom_percentage: u32,
    /// Asset loading percentage for the active view group.
    pub loading_percentage: u32,
    /// Active view group id.
    pub view: String,
    /// Rotation frame.
    pub frame: u32,
    /// Frames per revolution.
    pub total_steps: u32,
    /// Triple-click spotlight flag.
    pub spotlight: bool,
    /// Whether auto-rotate resumes after the idle delay.
    pub auto_rotate: bool,
    /// Selected hotspot id.
    pub active_hotspot: Option<String>,
    /// Keyframe the demo is heading toward.
    pub shot: Option<String>,
    /// Camera pose.
    pub pose: CameraPose,
}

impl ViewSnapshot {
    /// Serialize to a compact JSON string.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
