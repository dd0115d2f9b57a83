use serde::{Deserialize, Serialize};

use crate::view::ViewCommand;

/// View-level actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// skip = ["Escape"]
/// zoom_in = ["ArrowUp", "Equal"]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Start or stop the cinematic demo.
    ToggleCinematic,
    /// Leave the intro or demo.
    Skip,
    /// Reset rotation, zoom, and pose.
    ResetView,
    /// Enter or leave idle auto-rotate.
    ToggleAutoRotate,
    /// One frame left.
    RotateLeft,
    /// One frame right.
    RotateRight,
    /// One zoom step in.
    ZoomIn,
    /// One zoom step out.
    ZoomOut,
}

impl KeyAction {
    /// The command this action issues.
    #[must_use]
    pub fn to_command(self) -> ViewCommand {
        match self {
            Self::ToggleCinematic => ViewCommand::ToggleCinematic,
            Self::Skip => ViewCommand::Skip,
            Self::ResetView => ViewCommand::ResetView,
            Self::ToggleAutoRotate => ViewCommand::ToggleAutoRotate,
            Self::RotateLeft => ViewCommand::RotateLeft,
            Self::RotateRight => ViewCommand::RotateRight,
            Self::ZoomIn => ViewCommand::ZoomIn,
            Self::ZoomOut => ViewCommand::ZoomOut,
        }
    }
}
