//! The view's complete interactive vocabulary.
//!
//! Every user-facing operation, whether triggered by a key press, pointer
//! gesture, UI button, or programmatic call, is represented as a
//! `ViewCommand`. Consumers construct commands and pass them to
//! [`ViewStateMachine::execute`](super::ViewStateMachine::execute).

/// A discrete or parameterized operation the view can perform.
///
/// The state machine never cares *how* a command was triggered:
///
/// ```ignore
/// view.execute(ViewCommand::ToggleCinematic, now);
/// view.execute(ViewCommand::SetZoom { value: 1.5 }, now);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ViewCommand {
    // ── Sequencing ──────────────────────────────────────────────────
    /// Start the cinematic demo, or stop it if running.
    ToggleCinematic,

    /// Stop the intro or demo and hand control to the user.
    Skip,

    /// Snap rotation, zoom, and pose back to their defaults.
    ResetView,

    /// Enter or leave idle auto-rotate.
    ToggleAutoRotate,

    // ── Hotspots ────────────────────────────────────────────────────
    /// Toggle selection of a hotspot.
    SelectHotspot {
        /// Hotspot id.
        id: String,
    },

    /// Deselect any active hotspot.
    ClearHotspot,

    // ── Views ───────────────────────────────────────────────────────
    /// Switch the active view group; leaves auto-rotate.
    ChangeView {
        /// Group id.
        id: String,
    },

    // ── Zoom ────────────────────────────────────────────────────────
    /// Set the zoom factor (clamped).
    SetZoom {
        /// Requested zoom.
        value: f32,
    },

    /// Zoom in by one step.
    ZoomIn,

    /// Zoom out by one step.
    ZoomOut,

    // ── Rotation ────────────────────────────────────────────────────
    /// Step one rotation frame down.
    RotateLeft,

    /// Step one rotation frame up.
    RotateRight,

    /// Jump to a rotation frame (wrapped).
    SetFrame {
        /// Requested frame, any integer.
        frame: i64,
    },

    // ── Gestures ────────────────────────────────────────────────────
    /// Pointer or single touch pressed at `x`.
    DragBegin {
        /// Horizontal position in pixels.
        x: f32,
    },

    /// Pointer or single touch moved to `x` while pressed.
    DragMove {
        /// Horizontal position in pixels.
        x: f32,
    },

    /// Pointer or touch released.
    DragEnd,

    /// Second finger down; `distance` between the two touches.
    PinchBegin {
        /// Two-finger distance in pixels.
        distance: f32,
    },

    /// Two-finger distance changed.
    PinchMove {
        /// Two-finger distance in pixels.
        distance: f32,
    },

    /// Pinch released.
    PinchEnd,

    /// Wheel scrolled (positive = scroll down = zoom out).
    Wheel {
        /// Vertical scroll delta.
        delta_y: f32,
    },

    /// The product was clicked without dragging. Three quick clicks toggle
    /// the spotlight.
    ProductClicked,
}

impl ViewCommand {
    /// Whether this command is direct manipulation by the user, which
    /// hands control to manual mode.
    #[must_use]
    pub fn is_interaction(&self) -> bool {
        matches!(
            self,
            Self::DragBegin { .. }
                | Self::DragMove { .. }
                | Self::PinchBegin { .. }
                | Self::PinchMove { .. }
                | Self::Wheel { .. }
                | Self::SetZoom { .. }
                | Self::ZoomIn
                | Self::ZoomOut
                | Self::RotateLeft
                | Self::RotateRight
                | Self::SetFrame { .. }
        )
    }
}
