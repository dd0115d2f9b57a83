//! Input handling: event types, gesture mappers, and the input processor
//! that converts raw window events into view commands.

/// Multi-click counter behind the spotlight toggle.
pub mod click;
/// Platform-agnostic input events.
pub mod event;
/// Bindable keyboard actions.
mod keyboard;
/// Converts raw events into view commands.
pub mod processor;
/// Drag-to-frame and scroll-to-tilt mapping.
pub mod rotation;
/// Wheel and pinch zoom.
pub mod zoom;

pub use click::{BurstResult, ClickBurst};
#[cfg(feature = "viewer")]
pub use event::key_code_string;
pub use event::InputEvent;
pub use keyboard::KeyAction;
pub use processor::InputProcessor;
pub use rotation::{
    ElementRect, PointerRotationMapper, RotationParam, ScrollTilt,
};
pub use zoom::ZoomController;
