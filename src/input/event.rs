use glam::Vec2;

/// Platform-agnostic input events.
///
/// These are fed into an [`InputProcessor`](super::InputProcessor) which
/// converts them into [`ViewCommand`](crate::view::ViewCommand) values.
/// Keyboard input goes through
/// [`InputProcessor::handle_key_press`](super::InputProcessor::handle_key_press)
/// instead.
///
/// # Example
///
/// ```ignore
/// for cmd in processor.handle_event(InputEvent::PointerDown { x, y }) {
///     view.execute(cmd, now);
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary pointer pressed.
    PointerDown {
        /// Horizontal position in pixels.
        x: f32,
        /// Vertical position in pixels.
        y: f32,
    },
    /// Pointer moved (pressed or not).
    PointerMove {
        /// Horizontal position in pixels.
        x: f32,
        /// Vertical position in pixels.
        y: f32,
    },
    /// Primary pointer released.
    PointerUp,
    /// One or two fingers touched down.
    TouchStart {
        /// First touch point.
        primary: Vec2,
        /// Second touch point, when two fingers are down.
        secondary: Option<Vec2>,
    },
    /// Touch points moved.
    TouchMove {
        /// First touch point.
        primary: Vec2,
        /// Second touch point, when two fingers are down.
        secondary: Option<Vec2>,
    },
    /// All fingers lifted.
    TouchEnd,
    /// Scroll wheel, in the browser convention (positive = scroll down).
    Wheel {
        /// Vertical scroll delta.
        delta_y: f32,
    },
}

#[cfg(feature = "viewer")]
impl InputEvent {
    /// Convert a winit window event, given the last known cursor position.
    ///
    /// Only the left button drives the pointer. Winit reports wheel motion
    /// away from the user as positive, so the sign is flipped. Touch and
    /// keyboard events return `None`; use [`key_code_string`] for keys.
    #[must_use]
    pub fn from_window_event(
        event: &winit::event::WindowEvent,
        cursor: Vec2,
    ) -> Option<Self> {
        use winit::event::{
            ElementState, MouseButton, MouseScrollDelta, WindowEvent,
        };

        match event {
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => Some(match state {
                ElementState::Pressed => Self::PointerDown {
                    x: cursor.x,
                    y: cursor.y,
                },
                ElementState::Released => Self::PointerUp,
            }),
            #[allow(clippy::cast_possible_truncation)]
            WindowEvent::CursorMoved { position, .. } => {
                Some(Self::PointerMove {
                    x: position.x as f32,
                    y: position.y as f32,
                })
            }
            #[allow(clippy::cast_possible_truncation)]
            WindowEvent::MouseWheel { delta, .. } => {
                let delta_y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -*y,
                    MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
                };
                Some(Self::Wheel { delta_y })
            }
            _ => None,
        }
    }
}

/// Key string for a pressed physical key, in `KeyCode` debug format
/// (`"KeyR"`, `"ArrowLeft"`, `"Escape"`).
#[cfg(feature = "viewer")]
#[must_use]
pub fn key_code_string(event: &winit::event::KeyEvent) -> Option<String> {
    use winit::event::ElementState;
    use winit::keyboard::PhysicalKey;

    if event.state != ElementState::Pressed {
        return None;
    }
    match event.physical_key {
        PhysicalKey::Code(code) => Some(format!("{code:?}")),
        PhysicalKey::Unidentified(_) => None,
    }
}
