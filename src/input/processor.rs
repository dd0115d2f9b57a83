//! Converts raw platform events into view commands.
//!
//! The `InputProcessor` owns all transient input state (pointer press,
//! drag detection, touch gesture phase) and the key-binding map. It is the
//! only thing that sits between raw window events and the view's
//! [`execute`](crate::view::ViewStateMachine::execute) method.

use glam::Vec2;

use super::event::InputEvent;
use crate::options::KeybindingOptions;
use crate::view::ViewCommand;

/// Squared movement (pixels²) past which a press becomes a drag.
const DRAG_THRESHOLD_SQ: f32 = 1.0;

/// A held pointer or single touch.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Press {
    origin: Vec2,
    dragged: bool,
}

impl Press {
    const fn at(origin: Vec2) -> Self {
        Self {
            origin,
            dragged: false,
        }
    }

    fn track(&mut self, pos: Vec2) {
        if pos.distance_squared(self.origin) > DRAG_THRESHOLD_SQ {
            self.dragged = true;
        }
    }
}

/// Touch gesture phase.
#[derive(Debug, Clone, Copy, PartialEq)]
enum TouchGesture {
    Idle,
    Drag(Press),
    Pinch,
}

/// Converts raw input events into [`ViewCommand`]s.
///
/// # Usage
///
/// ```ignore
/// for cmd in processor.handle_event(event) {
///     view.execute(cmd, now);
/// }
///
/// if let Some(cmd) = processor.handle_key_press("Escape") {
///     view.execute(cmd, now);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct InputProcessor {
    /// Held mouse/pen pointer.
    pointer: Option<Press>,
    /// Touch gesture in progress.
    touch: TouchGesture,
    /// Key string → action mapping.
    key_bindings: KeybindingOptions,
}

impl InputProcessor {
    /// Create a new processor with default key bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_key_bindings(KeybindingOptions::default())
    }

    /// Create a processor with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeybindingOptions) -> Self {
        Self {
            pointer: None,
            touch: TouchGesture::Idle,
            key_bindings,
        }
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeybindingOptions {
        &self.key_bindings
    }

    /// Replace the key bindings.
    pub fn set_key_bindings(&mut self, key_bindings: KeybindingOptions) {
        self.key_bindings = key_bindings;
    }

    /// Whether a pointer or touch drag is held.
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.pointer.is_some() || self.touch != TouchGesture::Idle
    }

    /// Look up a key press and return the corresponding command, if bound.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<ViewCommand> {
        self.key_bindings.lookup(key).map(|action| action.to_command())
    }

    /// Process a raw input event and return the commands it produces, in
    /// order.
    pub fn handle_event(&mut self, event: InputEvent) -> Vec<ViewCommand> {
        match event {
            InputEvent::PointerDown { x, y } => {
                self.pointer = Some(Press::at(Vec2::new(x, y)));
                vec![ViewCommand::DragBegin { x }]
            }
            InputEvent::PointerMove { x, y } => match &mut self.pointer {
                Some(press) => {
                    press.track(Vec2::new(x, y));
                    vec![ViewCommand::DragMove { x }]
                }
                None => Vec::new(),
            },
            InputEvent::PointerUp => self
                .pointer
                .take()
                .map_or_else(Vec::new, release_commands),
            InputEvent::TouchStart { primary, secondary } => {
                self.touch_start(primary, secondary)
            }
            InputEvent::TouchMove { primary, secondary } => {
                self.touch_move(primary, secondary)
            }
            InputEvent::TouchEnd => {
                match std::mem::replace(&mut self.touch, TouchGesture::Idle) {
                    TouchGesture::Idle => Vec::new(),
                    TouchGesture::Drag(press) => release_commands(press),
                    TouchGesture::Pinch => vec![ViewCommand::PinchEnd],
                }
            }
            InputEvent::Wheel { delta_y } => {
                vec![ViewCommand::Wheel { delta_y }]
            }
        }
    }

    /// One finger starts a drag; a second finger turns it into a pinch.
    fn touch_start(
        &mut self,
        primary: Vec2,
        secondary: Option<Vec2>,
    ) -> Vec<ViewCommand> {
        let mut commands = Vec::new();
        match secondary {
            Some(second) => {
                if matches!(self.touch, TouchGesture::Drag(_)) {
                    commands.push(ViewCommand::DragEnd);
                }
                self.touch = TouchGesture::Pinch;
                commands.push(ViewCommand::PinchBegin {
                    distance: primary.distance(second),
                });
            }
            None => {
                if self.touch == TouchGesture::Pinch {
                    commands.push(ViewCommand::PinchEnd);
                }
                self.touch = TouchGesture::Drag(Press::at(primary));
                commands.push(ViewCommand::DragBegin { x: primary.x });
            }
        }
        commands
    }

    fn touch_move(
        &mut self,
        primary: Vec2,
        secondary: Option<Vec2>,
    ) -> Vec<ViewCommand> {
        match (&mut self.touch, secondary) {
            (TouchGesture::Pinch, Some(second)) => {
                vec![ViewCommand::PinchMove {
                    distance: primary.distance(second),
                }]
            }
            (TouchGesture::Drag(press), _) => {
                press.track(primary);
                vec![ViewCommand::DragMove { x: primary.x }]
            }
            _ => Vec::new(),
        }
    }
}

/// Commands for a released press: always a drag end, plus a click when the
/// press never moved.
fn release_commands(press: Press) -> Vec<ViewCommand> {
    if press.dragged {
        vec![ViewCommand::DragEnd]
    } else {
        vec![ViewCommand::DragEnd, ViewCommand::ProductClicked]
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_drag_emits_begin_move_end() {
        let mut p = InputProcessor::new();
        assert_eq!(
            p.handle_event(InputEvent::PointerDown { x: 10.0, y: 5.0 }),
            vec![ViewCommand::DragBegin { x: 10.0 }]
        );
        assert_eq!(
            p.handle_event(InputEvent::PointerMove { x: 40.0, y: 5.0 }),
            vec![ViewCommand::DragMove { x: 40.0 }]
        );
        assert_eq!(
            p.handle_event(InputEvent::PointerUp),
            vec![ViewCommand::DragEnd]
        );
        assert!(!p.is_pressed());
    }

    #[test]
    fn test_stationary_press_is_a_click() {
        let mut p = InputProcessor::new();
        let _ = p.handle_event(InputEvent::PointerDown { x: 10.0, y: 5.0 });
        let _ = p.handle_event(InputEvent::PointerMove { x: 10.5, y: 5.0 });
        assert_eq!(
            p.handle_event(InputEvent::PointerUp),
            vec![ViewCommand::DragEnd, ViewCommand::ProductClicked]
        );
    }

    #[test]
    fn test_hover_without_press_is_ignored() {
        let mut p = InputProcessor::new();
        assert!(p
            .handle_event(InputEvent::PointerMove { x: 1.0, y: 1.0 })
            .is_empty());
        assert!(p.handle_event(InputEvent::PointerUp).is_empty());
    }

    #[test]
    fn test_second_finger_switches_drag_to_pinch() {
        let mut p = InputProcessor::new();
        let a = Vec2::new(0.0, 0.0);
        let _ = p.handle_event(InputEvent::TouchStart {
            primary: a,
            secondary: None,
        });
        assert_eq!(
            p.handle_event(InputEvent::TouchStart {
                primary: a,
                secondary: Some(Vec2::new(30.0, 40.0)),
            }),
            vec![
                ViewCommand::DragEnd,
                ViewCommand::PinchBegin { distance: 50.0 }
            ]
        );
        assert_eq!(
            p.handle_event(InputEvent::TouchMove {
                primary: a,
                secondary: Some(Vec2::new(60.0, 80.0)),
            }),
            vec![ViewCommand::PinchMove { distance: 100.0 }]
        );
        assert_eq!(
            p.handle_event(InputEvent::TouchEnd),
            vec![ViewCommand::PinchEnd]
        );
    }

    #[test]
    fn test_single_touch_drags_by_primary_x() {
        let mut p = InputProcessor::new();
        let _ = p.handle_event(InputEvent::TouchStart {
            primary: Vec2::new(100.0, 0.0),
            secondary: None,
        });
        assert_eq!(
            p.handle_event(InputEvent::TouchMove {
                primary: Vec2::new(70.0, 0.0),
                secondary: None,
            }),
            vec![ViewCommand::DragMove { x: 70.0 }]
        );
        assert_eq!(
            p.handle_event(InputEvent::TouchEnd),
            vec![ViewCommand::DragEnd]
        );
    }

    #[test]
    fn test_wheel_passes_through() {
        let mut p = InputProcessor::new();
        assert_eq!(
            p.handle_event(InputEvent::Wheel { delta_y: -3.0 }),
            vec![ViewCommand::Wheel { delta_y: -3.0 }]
        );
    }

    #[test]
    fn test_default_keys_map_to_commands() {
        let p = InputProcessor::new();
        assert_eq!(p.handle_key_press("Escape"), Some(ViewCommand::Skip));
        assert_eq!(p.handle_key_press("KeyR"), Some(ViewCommand::ResetView));
        assert_eq!(
            p.handle_key_press("ArrowLeft"),
            Some(ViewCommand::RotateLeft)
        );
        assert_eq!(p.handle_key_press("Minus"), Some(ViewCommand::ZoomOut));
        assert_eq!(
            p.handle_key_press("Space"),
            Some(ViewCommand::ToggleAutoRotate)
        );
        assert_eq!(p.handle_key_press("KeyQ"), None);
    }
}
