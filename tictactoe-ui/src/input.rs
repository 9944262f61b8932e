//! Platform-independent input events

/// Mouse buttons as far as widgets care about them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
    Other,
}

/// One polled input event. Coordinates are already in logical canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerMoved { x: f32, y: f32 },
    PointerDown { x: f32, y: f32, button: PointerButton },
    PointerUp { x: f32, y: f32, button: PointerButton },
    /// The user asked to close the window.
    Quit,
}

impl InputEvent {
    /// Pointer position carried by the event, if any.
    pub fn position(&self) -> Option<(f32, f32)> {
        match *self {
            InputEvent::PointerMoved { x, y }
            | InputEvent::PointerDown { x, y, .. }
            | InputEvent::PointerUp { x, y, .. } => Some((x, y)),
            InputEvent::Quit => None,
        }
    }

    pub fn is_pointer_up(&self) -> bool {
        matches!(self, InputEvent::PointerUp { .. })
    }
}
