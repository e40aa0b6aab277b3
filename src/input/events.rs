//! Normalized input events consumed by the editor state machine.

use crate::geometry::Vec2;

/// Generic key representation for cross-backend compatibility.
///
/// Backends map their native key codes to these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    Escape,
    Return,
    Backspace,
    Tab,
    Space,
    Up,
    Down,
    Left,
    Right,
    Delete,
    Shift,
    Ctrl,
    Alt,
    /// Unmapped or unrecognized key
    Unknown,
}

impl Key {
    /// Name used in keybinding strings, or `None` for modifiers and unknown keys.
    pub fn binding_name(&self) -> Option<String> {
        let name = match self {
            Key::Char(c) => return Some(c.to_uppercase().collect()),
            Key::Escape => "Escape",
            Key::Return => "Return",
            Key::Backspace => "Backspace",
            Key::Tab => "Tab",
            Key::Space => "Space",
            Key::Up => "Up",
            Key::Down => "Down",
            Key::Left => "Left",
            Key::Right => "Right",
            Key::Delete => "Delete",
            Key::Shift | Key::Ctrl | Key::Alt | Key::Unknown => return None,
        };
        Some(name.to_string())
    }

    pub fn is_modifier(&self) -> bool {
        matches!(self, Key::Shift | Key::Ctrl | Key::Alt)
    }
}

/// Mouse button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Primary button: drag, select, commit
    Left,
    /// Secondary button: cancel and restore
    Right,
    Middle,
}

/// Non-character edits to the active text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEdit {
    Backspace,
}

/// One normalized input event. Pointer positions are device pixels, y-up.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    PointerMove(Vec2),
    PointerDown(MouseButton, Vec2),
    PointerUp(MouseButton, Vec2),
    /// Positive `delta` zooms in.
    Scroll { position: Vec2, delta: f64 },
    /// Committed text from the platform input method.
    TextInput(String),
    TextEdit(TextEdit),
    /// Device surface resized.
    Resize { width: f64, height: f64 },
}
