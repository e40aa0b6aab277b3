//! Keyboard modifier state tracking.

use super::events::Key;

/// Which modifier keys are currently held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the state for a modifier key event. Returns false for any other key.
    pub fn track(&mut self, key: Key, pressed: bool) -> bool {
        match key {
            Key::Shift => self.shift = pressed,
            Key::Ctrl => self.ctrl = pressed,
            Key::Alt => self.alt = pressed,
            _ => return false,
        }
        true
    }

    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt
    }

    /// Base for exponential drag scaling: Ctrl is fine, Shift is coarse.
    pub fn scale_base(&self, normal: f64, fine: f64, coarse: f64) -> f64 {
        if self.ctrl {
            fine
        } else if self.shift {
            coarse
        } else {
            normal
        }
    }
}
