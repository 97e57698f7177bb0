//! Keypad event source
//!
//! The keypad is scanned by the chip HAL; the application only sees
//! discrete press/release edges, returned from a poll rather than pushed
//! through a callback.

/// Edge reported for a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyState {
    /// Key went down
    Pressed,
    /// Key came back up
    Released,
}

/// One key edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    /// Keymap symbol of the key (e.g. `'7'`, `'C'`)
    pub key: char,
    /// Press or release
    pub state: KeyState,
}

impl KeyEvent {
    /// Press event for `key`
    pub const fn pressed(key: char) -> Self {
        Self {
            key,
            state: KeyState::Pressed,
        }
    }

    /// Release event for `key`
    pub const fn released(key: char) -> Self {
        Self {
            key,
            state: KeyState::Released,
        }
    }

    /// True for a press edge
    pub fn is_press(&self) -> bool {
        self.state == KeyState::Pressed
    }
}

/// Source of keypad edges
pub trait KeypadSource {
    /// Scan once; returns at most one edge per call
    fn poll(&mut self) -> Option<KeyEvent>;
}
