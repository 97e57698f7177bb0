//! Numeric entry fields
//!
//! The Idle screen edits two fixed-width digit strings in place: the turn
//! count (4 digits) and the wire diameter (3 digits shown as `D.DD`). There
//! is no insert or delete; typing overwrites and advances, clearing zeroes
//! and steps back.

use heapless::String;

use bobin_display::templates::{DIAMETER_FIELD_ROW, FIELD_COL, TURNS_FIELD_ROW};

/// Digits in the turn count field
pub const TURNS_DIGITS: usize = 4;

/// Digits in the wire diameter field
pub const DIAMETER_DIGITS: usize = 3;

/// Fixed-width decimal field with an edit cursor
///
/// The cursor ranges over `0..=N`; `N` means one past the last digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputField<const N: usize> {
    digits: [u8; N],
    cursor: usize,
}

impl<const N: usize> Default for InputField<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> InputField<N> {
    /// All zeros, cursor on the first digit
    pub const fn new() -> Self {
        Self {
            digits: [b'0'; N],
            cursor: 0,
        }
    }

    /// Overwrite the digit under the cursor and advance
    ///
    /// At one-past-end the cursor first steps back, so repeated typing keeps
    /// replacing the last digit.
    pub fn type_digit(&mut self, digit: u8) {
        if digit > 9 {
            return;
        }
        if self.cursor >= N {
            self.cursor = N - 1;
        }
        self.digits[self.cursor] = b'0' + digit;
        self.cursor += 1;
    }

    /// Zero the digit under the cursor, then step back once
    pub fn clear(&mut self) {
        if self.cursor >= N {
            self.cursor = N - 1;
        }
        self.digits[self.cursor] = b'0';
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Cursor index in `0..=N`
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Raw digit characters
    pub fn as_str(&self) -> &str {
        // Only ASCII digits are ever stored
        core::str::from_utf8(&self.digits).unwrap_or("")
    }

    /// Decimal value of the digits
    pub fn value(&self) -> u32 {
        self.digits
            .iter()
            .fold(0, |acc, d| acc * 10 + u32::from(d - b'0'))
    }
}

/// Which field the digit keys edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Focus {
    /// Turn count (first row)
    #[default]
    Turns,
    /// Wire diameter (second row)
    Diameter,
}

/// Both Idle fields plus focus
#[derive(Debug, Clone, Default)]
pub struct InputEditor {
    turns: InputField<TURNS_DIGITS>,
    diameter: InputField<DIAMETER_DIGITS>,
    focus: Focus,
}

impl InputEditor {
    /// Fresh editor: zeros, turn field focused
    pub const fn new() -> Self {
        Self {
            turns: InputField::new(),
            diameter: InputField::new(),
            focus: Focus::Turns,
        }
    }

    /// Move focus between rows
    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    /// Type into the focused field
    pub fn type_digit(&mut self, digit: u8) {
        match self.focus {
            Focus::Turns => self.turns.type_digit(digit),
            Focus::Diameter => self.diameter.type_digit(digit),
        }
    }

    /// Clear in the focused field
    pub fn clear(&mut self) {
        match self.focus {
            Focus::Turns => self.turns.clear(),
            Focus::Diameter => self.diameter.clear(),
        }
    }

    /// Target turn count
    pub fn total_turns(&self) -> u16 {
        // Four digits never exceed 9999
        self.turns.value() as u16
    }

    /// Wire diameter in mm (hundredths entered)
    pub fn wire_diameter(&self) -> f32 {
        self.diameter.value() as f32 / 100.0
    }

    /// Turn field as shown on screen
    pub fn turns_text(&self) -> &str {
        self.turns.as_str()
    }

    /// Diameter field as shown on screen, `D.DD`
    pub fn diameter_text(&self) -> String<{ DIAMETER_DIGITS + 1 }> {
        let mut text = String::new();
        for (i, ch) in self.diameter.as_str().chars().enumerate() {
            if i == 1 {
                let _ = text.push('.');
            }
            let _ = text.push(ch);
        }
        text
    }

    /// Screen position (row, col) of the cursor for the focused field
    pub fn cursor_position(&self) -> (u8, u8) {
        match self.focus {
            Focus::Turns => {
                let idx = self.turns.cursor().min(TURNS_DIGITS - 1);
                (TURNS_FIELD_ROW as u8, (FIELD_COL + idx) as u8)
            }
            Focus::Diameter => {
                // Skip over the decimal point after the first digit
                let idx = self.diameter.cursor();
                let mut pos = idx;
                if idx > 0 {
                    pos += 1;
                }
                if idx >= DIAMETER_DIGITS {
                    pos -= 1;
                }
                (DIAMETER_FIELD_ROW as u8, (FIELD_COL + pos) as u8)
            }
        }
    }
}
