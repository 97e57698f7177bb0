//! Keypad layout and key roles
//!
//! The panel carries a 5x4 membrane keypad. Its symbols are fixed in the
//! HAL keymap; this module gives each symbol its meaning.

/// Rows of the keypad matrix
pub const KEY_ROWS: usize = 5;

/// Columns of the keypad matrix
pub const KEY_COLS: usize = 4;

/// Symbol printed on each key, by (row, column)
pub const KEYMAP: [[char; KEY_COLS]; KEY_ROWS] = [
    ['G', 'H', '#', '*'],
    ['1', '2', '3', 'F'],
    ['4', '5', '6', 'E'],
    ['7', '8', '9', 'D'],
    ['A', '0', 'B', 'C'],
];

/// What a key does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    /// `0`..`9`
    Digit(u8),
    /// `C`: enter / start
    Confirm,
    /// `D`: zero the digit under the cursor
    Clear,
    /// `E`: edit the wire diameter
    FocusDiameter,
    /// `F`: edit the turn count
    FocusTurns,
    /// `G`: move to the first marker
    OffsetFirst,
    /// `H`: move to the second marker
    OffsetSecond,
    /// `A`: jog the carriage left while held
    JogLeft,
    /// `B`: jog the carriage right while held
    JogRight,
    /// `*`: escape
    Escape,
    /// `#`: mode
    Mode,
}

impl Key {
    /// Role of a keymap symbol
    pub fn from_char(symbol: char) -> Option<Self> {
        let key = match symbol {
            '0'..='9' => Key::Digit(symbol as u8 - b'0'),
            'C' => Key::Confirm,
            'D' => Key::Clear,
            'E' => Key::FocusDiameter,
            'F' => Key::FocusTurns,
            'G' => Key::OffsetFirst,
            'H' => Key::OffsetSecond,
            'A' => Key::JogLeft,
            'B' => Key::JogRight,
            '*' => Key::Escape,
            '#' => Key::Mode,
            _ => return None,
        };
        Some(key)
    }

    /// True for the two carriage jog keys
    pub fn is_jog(&self) -> bool {
        matches!(self, Key::JogLeft | Key::JogRight)
    }
}
