//! Character LCD backend
//!
//! What `render` needs from a panel: positioned text, a hardware cursor
//! with blink, and a clear. Coordinates are (row, column) in characters.

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus write failed
    Communication,
    /// Row or column outside the panel
    InvalidCoordinates,
}

pub trait DisplayBackend {
    /// Blank the panel and home the cursor
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Write ASCII `text` starting at (`row`, `col`)
    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;

    /// Move the hardware cursor
    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError>;

    /// Turn the blinking block cursor on or off
    fn set_blink(&mut self, on: bool) -> Result<(), DisplayError>;

    /// Flush buffered content to the display
    ///
    /// Character LCDs write through, so this is usually a no-op.
    fn flush(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    /// (columns, rows)
    fn dimensions(&self) -> (u8, u8);
}
