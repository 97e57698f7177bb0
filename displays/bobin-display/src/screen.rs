//! Screen buffer types
//!
//! Provides a fixed-size character frame for text-mode displays.

use core::fmt::{self, Write};

use heapless::String;

/// Number of character rows on the panel
pub const SCREEN_ROWS: usize = 4;

/// Number of character columns on the panel
pub const SCREEN_COLS: usize = 20;

/// Screen buffer for text-mode displays
///
/// Every row is always exactly [`SCREEN_COLS`] ASCII characters, padded
/// with spaces. Edits mark their row dirty; loading a whole template
/// requests a full redraw instead.
#[derive(Clone)]
pub struct Screen {
    /// Current display content
    lines: [[u8; SCREEN_COLS]; SCREEN_ROWS],
    /// Rows edited since the last render, one bit per row
    dirty_rows: u8,
    /// Whole panel must be cleared and repainted
    full_redraw: bool,
    /// Hardware cursor position (row, col)
    cursor: Option<(u8, u8)>,
    /// Cursor blinks at `cursor`
    blink: bool,
    /// Cursor state changed since the last render
    cursor_dirty: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create a blank screen that still needs its first paint
    pub const fn new() -> Self {
        Self {
            lines: [[b' '; SCREEN_COLS]; SCREEN_ROWS],
            dirty_rows: 0,
            full_redraw: true,
            cursor: None,
            blink: false,
            cursor_dirty: true,
        }
    }

    /// Blank every row and request a full redraw
    pub fn clear(&mut self) {
        self.lines = [[b' '; SCREEN_COLS]; SCREEN_ROWS];
        self.full_redraw = true;
    }

    /// Replace the whole frame with a template and request a full redraw
    pub fn load(&mut self, template: &[&str; SCREEN_ROWS]) {
        for (row, text) in template.iter().enumerate() {
            Self::fill(&mut self.lines[row], 0, text);
            self.lines[row][text.len().min(SCREEN_COLS)..].fill(b' ');
        }
        self.full_redraw = true;
    }

    /// Set the content of a specific row, padding with spaces
    pub fn set_line(&mut self, row: usize, text: &str) {
        if row < SCREEN_ROWS {
            self.lines[row].fill(b' ');
            Self::fill(&mut self.lines[row], 0, text);
            self.dirty_rows |= 1 << row;
        }
    }

    /// Overwrite characters starting at `col`
    ///
    /// Text running past the right edge is cut off.
    pub fn write_at(&mut self, row: usize, col: usize, text: &str) {
        if row < SCREEN_ROWS && col < SCREEN_COLS {
            Self::fill(&mut self.lines[row], col, text);
            self.dirty_rows |= 1 << row;
        }
    }

    /// Formatted variant of [`write_at`](Self::write_at)
    pub fn write_fmt_at(&mut self, row: usize, col: usize, args: fmt::Arguments<'_>) {
        let mut text: String<SCREEN_COLS> = String::new();
        // Overflow just means the tail would not fit on the panel anyway
        let _ = text.write_fmt(args);
        self.write_at(row, col, &text);
    }

    /// Blank `len` characters starting at `col`
    pub fn clear_span(&mut self, row: usize, col: usize, len: usize) {
        if row < SCREEN_ROWS && col < SCREEN_COLS {
            let end = (col + len).min(SCREEN_COLS);
            self.lines[row][col..end].fill(b' ');
            self.dirty_rows |= 1 << row;
        }
    }

    /// Get the content of a specific row
    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines
            .get(row)
            .and_then(|bytes| core::str::from_utf8(bytes).ok())
    }

    /// Place the hardware cursor, or hide it with `None`
    pub fn set_cursor(&mut self, cursor: Option<(u8, u8)>) {
        if self.cursor != cursor {
            self.cursor = cursor;
            self.cursor_dirty = true;
        }
    }

    /// Current cursor position
    pub fn cursor(&self) -> Option<(u8, u8)> {
        self.cursor
    }

    /// Enable or disable the blinking cursor
    pub fn set_blink(&mut self, on: bool) {
        if self.blink != on {
            self.blink = on;
            self.cursor_dirty = true;
        }
    }

    /// Whether the cursor blinks
    pub fn blink(&self) -> bool {
        self.blink
    }

    /// Whether the whole panel must be repainted
    pub fn needs_full_redraw(&self) -> bool {
        self.full_redraw
    }

    /// Whether `row` changed since the last render
    pub fn is_row_dirty(&self, row: usize) -> bool {
        row < SCREEN_ROWS && self.dirty_rows & (1 << row) != 0
    }

    /// Whether the cursor needs to be pushed again
    pub fn is_cursor_dirty(&self) -> bool {
        self.cursor_dirty
    }

    /// Whether anything at all is waiting to be rendered
    pub fn is_dirty(&self) -> bool {
        self.full_redraw || self.dirty_rows != 0 || self.cursor_dirty
    }

    /// Mark screen as rendered
    pub fn mark_clean(&mut self) {
        self.full_redraw = false;
        self.dirty_rows = 0;
        self.cursor_dirty = false;
    }

    fn fill(line: &mut [u8; SCREEN_COLS], col: usize, text: &str) {
        for (slot, byte) in line[col..].iter_mut().zip(text.bytes()) {
            *slot = if byte.is_ascii() && !byte.is_ascii_control() {
                byte
            } else {
                b'?'
            };
        }
    }
}
