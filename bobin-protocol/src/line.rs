//! Line accumulation for the motor controller link.
//!
//! Bytes are fed one at a time as they come off the UART. A line is
//! complete on `\n`; the accumulated text is handed back and the buffer is
//! emptied whether or not the caller manages to make sense of it.

use heapless::String;

/// Line terminator
pub const LINE_END: u8 = b'\n';

/// Longest line kept, in bytes (excluding the terminator)
///
/// The longest legitimate line is a `Work:` order, well under this.
pub const MAX_LINE_LEN: usize = 64;

/// Accumulates incoming bytes into lines
#[derive(Debug, Clone, Default)]
pub struct LineBuffer {
    buffer: String<MAX_LINE_LEN>,
    truncated: bool,
}

impl LineBuffer {
    /// Create an empty buffer
    pub const fn new() -> Self {
        Self {
            buffer: String::new(),
            truncated: false,
        }
    }

    /// Bytes currently held
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// True when nothing is pending
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// True if bytes were dropped from the pending line
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Feed a single byte
    ///
    /// Returns the completed line (without the terminator) when `byte` is
    /// `\n`. Bytes past [`MAX_LINE_LEN`] and non-ASCII bytes are dropped.
    pub fn feed(&mut self, byte: u8) -> Option<String<MAX_LINE_LEN>> {
        if byte == LINE_END {
            let line = core::mem::take(&mut self.buffer);
            self.truncated = false;
            return Some(line);
        }

        if !byte.is_ascii() || self.buffer.push(byte as char).is_err() {
            self.truncated = true;
        }
        None
    }
}
