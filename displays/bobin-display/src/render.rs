//! Pushing a `Screen` to a backend

use embedded_hal::delay::DelayNs;

use crate::backend::{DisplayBackend, DisplayError};
use crate::screen::{Screen, SCREEN_ROWS};
use crate::templates::Template;

/// Render pending changes of `screen` to `backend`
///
/// A full redraw clears the panel and writes every row. Otherwise only dirty
/// rows are rewritten in place. The cursor is restored afterwards because
/// writing text moves it on the hardware. The screen is marked clean only
/// when everything went through.
pub fn render<B: DisplayBackend>(screen: &mut Screen, backend: &mut B) -> Result<(), DisplayError> {
    if !screen.is_dirty() {
        return Ok(());
    }

    let mut wrote_text = false;
    if screen.needs_full_redraw() {
        backend.clear()?;
        for row in 0..SCREEN_ROWS {
            draw_row(screen, backend, row)?;
        }
        wrote_text = true;
    } else {
        for row in (0..SCREEN_ROWS).filter(|&row| screen.is_row_dirty(row)) {
            draw_row(screen, backend, row)?;
            wrote_text = true;
        }
    }

    if screen.is_cursor_dirty() || (wrote_text && screen.blink()) {
        backend.set_blink(screen.blink())?;
        if let Some((row, col)) = screen.cursor() {
            backend.set_cursor(row, col)?;
        }
    }

    backend.flush()?;
    screen.mark_clean();
    Ok(())
}

fn draw_row<B: DisplayBackend>(screen: &Screen, backend: &mut B, row: usize) -> Result<(), DisplayError> {
    let text = screen.line(row).ok_or(DisplayError::InvalidCoordinates)?;
    backend.draw_text(row as u8, 0, text)
}

/// Type a template out one character at a time, then hold it
///
/// Blocks for roughly `char_delay_ms` per character plus `hold_ms`.
pub fn type_out<B: DisplayBackend, D: DelayNs>(
    backend: &mut B,
    delay: &mut D,
    template: &Template,
    char_delay_ms: u32,
    hold_ms: u32,
) -> Result<(), DisplayError> {
    backend.set_blink(false)?;
    backend.clear()?;
    for (row, text) in template.iter().enumerate() {
        for (col, ch) in text.char_indices() {
            backend.draw_text(row as u8, col as u8, &text[col..col + ch.len_utf8()])?;
            delay.delay_ms(char_delay_ms);
        }
    }
    backend.flush()?;
    delay.delay_ms(hold_ms);
    Ok(())
}
