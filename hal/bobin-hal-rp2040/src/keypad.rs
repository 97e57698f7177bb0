//! Matrix keypad scanner
//!
//! Rows are driven low one at a time and the columns (pulled up) are read
//! back; a low column means the key at that crossing is down. Each key is
//! debounced on its own, and edges are queued so that two keys changing in
//! the same scan are both reported.

use embassy_rp::gpio::{Input, Output};
use embassy_time::Instant;
use heapless::Deque;

use bobin_hal::{elapsed_ms, KeyEvent, KeypadSource};

/// Settle time for a key change
pub const DEBOUNCE_MS: u32 = 10;

const EVENT_QUEUE_LEN: usize = 8;

#[derive(Debug, Clone, Copy, Default)]
struct KeyTrack {
    stable: bool,
    raw: bool,
    since: u32,
}

/// Scanner for an `R` x `C` keypad
pub struct MatrixKeypad<'d, const R: usize, const C: usize> {
    rows: [Output<'d>; R],
    cols: [Input<'d>; C],
    keymap: [[char; C]; R],
    keys: [[KeyTrack; C]; R],
    events: Deque<KeyEvent, EVENT_QUEUE_LEN>,
}

impl<'d, const R: usize, const C: usize> MatrixKeypad<'d, R, C> {
    /// Rows must start high, columns must have pull-ups enabled
    pub fn new(rows: [Output<'d>; R], cols: [Input<'d>; C], keymap: [[char; C]; R]) -> Self {
        Self {
            rows,
            cols,
            keymap,
            keys: [[KeyTrack::default(); C]; R],
            events: Deque::new(),
        }
    }

    fn scan(&mut self, now_ms: u32) {
        for r in 0..R {
            self.rows[r].set_low();
            // Column inputs go through a two-cycle synchronizer
            for _ in 0..8 {
                core::hint::spin_loop();
            }
            for c in 0..C {
                let down = self.cols[c].is_low();
                let key = &mut self.keys[r][c];
                if down != key.raw {
                    key.raw = down;
                    key.since = now_ms;
                } else if key.raw != key.stable
                    && elapsed_ms(now_ms, key.since) >= DEBOUNCE_MS
                {
                    key.stable = key.raw;
                    let symbol = self.keymap[r][c];
                    let event = if key.stable {
                        KeyEvent::pressed(symbol)
                    } else {
                        KeyEvent::released(symbol)
                    };
                    // Overflow drops the edge; the key is seen again on the next change
                    let _ = self.events.push_back(event);
                }
            }
            self.rows[r].set_high();
        }
    }
}

impl<const R: usize, const C: usize> KeypadSource for MatrixKeypad<'_, R, C> {
    fn poll(&mut self) -> Option<KeyEvent> {
        if self.events.is_empty() {
            let now = Instant::now().as_millis() as u32;
            self.scan(now);
        }
        self.events.pop_front()
    }
}
