//! Buzzer patterns
//!
//! A pattern is `cycles` repetitions of on-for-`on_ms`, off-for-`off_ms`.
//! The sequencer advances from the loop clock instead of sleeping, so the
//! keypad and serial link keep being serviced while the buzzer sounds.

use bobin_hal::elapsed_ms;

/// One buzzer pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TonePattern {
    pub cycles: u8,
    pub on_ms: u16,
    pub off_ms: u16,
}

impl TonePattern {
    /// First marker reached / acknowledged
    pub const FIRST_MARKER: Self = Self::new(1, 200, 100);
    /// Second marker reached / acknowledged
    pub const SECOND_MARKER: Self = Self::new(2, 150, 50);
    /// Homing complete
    pub const HOMED: Self = Self::new(3, 100, 100);
    /// Target turn count reached
    pub const FINISHED: Self = Self::new(3, 400, 200);

    pub const fn new(cycles: u8, on_ms: u16, off_ms: u16) -> Self {
        Self {
            cycles,
            on_ms,
            off_ms,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Playing {
    pattern: TonePattern,
    cycle: u8,
    on: bool,
    phase_start: u32,
}

/// Plays one pattern at a time; a new pattern replaces the current one
#[derive(Debug, Clone, Default)]
pub struct ToneSequencer {
    playing: Option<Playing>,
}

impl ToneSequencer {
    pub const fn new() -> Self {
        Self { playing: None }
    }

    /// Start `pattern` at `now_ms`
    pub fn start(&mut self, pattern: TonePattern, now_ms: u32) {
        self.playing = (pattern.cycles > 0).then_some(Playing {
            pattern,
            cycle: 0,
            on: true,
            phase_start: now_ms,
        });
    }

    /// Whether a pattern is still running
    pub fn is_active(&self) -> bool {
        self.playing.is_some()
    }

    /// Advance to `now_ms`; returns whether the buzzer should sound
    pub fn update(&mut self, now_ms: u32) -> bool {
        while let Some(p) = self.playing.as_mut() {
            let phase_ms = u32::from(if p.on { p.pattern.on_ms } else { p.pattern.off_ms });
            if elapsed_ms(now_ms, p.phase_start) < phase_ms {
                return p.on;
            }
            p.phase_start = p.phase_start.wrapping_add(phase_ms);
            if p.on {
                p.on = false;
            } else {
                p.cycle += 1;
                if p.cycle >= p.pattern.cycles {
                    self.playing = None;
                } else {
                    p.on = true;
                }
            }
        }
        false
    }
}
