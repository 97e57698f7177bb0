//! Edge detection and rate limiting on the loop clock

use bobin_hal::{elapsed_ms, Level};

/// Level transition seen by an [`EdgeDetector`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Went (or first read) LOW
    Falling,
    /// HIGH after a previously observed LOW
    Rising,
}

/// Turns level samples into edges
///
/// The first sample has no history. A first LOW counts as a falling edge,
/// a first HIGH is only recorded, so a released pedal at power-up never
/// produces a spurious rising edge.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeDetector {
    last: Option<Level>,
}

impl EdgeDetector {
    /// Detector with no history
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Detector that assumes `level` was already observed
    pub const fn with_level(level: Level) -> Self {
        Self { last: Some(level) }
    }

    /// Forget history
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Last observed level
    pub fn last(&self) -> Option<Level> {
        self.last
    }

    /// Feed one sample
    pub fn update(&mut self, level: Level) -> Option<Edge> {
        let previous = self.last.replace(level);
        match (previous, level) {
            (Some(Level::Low), Level::Low) | (Some(Level::High), Level::High) => None,
            (_, Level::Low) => Some(Edge::Falling),
            (Some(Level::Low), Level::High) => Some(Edge::Rising),
            (None, Level::High) => None,
        }
    }
}

/// Lets an action through at most once per interval
#[derive(Debug, Clone, Copy)]
pub struct Throttle {
    interval_ms: u32,
    last: Option<u32>,
}

impl Throttle {
    /// Throttle that fires immediately the first time
    pub const fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            last: None,
        }
    }

    /// Forget the last firing
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// True (and re-armed) if at least `interval_ms` passed since the last firing
    pub fn ready(&mut self, now_ms: u32) -> bool {
        match self.last {
            Some(last) if elapsed_ms(now_ms, last) < self.interval_ms => false,
            _ => {
                self.last = Some(now_ms);
                true
            }
        }
    }
}
