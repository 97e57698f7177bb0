//! Turn counting
//!
//! The turn sensor pulls low once per spindle revolution. Pulses closer
//! together than the debounce interval are contact bounce and are dropped
//! outright; they are never deferred to a later tick.

use bobin_hal::elapsed_ms;

/// Live counters of a winding job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProgressCounters {
    /// Turns counted so far
    pub current_turns: u16,
    /// Cycle the motor controller reported last, plus one
    pub current_cycle: u16,
    /// Last sampled spindle speed
    pub current_speed: u16,
}

/// Counts sensor pulses toward a target
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    counters: ProgressCounters,
    total_turns: u16,
    debounce_ms: u32,
    last_pulse_at: Option<u32>,
}

impl ProgressTracker {
    /// Tracker with no target
    pub const fn new(debounce_ms: u32) -> Self {
        Self {
            counters: ProgressCounters {
                current_turns: 0,
                current_cycle: 0,
                current_speed: 0,
            },
            total_turns: 0,
            debounce_ms,
            last_pulse_at: None,
        }
    }

    /// Zero the counters and set a new target
    pub fn reset(&mut self, total_turns: u16) {
        self.counters = ProgressCounters::default();
        self.total_turns = total_turns;
        self.last_pulse_at = None;
    }

    /// Current counters
    pub fn counters(&self) -> &ProgressCounters {
        &self.counters
    }

    /// Target turn count
    pub fn total_turns(&self) -> u16 {
        self.total_turns
    }

    /// Register a falling edge of the turn sensor
    ///
    /// Returns whether the pulse was counted.
    pub fn pulse(&mut self, now_ms: u32) -> bool {
        if let Some(at) = self.last_pulse_at {
            if elapsed_ms(now_ms, at) < self.debounce_ms {
                return false;
            }
        }
        self.last_pulse_at = Some(now_ms);
        self.counters.current_turns = self.counters.current_turns.saturating_add(1);
        true
    }

    /// Record that the motor controller finished cycle `n`
    pub fn cycle_finished(&mut self, n: i32) {
        self.counters.current_cycle = n.wrapping_add(1) as u16;
    }

    /// Store the latest speed sample
    pub fn set_speed(&mut self, speed: u16) {
        self.counters.current_speed = speed;
    }

    /// True once a non-zero target has been reached
    pub fn is_complete(&self) -> bool {
        self.total_turns > 0 && self.counters.current_turns >= self.total_turns
    }
}
