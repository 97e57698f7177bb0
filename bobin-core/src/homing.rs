//! Startup homing
//!
//! Before the panel takes any input the carriage is driven to its home
//! sensor: the motor controller is told to run its homing move, the home
//! input (active low) is polled, and the controller is told when the
//! sensor trips. Nothing else runs while this is in progress.

use bobin_hal::Level;
use bobin_protocol::ControllerCommand;

use crate::timing::Throttle;

/// Progress of the homing phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HomingPhase {
    /// Homing move not requested yet
    Pending,
    /// Waiting for the home sensor
    Seeking,
    /// Sensor reached and reported
    Homed,
}

/// Homing sequencer
#[derive(Debug, Clone)]
pub struct Homing {
    phase: HomingPhase,
    poll: Throttle,
}

impl Homing {
    /// Sequencer polling the sensor every `poll_ms`
    pub const fn new(poll_ms: u32) -> Self {
        Self {
            phase: HomingPhase::Pending,
            poll: Throttle::new(poll_ms),
        }
    }

    pub fn phase(&self) -> HomingPhase {
        self.phase
    }

    pub fn is_homed(&self) -> bool {
        self.phase == HomingPhase::Homed
    }

    /// Begin seeking; returns the command that starts the homing move
    pub fn start(&mut self) -> ControllerCommand {
        self.phase = HomingPhase::Seeking;
        self.poll.reset();
        ControllerCommand::OffsetMain
    }

    /// Offer a home sensor reading
    ///
    /// Readings are only looked at once per poll interval. Returns the
    /// completion command the tick the sensor is found active.
    pub fn poll(&mut self, home: Level, now_ms: u32) -> Option<ControllerCommand> {
        if self.phase != HomingPhase::Seeking || !self.poll.ready(now_ms) {
            return None;
        }
        if home.is_low() {
            self.phase = HomingPhase::Homed;
            Some(ControllerCommand::HomingDone)
        } else {
            None
        }
    }
}
