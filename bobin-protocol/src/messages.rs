//! Message types for the motor controller link
//!
//! Message types are divided into two categories:
//! - Controller → Panel: marker positions, cycle completion, acknowledgements
//! - Panel → Controller: jog, offset, homing and work/pause commands

use core::fmt::Write;

use heapless::String;

use crate::line::MAX_LINE_LEN;
use crate::number::{parse_float, parse_int};

// Tags: Controller → Panel
pub const TAG_FIRST_MARKER: &str = "OFD: ";
pub const TAG_SECOND_MARKER: &str = "OSD: ";
pub const TAG_CYCLE_FINISHED: &str = "CycleFinished: ";
pub const TAG_OFFSET_FIRST_DONE: &str = "Offset-First-Done";
pub const TAG_OFFSET_SECOND_DONE: &str = "Offset-Second-Done";

// Tags: Panel → Controller
pub const TAG_LEFT: &str = "Left";
pub const TAG_RIGHT: &str = "Right";
pub const TAG_STOP: &str = "Stop";
pub const TAG_OFFSET_FIRST: &str = "Offset-First";
pub const TAG_OFFSET_SECOND: &str = "Offset-Second";
pub const TAG_OFFSET_MAIN: &str = "Offset-Main";
pub const TAG_HOMING_DONE: &str = "OMD";
pub const TAG_WORK: &str = "Work: ";
pub const TAG_PAUSE: &str = "Pause";

/// Outbound line terminator (the controller firmware reads `println` style)
pub const COMMAND_END: &str = "\r\n";

/// Errors that can occur while encoding a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolError {
    /// Encoded line does not fit the output buffer
    BufferTooSmall,
}

impl From<core::fmt::Error> for ProtocolError {
    fn from(_: core::fmt::Error) -> Self {
        ProtocolError::BufferTooSmall
    }
}

/// Messages from the motor controller
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PeerMessage {
    /// Carriage reached the first offset marker (position in mm)
    FirstMarker(f32),
    /// Carriage reached the second offset marker (position in mm)
    SecondMarker(f32),
    /// Controller completed cycle N
    CycleFinished(i32),
    /// First-marker positioning acknowledged
    OffsetFirstDone,
    /// Second-marker positioning acknowledged
    OffsetSecondDone,
}

impl PeerMessage {
    /// Parse one received line
    ///
    /// Prefix match, case-sensitive, first match wins. Payloads that do not
    /// parse read as zero. Returns `None` for unknown tags.
    pub fn parse(line: &str) -> Option<Self> {
        if let Some(payload) = line.strip_prefix(TAG_FIRST_MARKER) {
            Some(PeerMessage::FirstMarker(parse_float(payload)))
        } else if let Some(payload) = line.strip_prefix(TAG_SECOND_MARKER) {
            Some(PeerMessage::SecondMarker(parse_float(payload)))
        } else if let Some(payload) = line.strip_prefix(TAG_CYCLE_FINISHED) {
            Some(PeerMessage::CycleFinished(parse_int(payload)))
        } else if line.starts_with(TAG_OFFSET_FIRST_DONE) {
            Some(PeerMessage::OffsetFirstDone)
        } else if line.starts_with(TAG_OFFSET_SECOND_DONE) {
            Some(PeerMessage::OffsetSecondDone)
        } else {
            None
        }
    }
}

/// Payload of a `Work:` command
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WorkOrder {
    /// Cycle the controller should continue from
    pub cycle: u16,
    /// Wire diameter in mm
    pub wire_diameter: f32,
    /// Spindle speed
    pub speed: u16,
}

/// Commands sent to the motor controller
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerCommand {
    /// Start jogging the carriage left
    Left,
    /// Start jogging the carriage right
    Right,
    /// Stop jogging
    Stop,
    /// Move to the first offset marker
    OffsetFirst,
    /// Move to the second offset marker
    OffsetSecond,
    /// Run the homing move
    OffsetMain,
    /// Home sensor reached
    HomingDone,
    /// Continue winding
    Work(WorkOrder),
    /// Pause winding
    Pause,
}

impl ControllerCommand {
    /// Write the line text (no terminator) into `out`
    pub fn write_text<W: Write>(&self, out: &mut W) -> Result<(), ProtocolError> {
        match self {
            ControllerCommand::Left => out.write_str(TAG_LEFT)?,
            ControllerCommand::Right => out.write_str(TAG_RIGHT)?,
            ControllerCommand::Stop => out.write_str(TAG_STOP)?,
            ControllerCommand::OffsetFirst => out.write_str(TAG_OFFSET_FIRST)?,
            ControllerCommand::OffsetSecond => out.write_str(TAG_OFFSET_SECOND)?,
            ControllerCommand::OffsetMain => out.write_str(TAG_OFFSET_MAIN)?,
            ControllerCommand::HomingDone => out.write_str(TAG_HOMING_DONE)?,
            ControllerCommand::Work(order) => write!(
                out,
                "{}{}|{:.2}|{}",
                TAG_WORK, order.cycle, order.wire_diameter, order.speed
            )?,
            ControllerCommand::Pause => out.write_str(TAG_PAUSE)?,
        }
        Ok(())
    }

    /// Line text without terminator
    pub fn text(&self) -> Result<String<MAX_LINE_LEN>, ProtocolError> {
        let mut line = String::new();
        self.write_text(&mut line)?;
        Ok(line)
    }

    /// Full wire line including the terminator
    pub fn encode(&self) -> Result<String<MAX_LINE_LEN>, ProtocolError> {
        let mut line = self.text()?;
        line.push_str(COMMAND_END)
            .map_err(|_| ProtocolError::BufferTooSmall)?;
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_first_marker() {
        assert_eq!(
            PeerMessage::parse("OFD: 12.5"),
            Some(PeerMessage::FirstMarker(12.5))
        );
    }

    #[test]
    fn test_parse_second_marker() {
        assert_eq!(
            PeerMessage::parse("OSD: 40.25\r"),
            Some(PeerMessage::SecondMarker(40.25))
        );
    }

    #[test]
    fn test_parse_cycle_finished() {
        assert_eq!(
            PeerMessage::parse("CycleFinished: 3"),
            Some(PeerMessage::CycleFinished(3))
        );
        assert_eq!(
            PeerMessage::parse("CycleFinished: abc"),
            Some(PeerMessage::CycleFinished(0))
        );
    }

    #[test]
    fn test_parse_bare_tags() {
        assert_eq!(
            PeerMessage::parse("Offset-First-Done"),
            Some(PeerMessage::OffsetFirstDone)
        );
        assert_eq!(
            PeerMessage::parse("Offset-Second-Done\r"),
            Some(PeerMessage::OffsetSecondDone)
        );
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(PeerMessage::parse("ofd: 1.0"), None);
        assert_eq!(PeerMessage::parse("cyclefinished: 1"), None);
    }

    #[test]
    fn test_parse_requires_separator() {
        // Tag without the ": " separator is not a marker report
        assert_eq!(PeerMessage::parse("OFD12.5"), None);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(PeerMessage::parse(""), None);
        assert_eq!(PeerMessage::parse("Hello"), None);
        assert_eq!(PeerMessage::parse("Offset-Third-Done"), None);
    }

    #[test]
    fn test_encode_simple_commands() {
        assert_eq!(ControllerCommand::Left.encode().unwrap().as_str(), "Left\r\n");
        assert_eq!(ControllerCommand::Stop.text().unwrap().as_str(), "Stop");
        assert_eq!(
            ControllerCommand::OffsetSecond.text().unwrap().as_str(),
            "Offset-Second"
        );
        assert_eq!(ControllerCommand::HomingDone.text().unwrap().as_str(), "OMD");
    }

    #[test]
    fn test_encode_work() {
        let cmd = ControllerCommand::Work(WorkOrder {
            cycle: 2,
            wire_diameter: 3.2,
            speed: 300,
        });
        assert_eq!(cmd.text().unwrap().as_str(), "Work: 2|3.20|300");
        assert_eq!(cmd.encode().unwrap().as_str(), "Work: 2|3.20|300\r\n");
    }

    #[test]
    fn test_encode_into_small_buffer() {
        let mut small: String<4> = String::new();
        let cmd = ControllerCommand::OffsetMain;
        assert_eq!(
            cmd.write_text(&mut small),
            Err(ProtocolError::BufferTooSmall)
        );
    }
}
