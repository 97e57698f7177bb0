//! Motor Controller Line Protocol
//!
//! This crate defines the text protocol spoken between the operator panel
//! (keypad + LCD) and the motor controller that actually drives the winding
//! spindle and carriage. The link is a bare UART with no flow control.
//!
//! # Protocol Overview
//!
//! Every message is one ASCII line:
//! ```text
//! ┌──────────┬──────┬──────────────┬──────────┐
//! │ TAG      │ ": " │ PAYLOAD      │ "\n"     │
//! │ 1..n B   │ opt. │ opt. number  │ 1 B      │
//! └──────────┴──────┴──────────────┴──────────┘
//! ```
//!
//! There are no checksums, sequence numbers or acknowledgements. A line that
//! does not match a known tag is dropped, a number that does not parse
//! reads as zero, and nothing is ever retransmitted.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod line;
pub mod messages;
pub mod number;

pub use line::{LineBuffer, MAX_LINE_LEN};
pub use messages::{ControllerCommand, PeerMessage, ProtocolError, WorkOrder};
