//! Board-agnostic core logic for the coil winder panel
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Operation state machine (Idle, Offset, Running, Paused, Finished)
//! - Keypad roles and the two numeric entry fields
//! - Speed sampling, pedal/sensor edge handling and turn counting
//! - Startup homing and buzzer sequencing
//! - Configuration type definitions
//! - The `Winder` controller tying them together

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod homing;
pub mod input;
pub mod keys;
pub mod progress;
pub mod sampler;
pub mod state;
pub mod timing;
pub mod tone;

pub use config::WinderConfig;
pub use controller::{Effect, RunParameters, Winder};
pub use state::OperationState;
