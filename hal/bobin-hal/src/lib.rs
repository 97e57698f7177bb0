//! Bobin Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits that sit between the
//! winder logic and a chip-specific HAL. The core state machine only ever
//! sees these traits, so it runs unchanged on the RP2040 and on the host
//! under test.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (bobin-firmware, tests)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  bobin-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │  bobin-hal-   │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O (pedal, sensors, buzzer)
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial link to the motor controller
//! - [`adc::AnalogInput`] - Speed potentiometer
//! - [`time::Clock`] - Wrapping millisecond counter
//! - [`keypad::KeypadSource`] - Matrix keypad press/release events

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod gpio;
pub mod keypad;
pub mod time;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use adc::AnalogInput;
pub use gpio::{InputPin, Level, OutputPin};
pub use keypad::{KeyEvent, KeyState, KeypadSource};
pub use time::{elapsed_ms, Clock};
pub use uart::{UartRx, UartTx};
