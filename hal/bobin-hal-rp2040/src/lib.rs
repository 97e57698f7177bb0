//! RP2040-specific HAL for the coil winder panel
//!
//! This crate provides RP2040 implementations of the `bobin-hal` traits:
//!
//! - GPIO wrappers for the pedal, turn sensor, home sensor and buzzer
//! - Blocking ADC read of the speed potentiometer
//! - Buffered UART halves for the motor controller link
//! - Millisecond clock over the embassy time driver
//! - Matrix keypad scanner

#![no_std]

pub mod adc;
pub mod clock;
pub mod gpio;
pub mod keypad;
pub mod uart;

pub use adc::PotInput;
pub use clock::EmbassyClock;
pub use gpio::{PinInput, PinOutput};
pub use keypad::MatrixKeypad;
pub use uart::{LinkRx, LinkTx};

// Re-export shared traits from bobin-hal for convenience
pub use bobin_hal::{AnalogInput, Clock, InputPin, KeypadSource, OutputPin, UartRx, UartTx};
