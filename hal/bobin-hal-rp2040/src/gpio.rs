//! GPIO wrappers
//!
//! Thin adapters from the embassy-rp pin drivers to the `bobin-hal` pin
//! traits. The pedal, turn sensor and home sensor are all active low with
//! the internal pull-up enabled; the buzzer is a plain push-pull output.

use embassy_rp::gpio::{Input, Output};

use bobin_hal::{InputPin, OutputPin};

/// Digital input backed by an embassy-rp `Input`
pub struct PinInput<'d>(Input<'d>);

impl<'d> PinInput<'d> {
    pub fn new(pin: Input<'d>) -> Self {
        Self(pin)
    }

    pub fn release(self) -> Input<'d> {
        self.0
    }
}

impl InputPin for PinInput<'_> {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}

/// Digital output backed by an embassy-rp `Output`
pub struct PinOutput<'d>(Output<'d>);

impl<'d> PinOutput<'d> {
    pub fn new(pin: Output<'d>) -> Self {
        Self(pin)
    }
}

impl OutputPin for PinOutput<'_> {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}
