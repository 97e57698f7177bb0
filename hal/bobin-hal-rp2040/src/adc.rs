//! Speed potentiometer input
//!
//! RP2040 has a single 12-bit ADC with four external channels:
//! - ADC0: GPIO26
//! - ADC1: GPIO27
//! - ADC2: GPIO28
//! - ADC3: GPIO29
//!
//! The winder's speed mapping is configured for the panel's 8-bit range, so
//! samples are shifted down before they reach the sampler.

use embassy_rp::adc::{Adc, Blocking, Channel};

use bobin_hal::AnalogInput;

/// Bits dropped to bring a 12-bit sample into 0..=255
pub const EIGHT_BIT_SHIFT: u8 = 4;

/// One ADC channel read in blocking mode
pub struct PotInput<'d> {
    adc: Adc<'d, Blocking>,
    channel: Channel<'d>,
    shift: u8,
    last: u16,
}

impl<'d> PotInput<'d> {
    /// Wrap `channel`, dropping `shift` low bits from every sample
    pub fn new(adc: Adc<'d, Blocking>, channel: Channel<'d>, shift: u8) -> Self {
        Self {
            adc,
            channel,
            shift,
            last: 0,
        }
    }
}

impl AnalogInput for PotInput<'_> {
    /// A failed conversion repeats the previous sample
    fn read_raw(&mut self) -> u16 {
        if let Ok(raw) = self.adc.blocking_read(&mut self.channel) {
            self.last = raw >> self.shift;
        }
        self.last
    }
}
