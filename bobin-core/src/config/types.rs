//! Configuration type definitions
//!
//! Every field has a default equal to the panel's long-standing behavior,
//! so an empty configuration file yields a working machine.

use bobin_hal::uart::BaudRate;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A timing interval that must be non-zero is zero
    ZeroInterval,
    /// `input_min >= input_max`
    EmptyInputRange,
    /// `output_min >= output_max`
    EmptyOutputRange,
    /// Baud rate other than 57600 or 115200
    UnsupportedBaudRate(u32),
}

/// Loop timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimingConfig {
    /// Minimum spacing between counted turn sensor pulses
    pub sensor_debounce_ms: u32,
    /// Minimum spacing between partial Running screen refreshes
    pub refresh_ms: u32,
    /// Home sensor poll interval during homing
    pub home_poll_ms: u32,
    /// Delay per character of the boot watermark
    pub splash_char_ms: u32,
    /// How long the finished watermark stays up
    pub splash_hold_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            sensor_debounce_ms: 10,
            refresh_ms: 30,
            home_poll_ms: 10,
            splash_char_ms: 30,
            splash_hold_ms: 1000,
        }
    }
}

/// Speed potentiometer mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpeedConfig {
    /// Use the throttled direct reading instead of the rolling average
    pub throttled: bool,
    /// Minimum spacing between throttled readings
    pub throttle_ms: u32,
    /// Lowest raw reading
    pub input_min: u16,
    /// Highest raw reading
    pub input_max: u16,
    /// Speed at `input_min`
    pub output_min: u16,
    /// Speed at `input_max`
    pub output_max: u16,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            throttled: false,
            throttle_ms: 150,
            input_min: 0,
            input_max: 255,
            output_min: 1,
            output_max: 400,
        }
    }
}

/// Serial link to the motor controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LinkConfig {
    /// Baud rate, 57600 or 115200
    pub baud: u32,
    /// Copy every received line to the diagnostic log
    pub mirror_received: bool,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            baud: 115_200,
            mirror_received: true,
        }
    }
}

/// Startup homing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HomingConfig {
    /// Run the homing phase before accepting input
    pub enabled: bool,
}

impl Default for HomingConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Complete panel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WinderConfig {
    pub timing: TimingConfig,
    pub speed: SpeedConfig,
    pub link: LinkConfig,
    pub homing: HomingConfig,
}

impl WinderConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.timing;
        if t.sensor_debounce_ms == 0 || t.refresh_ms == 0 || t.home_poll_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.speed.throttled && self.speed.throttle_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.speed.input_min >= self.speed.input_max {
            return Err(ConfigError::EmptyInputRange);
        }
        if self.speed.output_min >= self.speed.output_max {
            return Err(ConfigError::EmptyOutputRange);
        }
        if BaudRate::from_bps(self.link.baud).is_none() {
            return Err(ConfigError::UnsupportedBaudRate(self.link.baud));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = WinderConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.timing.sensor_debounce_ms, 10);
        assert_eq!(config.speed.output_max, 400);
        assert_eq!(config.link.baud, 115_200);
    }

    #[test]
    fn test_zero_interval() {
        let mut config = WinderConfig::default();
        config.timing.refresh_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroInterval));
    }

    #[test]
    fn test_throttle_interval_only_checked_when_used() {
        let mut config = WinderConfig::default();
        config.speed.throttle_ms = 0;
        assert_eq!(config.validate(), Ok(()));
        config.speed.throttled = true;
        assert_eq!(config.validate(), Err(ConfigError::ZeroInterval));
    }

    #[test]
    fn test_ranges() {
        let mut config = WinderConfig::default();
        config.speed.input_max = 0;
        assert_eq!(config.validate(), Err(ConfigError::EmptyInputRange));

        let mut config = WinderConfig::default();
        config.speed.output_min = 400;
        assert_eq!(config.validate(), Err(ConfigError::EmptyOutputRange));
    }

    #[test]
    fn test_baud_rate() {
        let mut config = WinderConfig::default();
        config.link.baud = 57_600;
        assert_eq!(config.validate(), Ok(()));
        config.link.baud = 115_200;
        assert_eq!(config.validate(), Ok(()));
        for baud in [0, 9600, 57_601, 230_400] {
            config.link.baud = baud;
            assert_eq!(config.validate(), Err(ConfigError::UnsupportedBaudRate(baud)));
        }
    }
}
