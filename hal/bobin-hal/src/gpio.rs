//! GPIO pin abstractions
//!
//! Provides traits for digital input and output pins that can be implemented
//! by chip-specific HALs. Every operator input on the winder (pedal, turn
//! sensor, home sensor) is wired active-low with a pull-up, so reads are
//! usually expressed through [`Level`].

/// Logic level of a digital line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logic 0
    Low,
    /// Logic 1
    High,
}

impl Level {
    /// Level from a boolean "is high" reading
    pub fn from_high(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }

    /// True for [`Level::Low`]
    pub fn is_low(self) -> bool {
        self == Level::Low
    }

    /// True for [`Level::High`]
    pub fn is_high(self) -> bool {
        self == Level::High
    }
}

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }

    /// Current level of the pin
    fn level(&self) -> Level {
        Level::from_high(self.is_high())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakePin(bool);

    impl InputPin for FakePin {
        fn is_high(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_level_from_pin() {
        assert_eq!(FakePin(true).level(), Level::High);
        assert_eq!(FakePin(false).level(), Level::Low);
        assert!(FakePin(false).is_low());
    }

    #[test]
    fn test_level_helpers() {
        assert!(Level::Low.is_low());
        assert!(!Level::Low.is_high());
        assert_eq!(Level::from_high(true), Level::High);
    }
}
