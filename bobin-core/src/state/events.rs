//! Events that trigger state transitions

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Keypad events
    /// `C` pressed
    Confirm,
    /// `*` pressed
    Escape,

    // Pedal events
    /// Pedal went down (line LOW)
    PedalPressed,
    /// Pedal came up after being down
    PedalReleased,

    // Progress events
    /// Turn count reached a non-zero target
    TargetReached,
}
