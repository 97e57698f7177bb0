//! UART serial communication abstractions
//!
//! Provides traits for the point-to-point serial link to the motor
//! controller. Reads are non-blocking because the main loop must keep
//! polling the keypad, pedal and sensor between bytes.

/// UART transmitter
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Write data to the UART
    ///
    /// Blocks until all data has been queued or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error>;

    /// Whether the transport finished initializing
    ///
    /// Boot waits on this forever if it never becomes true.
    fn is_ready(&self) -> bool {
        true
    }
}

/// UART receiver
pub trait UartRx {
    /// Error type for receive operations
    type Error;

    /// Read one byte if one is already buffered
    ///
    /// Returns `Ok(None)` immediately when nothing is pending.
    fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error>;
}

/// Baud rates the motor controller understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BaudRate {
    /// 57600 baud (early panel revisions)
    B57600,
    /// 115200 baud
    B115200,
}

impl BaudRate {
    /// Look up a supported rate
    pub fn from_bps(bps: u32) -> Option<Self> {
        match bps {
            57_600 => Some(BaudRate::B57600),
            115_200 => Some(BaudRate::B115200),
            _ => None,
        }
    }
}
