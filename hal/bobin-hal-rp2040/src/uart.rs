//! Motor controller link
//!
//! The link uses UART0 in buffered mode so bytes keep arriving while the
//! main loop is drawing the LCD. RP2040 pin options:
//! - UART0: GPIO 0/1, 12/13, 16/17
//! - UART1: GPIO 4/5, 8/9, 20/21, 24/25

use embassy_rp::uart::{BufferedUartRx, BufferedUartTx, Error};
use embedded_io::{Read, ReadReady, Write};

use bobin_hal::{UartRx, UartTx};

/// Transmit half of the buffered link
pub struct LinkTx(BufferedUartTx);

impl LinkTx {
    pub fn new(tx: BufferedUartTx) -> Self {
        Self(tx)
    }
}

impl UartTx for LinkTx {
    type Error = Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.0.write_all(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Write::flush(&mut self.0)
    }
}

/// Receive half of the buffered link
pub struct LinkRx(BufferedUartRx);

impl LinkRx {
    pub fn new(rx: BufferedUartRx) -> Self {
        Self(rx)
    }
}

impl UartRx for LinkRx {
    type Error = Error;

    fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        if !self.0.read_ready()? {
            return Ok(None);
        }
        let mut byte = [0u8; 1];
        match self.0.read(&mut byte)? {
            0 => Ok(None),
            _ => Ok(Some(byte[0])),
        }
    }
}
