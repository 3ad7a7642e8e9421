//! Buffered UART0 console: byte polling on RX, log lines on TX.

use embassy_rp::uart::{BufferedUartRx, BufferedUartTx};
use embassy_time::{Duration, with_timeout};
use embedded_io_async::{Read, Write};

use crate::console::ByteSource;
use crate::{Error, Result};

/// Console baud rate.
pub const BAUD_RATE: u32 = 115_200;

/// How long one poll waits for a byte.
pub const POLL_TIMEOUT: Duration = Duration::from_millis(10);

/// Receive half of the console.
pub struct SerialRx {
    rx: BufferedUartRx,
}

impl SerialRx {
    /// Wrap the receive half of a buffered UART.
    #[must_use]
    pub const fn new(rx: BufferedUartRx) -> Self {
        Self { rx }
    }
}

impl ByteSource for SerialRx {
    async fn poll_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0_u8; 1];
        match with_timeout(POLL_TIMEOUT, self.rx.read(&mut byte)).await {
            Err(_timeout) => Ok(None),
            Ok(Ok(0)) => Ok(None),
            Ok(Ok(_)) => {
                let [value] = byte;
                Ok(Some(value))
            }
            Ok(Err(_)) => Err(Error::Serial),
        }
    }
}

/// Transmit half of the console.
pub struct SerialTx {
    tx: BufferedUartTx,
}

impl SerialTx {
    /// Wrap the transmit half of a buffered UART.
    #[must_use]
    pub const fn new(tx: BufferedUartTx) -> Self {
        Self { tx }
    }

    /// Write `line` followed by CR LF.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serial`] if the UART reports a transmit fault.
    pub async fn write_line(&mut self, line: &str) -> Result<()> {
        self.tx
            .write_all(line.as_bytes())
            .await
            .map_err(|_| Error::Serial)?;
        self.tx.write_all(b"\r\n").await.map_err(|_| Error::Serial)
    }
}
