//! Radio UART
//!
//! LPUART1 split into a blocking byte sink for the driver and a DMA
//! receiver that feeds the shared [`RxChannel`] from interrupt priority.

use embassy_stm32::mode::Async;
use embassy_stm32::usart::{self, UartRx, UartTx};
use embedded_io::{ErrorKind, ErrorType, Write};

use crate::config::RX_CHUNK_SIZE;
use crate::protocol::RxChannel;

/// Transmit half of the radio UART
pub struct RadioTx<'d> {
    uart: UartTx<'d, Async>,
}

impl<'d> RadioTx<'d> {
    /// Wrap the transmit half
    #[must_use]
    pub fn new(uart: UartTx<'d, Async>) -> Self {
        Self { uart }
    }
}

impl ErrorType for RadioTx<'_> {
    type Error = ErrorKind;
}

impl Write for RadioTx<'_> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.uart.blocking_write(buf).map_err(map_error)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.uart.blocking_flush().map_err(map_error)
    }
}

fn map_error(err: usart::Error) -> ErrorKind {
    match err {
        usart::Error::Overrun => ErrorKind::OutOfMemory,
        usart::Error::BufferTooLong => ErrorKind::InvalidInput,
        _ => ErrorKind::Other,
    }
}

/// Receive half of the radio UART
pub struct RadioRx<'d> {
    uart: UartRx<'d, Async>,
}

impl<'d> RadioRx<'d> {
    /// Wrap the receive half
    #[must_use]
    pub fn new(uart: UartRx<'d, Async>) -> Self {
        Self { uart }
    }

    /// Move received bytes into `channel` forever
    ///
    /// Each idle-line or full-chunk completion is handed to
    /// [`RxChannel::on_receive`]. Line errors drop the chunk in flight.
    pub async fn pump<const N: usize>(&mut self, channel: &RxChannel<N>) -> ! {
        let mut chunk = [0u8; RX_CHUNK_SIZE];
        loop {
            match self.uart.read_until_idle(&mut chunk).await {
                Ok(len) => channel.on_receive(&chunk[..len]),
                Err(err) => defmt::warn!("radio uart rx error: {}", err),
            }
        }
    }
}
