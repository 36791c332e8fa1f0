//! Driver session
//!
//! [`Rylr998`] owns the transmit side of the UART and borrows the receive
//! channel that the receive-completion handler fills. All record
//! processing happens on the caller's thread, inside
//! [`Rylr998::poll_and_dispatch`] and the calls built on it.

use embedded_io::{Error as _, Write};

use super::state::DriverState;
use crate::error::{Error, HaltReason, Result};
use crate::protocol::{
    classify, decode, error_code, Command, Decoded, InboundPacket, Line, ResponseTag, RxChannel,
};
use crate::types::ErrorCode;

/// Millisecond time source used for acknowledgment deadlines
pub trait Clock {
    /// Current time in milliseconds; may wrap
    fn now_ms(&self) -> u32;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

/// Record counters since startup
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DriverStats {
    /// Records extracted and classified
    pub records: u32,
    /// `+RCV` records decoded cleanly
    pub packets: u32,
    /// `+RCV` records dropped as malformed
    pub malformed: u32,
    /// Receive overruns
    pub overruns: u32,
    /// Commands written to the transport
    pub commands: u32,
}

/// Driver for one RYLR998 module
pub struct Rylr998<'a, W, C, const N: usize> {
    /// Byte sink towards the module
    tx: W,
    /// Deadline clock
    clock: C,
    /// Receive context shared with the completion handler
    rx: &'a RxChannel<N>,
    /// Working buffer for the current record
    line: Line<N>,
    /// Single packet slot
    packet: Option<InboundPacket>,
    /// Slot holds the packet from the most recent record
    packet_fresh: bool,
    /// Lifecycle state
    state: DriverState,
    /// Counters
    stats: DriverStats,
}

impl<'a, W, C, const N: usize> Rylr998<'a, W, C, N>
where
    W: Write,
    C: Clock,
{
    /// Create a running driver
    pub fn new(tx: W, clock: C, rx: &'a RxChannel<N>) -> Self {
        Self {
            tx,
            clock,
            rx,
            line: Line::new(),
            packet: None,
            packet_fresh: false,
            state: DriverState::Running,
            stats: DriverStats::default(),
        }
    }

    /// Get current state
    #[must_use]
    pub const fn state(&self) -> DriverState {
        self.state
    }

    /// Check if halted
    #[must_use]
    pub const fn is_halted(&self) -> bool {
        self.state.is_halted()
    }

    /// Get record counters
    #[must_use]
    pub const fn stats(&self) -> DriverStats {
        self.stats
    }

    /// Get the transport
    #[must_use]
    pub const fn transport(&self) -> &W {
        &self.tx
    }

    /// Give back the transport and clock
    pub fn release(self) -> (W, C) {
        (self.tx, self.clock)
    }

    /// Packet decoded by the last record processed
    ///
    /// Some only when that record was a well-formed `+RCV`.
    #[must_use]
    pub fn inbound_packet(&self) -> Option<&InboundPacket> {
        self.packet.as_ref().filter(|_| self.packet_fresh)
    }

    /// Process one record if the new-data signal is raised
    ///
    /// Returns `Ok(None)` when the signal is lowered. Otherwise extracts,
    /// classifies and decodes the next record and returns its tag; an
    /// `+ERR` record halts the driver and is still reported as
    /// [`ResponseTag::ErrorReport`]. A malformed `+RCV` is reported as
    /// [`ResponseTag::InboundPacket`] with no packet available. The signal
    /// is re-raised when another complete record is already waiting.
    ///
    /// # Errors
    ///
    /// - [`Error::Halted`] once halted
    /// - [`Error::NoTerminatorFound`] when the signal was raised but no
    ///   complete record is pending yet
    /// - [`Error::Overrun`] when unread bytes were lost
    pub fn poll_and_dispatch(&mut self) -> Result<Option<ResponseTag>> {
        self.state.ensure_running()?;

        let rx = self.rx;
        let signal = rx.signal();
        if !signal.get() {
            return Ok(None);
        }
        signal.clear();

        let result = self.process_next();
        if rx.ring().has_complete_line() {
            signal.set();
        }
        result.map(Some)
    }

    /// Process every complete record currently pending
    ///
    /// Calls `handler` with each tag and, for a clean `+RCV`, the packet.
    /// Stops early after a record that halts the driver. Returns the
    /// number of records handled.
    ///
    /// # Errors
    ///
    /// [`Error::Halted`] if already halted, [`Error::Overrun`] if unread
    /// bytes were lost.
    pub fn drain<F>(&mut self, mut handler: F) -> Result<usize>
    where
        F: FnMut(ResponseTag, Option<&InboundPacket>),
    {
        self.state.ensure_running()?;
        let rx = self.rx;
        rx.signal().clear();

        let ring = rx.ring();
        let mut handled = 0;
        while !self.state.is_halted() && (ring.has_overrun() || ring.has_complete_line()) {
            let tag = self.process_next()?;
            handler(tag, self.inbound_packet());
            handled += 1;
        }
        Ok(handled)
    }

    /// Encode and transmit a command
    ///
    /// # Errors
    ///
    /// [`Error::Halted`] once halted, [`Error::PayloadTooLong`] if the
    /// command does not encode, [`Error::CommandRejected`] if the transport
    /// fails.
    pub fn send(&mut self, command: &Command<'_>) -> Result<()> {
        self.state.ensure_running()?;

        let bytes = command.encode()?;
        self.tx
            .write_all(&bytes)
            .and_then(|()| self.tx.flush())
            .map_err(|err| {
                warn!("tx {=str} failed: {}", command.name(), err.kind());
                Error::CommandRejected
            })?;

        self.stats.commands = self.stats.commands.wrapping_add(1);
        debug!("tx {=[u8]:a}", bytes.as_slice());
        Ok(())
    }

    /// Poll until `expected` arrives or `timeout_ms` elapses
    ///
    /// `+RCV` and unrecognized records arriving in between are processed
    /// and skipped.
    ///
    /// # Errors
    ///
    /// - [`Error::RadioFault`] if `+ERR` arrives; the driver is then halted
    /// - [`Error::UnexpectedResponse`] if another acknowledgment arrives
    /// - [`Error::Timeout`] if nothing matching arrives in time
    /// - [`Error::Halted`] if already halted
    pub fn await_response(&mut self, expected: ResponseTag, timeout_ms: u32) -> Result<()> {
        let start = self.clock.now_ms();
        loop {
            match self.poll_and_dispatch() {
                Ok(Some(ResponseTag::ErrorReport)) => {
                    return Err(self.fault_error());
                }
                Ok(Some(tag)) if tag == expected => return Ok(()),
                Ok(Some(ResponseTag::InboundPacket | ResponseTag::NotRecognized))
                | Ok(None)
                | Err(Error::NoTerminatorFound | Error::Overrun) => {}
                Ok(Some(received)) => {
                    warn!("expected {}, received {}", expected, received);
                    return Err(Error::UnexpectedResponse { expected, received });
                }
                Err(err) => return Err(err),
            }

            if self.clock.now_ms().wrapping_sub(start) >= timeout_ms {
                warn!("no {} within {} ms", expected, timeout_ms);
                return Err(Error::Timeout);
            }
            core::hint::spin_loop();
        }
    }

    /// Send a command and wait for its acknowledgment
    ///
    /// # Errors
    ///
    /// Anything [`Self::send`] or [`Self::await_response`] returns.
    pub fn send_and_await(&mut self, command: &Command<'_>) -> Result<()> {
        self.send(command)?;
        self.await_response(command.expected_ack(), command.timeout_ms())
    }

    fn process_next(&mut self) -> Result<ResponseTag> {
        if let Err(err) = self.rx.ring().read_line(&mut self.line) {
            if err == Error::Overrun {
                self.stats.overruns = self.stats.overruns.wrapping_add(1);
                warn!("rx overrun, resynchronised");
            }
            return Err(err);
        }

        self.packet_fresh = false;
        self.stats.records = self.stats.records.wrapping_add(1);

        let tag = classify(&self.line);
        debug!("rx {}", tag);

        match decode(&self.line, tag) {
            Ok(Decoded::Packet(packet)) => {
                self.packet = Some(packet);
                self.packet_fresh = true;
                self.stats.packets = self.stats.packets.wrapping_add(1);
            }
            Ok(Decoded::Unit) => {}
            Err(err) => {
                self.stats.malformed = self.stats.malformed.wrapping_add(1);
                warn!("dropped record {=[u8]:a}: {}", self.line.as_slice(), err);
            }
        }

        if tag == ResponseTag::ErrorReport {
            let code = error_code(&self.line).unwrap_or(ErrorCode::UNKNOWN);
            self.state = self.state.on_radio_fault(code);
            error!("radio fault {}, halting", code);
        }

        Ok(tag)
    }

    fn fault_error(&self) -> Error {
        match self.state.halt_reason() {
            Some(HaltReason::RadioFault(code)) => Error::RadioFault(code),
            None => Error::RadioFault(ErrorCode::UNKNOWN),
        }
    }
}
