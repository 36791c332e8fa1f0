//! Error types for the RYLR998 driver

use core::fmt;

use crate::protocol::ResponseTag;
use crate::types::ErrorCode;

/// Result type for driver operations
pub type Result<T> = core::result::Result<T, Error>;

/// Why the driver stopped processing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HaltReason {
    /// The module answered `+ERR=<code>`
    RadioFault(ErrorCode),
}

impl fmt::Display for HaltReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RadioFault(code) => write!(f, "radio fault (+ERR={})", code.value()),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for HaltReason {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::RadioFault(code) => defmt::write!(f, "RadioFault({})", code.value()),
        }
    }
}

/// Error type for the RYLR998 driver
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// `+RCV` record with a bad field count, unparsable number or a byte
    /// count that does not match the payload
    MalformedRecord,

    /// No line terminator ahead of the read cursor; retry on the next poll
    NoTerminatorFound,

    /// Unread receive bytes were lost and the read cursor was resynchronised
    Overrun,

    /// The module reported `+ERR=<code>`; the driver is now halted
    RadioFault(ErrorCode),

    /// The transport refused or failed to transmit a command
    CommandRejected,

    /// No acknowledgment arrived within the allowed time
    Timeout,

    /// A different acknowledgment arrived than the one awaited
    UnexpectedResponse {
        /// Tag that was awaited
        expected: ResponseTag,
        /// Tag that arrived instead
        received: ResponseTag,
    },

    /// The driver is in its terminal state and refuses further work
    Halted(HaltReason),

    /// Outbound payload does not fit in a single `AT+SEND`
    PayloadTooLong,
}

impl Error {
    /// Whether the error leaves the driver usable
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::RadioFault(_) | Self::Halted(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedRecord => write!(f, "Malformed +RCV record"),
            Self::NoTerminatorFound => write!(f, "No complete line in receive buffer"),
            Self::Overrun => write!(f, "Receive buffer overrun"),
            Self::RadioFault(code) => write!(f, "Radio reported error {}", code.value()),
            Self::CommandRejected => write!(f, "Transport rejected command"),
            Self::Timeout => write!(f, "Timed out waiting for response"),
            Self::UnexpectedResponse { expected, received } => {
                write!(f, "Expected {expected:?}, received {received:?}")
            }
            Self::Halted(reason) => write!(f, "Driver halted: {reason}"),
            Self::PayloadTooLong => write!(f, "Payload too long"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "embedded")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::MalformedRecord => defmt::write!(f, "MalformedRecord"),
            Self::NoTerminatorFound => defmt::write!(f, "NoTerminatorFound"),
            Self::Overrun => defmt::write!(f, "Overrun"),
            Self::RadioFault(code) => defmt::write!(f, "RadioFault({})", code.value()),
            Self::CommandRejected => defmt::write!(f, "CommandRejected"),
            Self::Timeout => defmt::write!(f, "Timeout"),
            Self::UnexpectedResponse { expected, received } => {
                defmt::write!(f, "Unexpected({} != {})", received, expected);
            }
            Self::Halted(reason) => defmt::write!(f, "Halted({})", reason),
            Self::PayloadTooLong => defmt::write!(f, "PayloadTooLong"),
        }
    }
}
