//! AT command encoding
//!
//! Commands take validated parameter types, so every command that can be
//! built is one the module accepts. Encoding only fails when the output
//! does not fit the command buffer.

use core::fmt::Write as _;

use heapless::{String, Vec};

use super::classify::ResponseTag;
use super::TERMINATOR;
use crate::config::{ACK_TIMEOUT_MS, MAX_COMMAND_LEN, MAX_PAYLOAD_LEN, RESET_TIMEOUT_MS};
use crate::error::{Error, Result};
use crate::types::{
    Address, BaudRate, Frequency, NetworkId, OutputPower, Password, RfParameters, WorkMode,
};

/// Encoded command bytes, terminator included
pub type CommandBuffer = Vec<u8, MAX_COMMAND_LEN>;

/// Outbound AT command
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command<'a> {
    /// `AT` link check
    Test,
    /// Transmit a payload to an address (0 broadcasts)
    Send {
        /// Destination
        address: Address,
        /// Payload, at most [`MAX_PAYLOAD_LEN`] bytes
        data: &'a [u8],
    },
    /// Set the network ID
    NetworkId(NetworkId),
    /// Set this node's address
    Address(Address),
    /// Set the RF parameter block
    Parameter(RfParameters),
    /// Software reset
    Reset,
    /// Set the work mode
    Mode(WorkMode),
    /// Change the UART baud rate
    BaudRate(BaudRate),
    /// Set the RF frequency, optionally stored in flash
    Band {
        /// Centre frequency
        frequency: Frequency,
        /// Store in module flash
        persist: bool,
    },
    /// Set the domain password
    Password(Password),
    /// Set the RF output power
    OutputPower(OutputPower),
    /// Restore factory settings
    Factory,
}

impl Command<'_> {
    /// Acknowledgment the module sends on success
    #[must_use]
    pub const fn expected_ack(&self) -> ResponseTag {
        match self {
            Self::Reset => ResponseTag::ReadyAfterBoot,
            Self::Factory => ResponseTag::FactoryResetAck,
            Self::BaudRate(_) => ResponseTag::BaudRateEcho,
            _ => ResponseTag::Ok,
        }
    }

    /// Time allowed for the acknowledgment
    #[must_use]
    pub const fn timeout_ms(&self) -> u32 {
        match self {
            Self::Reset | Self::Factory => RESET_TIMEOUT_MS,
            _ => ACK_TIMEOUT_MS,
        }
    }

    /// Short mnemonic for logging
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Test => "AT",
            Self::Send { .. } => "SEND",
            Self::NetworkId(_) => "NETWORKID",
            Self::Address(_) => "ADDRESS",
            Self::Parameter(_) => "PARAMETER",
            Self::Reset => "RESET",
            Self::Mode(_) => "MODE",
            Self::BaudRate(_) => "IPR",
            Self::Band { .. } => "BAND",
            Self::Password(_) => "CPIN",
            Self::OutputPower(_) => "CRFOP",
            Self::Factory => "FACTORY",
        }
    }

    /// Encode as `AT+<NAME>[=<params>]\r\n`
    ///
    /// # Errors
    ///
    /// [`Error::PayloadTooLong`] if a `Send` payload exceeds
    /// [`MAX_PAYLOAD_LEN`] or the command does not fit [`CommandBuffer`].
    pub fn encode(&self) -> Result<CommandBuffer> {
        let mut header: String<MAX_COMMAND_LEN> = String::new();
        let mut payload: &[u8] = &[];

        match *self {
            Self::Test => write!(header, "AT"),
            Self::Send { address, data } => {
                if data.len() > MAX_PAYLOAD_LEN {
                    return Err(Error::PayloadTooLong);
                }
                payload = data;
                write!(header, "AT+SEND={},{},", address.value(), data.len())
            }
            Self::NetworkId(id) => write!(header, "AT+NETWORKID={}", id.value()),
            Self::Address(addr) => write!(header, "AT+ADDRESS={}", addr.value()),
            Self::Parameter(p) => write!(
                header,
                "AT+PARAMETER={},{},{},{}",
                p.spreading_factor.value(),
                p.bandwidth.code(),
                p.coding_rate.code(),
                p.preamble.value()
            ),
            Self::Reset => write!(header, "AT+RESET"),
            Self::Mode(WorkMode::SmartReceive {
                rx_time,
                low_speed_time,
            }) => write!(
                header,
                "AT+MODE=2,{},{}",
                rx_time.as_ms(),
                low_speed_time.as_ms()
            ),
            Self::Mode(mode) => write!(header, "AT+MODE={}", mode.code()),
            Self::BaudRate(baud) => write!(header, "AT+IPR={}", baud.as_bps()),
            Self::Band { frequency, persist } => {
                let suffix = if persist { ",M" } else { "" };
                write!(header, "AT+BAND={}{suffix}", frequency.as_hz())
            }
            Self::Password(pw) => header
                .push_str("AT+CPIN=")
                .and_then(|()| {
                    pw.as_bytes()
                        .iter()
                        .try_for_each(|&b| header.push(char::from(b)))
                })
                .map_err(|()| core::fmt::Error),
            Self::OutputPower(power) => write!(header, "AT+CRFOP={}", power.as_dbm()),
            Self::Factory => write!(header, "AT+FACTORY"),
        }
        .map_err(|_| Error::PayloadTooLong)?;

        let mut buf = CommandBuffer::new();
        buf.extend_from_slice(header.as_bytes())
            .and_then(|()| buf.extend_from_slice(payload))
            .and_then(|()| buf.extend_from_slice(TERMINATOR))
            .map_err(|()| Error::PayloadTooLong)?;
        Ok(buf)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Command<'_> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Send { address, data } => {
                defmt::write!(f, "SEND to {} ({} bytes)", address, data.len());
            }
            other => defmt::write!(f, "{=str}", other.name()),
        }
    }
}
