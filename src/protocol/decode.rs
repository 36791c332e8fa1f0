//! Record decoding
//!
//! Only `+RCV` carries a structured payload:
//!
//! ```text
//! +RCV=<id>,<byte_count>,<data>,<rssi>,<snr>\r\n
//! ```
//!
//! The data field is taken by byte count rather than by splitting on commas,
//! so payload bytes are never truncated at an embedded delimiter.

use core::str::FromStr;

use heapless::Vec;

use super::classify::ResponseTag;
use super::extract::trim_terminator;
use crate::config::MAX_PAYLOAD_LEN;
use crate::error::{Error, Result};
use crate::types::{Address, ErrorCode};

/// Packet received over the air and reported by `+RCV`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InboundPacket {
    /// Sender address
    pub id: Address,
    /// Declared payload length
    pub byte_count: usize,
    /// Payload bytes, exactly `byte_count` long
    pub data: Vec<u8, MAX_PAYLOAD_LEN>,
    /// Received signal strength in dBm
    pub rssi: i16,
    /// Signal-to-noise ratio
    pub snr: u8,
}

impl InboundPacket {
    /// Payload as a slice
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for InboundPacket {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "RCV from {} [{}] {=[u8]:a} rssi={} snr={}",
            self.id,
            self.byte_count,
            self.data.as_slice(),
            self.rssi,
            self.snr
        );
    }
}

/// Value produced by [`decode`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decoded {
    /// Fixed-shape record, nothing to extract
    Unit,
    /// Decoded `+RCV` record
    Packet(InboundPacket),
}

/// Decode a classified record
///
/// Tags other than [`ResponseTag::InboundPacket`] yield [`Decoded::Unit`].
///
/// # Errors
///
/// [`Error::MalformedRecord`] if an `+RCV` record has fewer than five
/// fields, a numeric field fails to parse, or the byte count runs past the
/// end of the line or exceeds [`MAX_PAYLOAD_LEN`].
pub fn decode(line: &[u8], tag: ResponseTag) -> Result<Decoded> {
    match tag {
        ResponseTag::InboundPacket => decode_packet(line).map(Decoded::Packet),
        _ => Ok(Decoded::Unit),
    }
}

fn decode_packet(line: &[u8]) -> Result<InboundPacket> {
    let body = trim_terminator(line);
    let (_, rest) = split_once(body, b'=').ok_or(Error::MalformedRecord)?;

    let (id, rest) = split_once(rest, b',').ok_or(Error::MalformedRecord)?;
    let (count, rest) = split_once(rest, b',').ok_or(Error::MalformedRecord)?;
    let id: u16 = parse_field(id)?;
    let byte_count: usize = parse_field(count)?;

    if byte_count > rest.len() {
        return Err(Error::MalformedRecord);
    }
    let (payload, rest) = rest.split_at(byte_count);
    let rest = rest.strip_prefix(b",").ok_or(Error::MalformedRecord)?;

    let (rssi, snr) = split_once(rest, b',').ok_or(Error::MalformedRecord)?;
    if snr.contains(&b',') {
        return Err(Error::MalformedRecord);
    }
    let rssi: i16 = parse_field(rssi)?;
    let snr: u8 = parse_field(snr)?;

    let data = Vec::from_slice(payload).map_err(|()| Error::MalformedRecord)?;

    Ok(InboundPacket {
        id: Address::new(id),
        byte_count,
        data,
        rssi,
        snr,
    })
}

/// Code carried by an `+ERR=<code>` record
///
/// Returns None when the record is not an error report or the code does
/// not parse.
#[must_use]
pub fn error_code(line: &[u8]) -> Option<ErrorCode> {
    let code = trim_terminator(line).strip_prefix(b"+ERR=")?;
    parse_field::<u8>(code).ok().map(ErrorCode::new)
}

fn split_once(bytes: &[u8], delimiter: u8) -> Option<(&[u8], &[u8])> {
    let pos = bytes.iter().position(|&b| b == delimiter)?;
    Some((&bytes[..pos], &bytes[pos + 1..]))
}

fn parse_field<T: FromStr>(field: &[u8]) -> Result<T> {
    core::str::from_utf8(field)
        .ok()
        .and_then(|text| text.parse().ok())
        .ok_or(Error::MalformedRecord)
}
