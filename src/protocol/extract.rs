//! Line extraction
//!
//! Frames the unbounded receive stream into `\n`-terminated records.

use heapless::Vec;

use crate::error::{Error, Result};

/// Working buffer holding one record, terminator included
pub type Line<const N: usize> = Vec<u8, N>;

/// Outcome of a successful extraction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Extraction {
    /// Read cursor after the record, modulo ring capacity
    pub next_cursor: usize,
    /// Bytes consumed from the ring, including a skipped leading `\n`
    pub consumed: usize,
}

/// Copy the next terminated line out of a ring
///
/// Scans at most `pending` bytes starting at `cursor`, wrapping at the end
/// of `ring`. A single leading `\n` left over from the previous record's
/// `\r\n` is skipped. On success `line` holds the record including its
/// terminator. If no terminator is found within the pending bytes, `line`
/// is left empty and [`Error::NoTerminatorFound`] is returned; the caller
/// must not advance its cursor.
pub fn extract_line<const N: usize>(
    ring: &[u8; N],
    cursor: usize,
    pending: usize,
    line: &mut Line<N>,
) -> Result<Extraction> {
    line.clear();
    if N == 0 {
        return Err(Error::NoTerminatorFound);
    }

    let cursor = cursor % N;
    let pending = pending.min(N);
    let skip = usize::from(pending > 0 && ring[cursor] == b'\n');

    for offset in skip..pending {
        let byte = ring[(cursor + offset) % N];
        line.push(byte).map_err(|_| Error::Overrun)?;
        if byte == b'\n' {
            let consumed = offset + 1;
            trace!("line {=[u8]:a} ({} bytes)", line.as_slice(), consumed);
            return Ok(Extraction {
                next_cursor: (cursor + consumed) % N,
                consumed,
            });
        }
    }

    line.clear();
    Err(Error::NoTerminatorFound)
}

/// Strip a trailing `\r\n` or `\n` from a record
#[must_use]
pub fn trim_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
