//! RYLR998 AT-command protocol
//!
//! Turns the raw UART receive stream into typed responses and typed
//! commands into wire bytes:
//!
//! - [`ring`]: receive ring shared with the receive-completion handler
//! - [`extract`]: splits the stream into `\n`-terminated records
//! - [`classify`]: maps each record to a [`ResponseTag`]
//! - [`decode`]: expands `+RCV` records into an [`InboundPacket`]
//! - [`command`]: encodes outbound `AT+...` commands

pub mod classify;
pub mod command;
pub mod decode;
pub mod extract;
pub mod ring;

pub use classify::{classify, ResponseTag, RESPONSE_TABLE};
pub use command::{Command, CommandBuffer};
pub use decode::{decode, error_code, Decoded, InboundPacket};
pub use extract::{extract_line, trim_terminator, Extraction, Line};
pub use ring::{RxChannel, RxRing};

/// Record terminator sent by the module
pub const TERMINATOR: &[u8] = b"\r\n";
