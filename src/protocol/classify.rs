//! Response classification
//!
//! Every record coming back from the module maps to exactly one
//! [`ResponseTag`]. The mapping lives in a single prefix table, checked in
//! order; the first matching row wins.

/// Closed set of response classes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResponseTag {
    /// Command accepted (`+OK`)
    Ok,
    /// Address echo
    AddressEcho,
    /// Unsolicited radio packet (`+RCV=...`)
    InboundPacket,
    /// Module finished booting (`+READY`)
    ReadyAfterBoot,
    /// Baud rate echo (`+IPR=...`)
    BaudRateEcho,
    /// Factory reset done (`+FACTORY`)
    FactoryResetAck,
    /// Module error (`+ERR=<code>`)
    ErrorReport,
    /// Anything else
    NotRecognized,
}

impl ResponseTag {
    /// Whether this record carries a structured payload
    #[must_use]
    pub const fn has_payload(self) -> bool {
        matches!(self, Self::InboundPacket)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ResponseTag {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Ok => defmt::write!(f, "OK"),
            Self::AddressEcho => defmt::write!(f, "ADDRESS"),
            Self::InboundPacket => defmt::write!(f, "RCV"),
            Self::ReadyAfterBoot => defmt::write!(f, "READY"),
            Self::BaudRateEcho => defmt::write!(f, "IPR"),
            Self::FactoryResetAck => defmt::write!(f, "FACTORY"),
            Self::ErrorReport => defmt::write!(f, "ERR"),
            Self::NotRecognized => defmt::write!(f, "?"),
        }
    }
}

/// Authoritative prefix table, in match priority order
///
/// Terminator-qualified rows include the `\r\n` so that, for example,
/// `+OK` does not match `+OKAY`. Legacy firmware forms (`OK+`, bare
/// `ADDRESS`) sit next to the documented ones.
pub const RESPONSE_TABLE: &[(&[u8], ResponseTag)] = &[
    (b"+OK\r\n", ResponseTag::Ok),
    (b"OK+\r\n", ResponseTag::Ok),
    (b"+ADDRESS=", ResponseTag::AddressEcho),
    (b"ADDRESS\r\n", ResponseTag::AddressEcho),
    (b"+RCV=", ResponseTag::InboundPacket),
    (b"+READY\r\n", ResponseTag::ReadyAfterBoot),
    (b"+ERR=", ResponseTag::ErrorReport),
    (b"+FACTORY\r\n", ResponseTag::FactoryResetAck),
    (b"+IPR=", ResponseTag::BaudRateEcho),
];

/// Classify one record
///
/// Pure and total: lines matching no table row are
/// [`ResponseTag::NotRecognized`].
#[must_use]
pub fn classify(line: &[u8]) -> ResponseTag {
    RESPONSE_TABLE
        .iter()
        .find(|(prefix, _)| line.starts_with(prefix))
        .map_or(ResponseTag::NotRecognized, |&(_, tag)| tag)
}
