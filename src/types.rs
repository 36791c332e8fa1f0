//! Shared types used across the RYLR998 driver
//!
//! Every AT command parameter gets a newtype whose constructor enforces the
//! range the module firmware accepts, so an out-of-range command cannot be
//! built in the first place.

use core::fmt;

/// Network ID shared by all nodes that should hear each other
///
/// Valid values are 3 to 15 and 18 (the module default).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetworkId(u8);

impl NetworkId {
    /// Factory default network
    pub const DEFAULT: Self = Self(18);

    /// Create a network ID, returns None if the module would reject it
    #[must_use]
    pub const fn new(id: u8) -> Option<Self> {
        match id {
            3..=15 | 18 => Some(Self(id)),
            _ => None,
        }
    }

    /// Get the raw value
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl Default for NetworkId {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Debug for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NetworkId({})", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for NetworkId {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "NET{}", self.0);
    }
}

/// Node address (0 to 65535)
///
/// Address 0 is the broadcast destination for `AT+SEND`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Address(u16);

impl Address {
    /// Broadcast destination
    pub const BROADCAST: Self = Self(0);

    /// Create an address
    #[must_use]
    pub const fn new(addr: u16) -> Self {
        Self(addr)
    }

    /// Get the raw value
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Address {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "@{}", self.0);
    }
}

/// Spreading factor (SF5 to SF11)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpreadingFactor(u8);

impl SpreadingFactor {
    /// Create a spreading factor, returns None outside 5..=11
    #[must_use]
    pub const fn new(sf: u8) -> Option<Self> {
        if sf >= 5 && sf <= 11 {
            Some(Self(sf))
        } else {
            None
        }
    }

    /// Get the raw value
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

/// Signal bandwidth code
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Bandwidth {
    /// 125 kHz
    #[default]
    Khz125,
    /// 250 kHz
    Khz250,
    /// 500 kHz
    Khz500,
}

impl Bandwidth {
    /// Create from the module's numeric code (7, 8 or 9)
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            7 => Some(Self::Khz125),
            8 => Some(Self::Khz250),
            9 => Some(Self::Khz500),
            _ => None,
        }
    }

    /// Numeric code used on the wire
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Khz125 => 7,
            Self::Khz250 => 8,
            Self::Khz500 => 9,
        }
    }

    /// Bandwidth in Hz
    #[must_use]
    pub const fn as_hz(self) -> u32 {
        match self {
            Self::Khz125 => 125_000,
            Self::Khz250 => 250_000,
            Self::Khz500 => 500_000,
        }
    }
}

/// Forward error correction coding rate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CodingRate {
    /// 4/5 (default)
    #[default]
    Cr4_5,
    /// 4/6
    Cr4_6,
    /// 4/7
    Cr4_7,
    /// 4/8
    Cr4_8,
}

impl CodingRate {
    /// Create from the module's numeric code (1 to 4)
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Cr4_5),
            2 => Some(Self::Cr4_6),
            3 => Some(Self::Cr4_7),
            4 => Some(Self::Cr4_8),
            _ => None,
        }
    }

    /// Numeric code used on the wire
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Cr4_5 => 1,
            Self::Cr4_6 => 2,
            Self::Cr4_7 => 3,
            Self::Cr4_8 => 4,
        }
    }
}

/// Programmed preamble length (4 to 25 symbols)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Preamble(u8);

impl Preamble {
    /// Preamble required for any network other than 18
    pub const NETWORK_DEFAULT: Self = Self(12);

    /// Create a preamble length, returns None outside 4..=25
    #[must_use]
    pub const fn new(len: u8) -> Option<Self> {
        if len >= 4 && len <= 25 {
            Some(Self(len))
        } else {
            None
        }
    }

    /// Get the raw value
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

/// RF parameter block sent with `AT+PARAMETER`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RfParameters {
    /// Spreading factor
    pub spreading_factor: SpreadingFactor,
    /// Bandwidth
    pub bandwidth: Bandwidth,
    /// Coding rate
    pub coding_rate: CodingRate,
    /// Preamble length
    pub preamble: Preamble,
}

impl RfParameters {
    /// Build from raw module codes, returns None if any is out of range
    #[must_use]
    pub const fn from_codes(sf: u8, bw: u8, cr: u8, preamble: u8) -> Option<Self> {
        let (Some(spreading_factor), Some(bandwidth), Some(coding_rate), Some(preamble)) = (
            SpreadingFactor::new(sf),
            Bandwidth::from_code(bw),
            CodingRate::from_code(cr),
            Preamble::new(preamble),
        ) else {
            return None;
        };
        Some(Self {
            spreading_factor,
            bandwidth,
            coding_rate,
            preamble,
        })
    }
}

impl Default for RfParameters {
    fn default() -> Self {
        Self {
            spreading_factor: SpreadingFactor(9),
            bandwidth: Bandwidth::Khz125,
            coding_rate: CodingRate::Cr4_5,
            preamble: Preamble::NETWORK_DEFAULT,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for RfParameters {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "SF{} BW{} CR{} P{}",
            self.spreading_factor.value(),
            self.bandwidth.code(),
            self.coding_rate.code(),
            self.preamble.value()
        );
    }
}

/// Interval for the smart receiving power saving mode (30 to 60000 ms)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DutyTime(u16);

impl DutyTime {
    /// Create a duty interval, returns None outside 30..=60000 ms
    #[must_use]
    pub const fn from_ms(ms: u16) -> Option<Self> {
        if ms >= 30 && ms <= 60_000 {
            Some(Self(ms))
        } else {
            None
        }
    }

    /// Get the interval in milliseconds
    #[must_use]
    pub const fn as_ms(self) -> u16 {
        self.0
    }
}

/// Module work mode (`AT+MODE`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum WorkMode {
    /// Always listening, can transmit (default)
    #[default]
    Transceiver,
    /// Sleep until the next UART command
    Sleep,
    /// Alternate between receiving and low-power waiting
    SmartReceive {
        /// Time spent receiving
        rx_time: DutyTime,
        /// Time spent in low-speed wait
        low_speed_time: DutyTime,
    },
}

impl WorkMode {
    /// Numeric code used on the wire
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Transceiver => 0,
            Self::Sleep => 1,
            Self::SmartReceive { .. } => 2,
        }
    }
}

/// UART baud rate supported by `AT+IPR`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BaudRate(u32);

impl BaudRate {
    /// Rates listed in the module's command set
    pub const SUPPORTED: [u32; 9] = [
        300, 1_200, 4_800, 9_600, 19_200, 28_800, 38_400, 57_600, 115_200,
    ];

    /// Module factory default
    pub const DEFAULT: Self = Self(115_200);

    /// Create a baud rate, returns None for rates the module does not offer
    #[must_use]
    pub fn new(baud: u32) -> Option<Self> {
        Self::SUPPORTED.contains(&baud).then_some(Self(baud))
    }

    /// Get the rate in bits per second
    #[must_use]
    pub const fn as_bps(self) -> u32 {
        self.0
    }
}

impl Default for BaudRate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// RF centre frequency in Hz
///
/// The module accepts 862 MHz to 1020 MHz.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Frequency(u32);

impl Frequency {
    /// Minimum supported frequency
    pub const MIN_HZ: u32 = 862_000_000;

    /// Maximum supported frequency
    pub const MAX_HZ: u32 = 1_020_000_000;

    /// Create a new Frequency from Hz, returns None if out of range
    #[must_use]
    pub const fn from_hz(hz: u32) -> Option<Self> {
        if hz >= Self::MIN_HZ && hz <= Self::MAX_HZ {
            Some(Self(hz))
        } else {
            None
        }
    }

    /// Create a new Frequency from kHz
    #[must_use]
    pub const fn from_khz(khz: u32) -> Option<Self> {
        match khz.checked_mul(1000) {
            Some(hz) => Self::from_hz(hz),
            None => None,
        }
    }

    /// Get the frequency in Hz
    #[must_use]
    pub const fn as_hz(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frequency({} Hz)", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Frequency {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} Hz", self.0);
    }
}

/// Domain password set by `AT+CPIN` (8 hex digits)
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Password([u8; 8]);

impl Password {
    /// Create from text, returns None unless it is exactly 8 hex digits
    #[must_use]
    pub fn new(text: &str) -> Option<Self> {
        let bytes: [u8; 8] = text.as_bytes().try_into().ok()?;
        bytes
            .iter()
            .all(u8::is_ascii_hexdigit)
            .then(|| Self(bytes.map(|b| b.to_ascii_uppercase())))
    }

    /// Get the password digits
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(********)")
    }
}

/// RF output power in dBm (0 to 22)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputPower(u8);

impl OutputPower {
    /// Maximum output power (module default)
    pub const MAX: Self = Self(22);

    /// Create an output power, returns None above 22 dBm
    #[must_use]
    pub const fn from_dbm(dbm: u8) -> Option<Self> {
        if dbm <= 22 {
            Some(Self(dbm))
        } else {
            None
        }
    }

    /// Get the power in dBm
    #[must_use]
    pub const fn as_dbm(self) -> u8 {
        self.0
    }
}

impl Default for OutputPower {
    fn default() -> Self {
        Self::MAX
    }
}

/// Numeric code carried by `+ERR=<code>`
///
/// Not interpreted by the driver; kept for the operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ErrorCode(u8);

impl ErrorCode {
    /// Placeholder for an `+ERR=` record whose code did not parse
    pub const UNKNOWN: Self = Self(0);

    /// Wrap a raw code
    #[must_use]
    pub const fn new(code: u8) -> Self {
        Self(code)
    }

    /// Get the raw code
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ErrorCode {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "ERR{}", self.0);
    }
}
