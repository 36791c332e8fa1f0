//! System configuration and hardware constants
//!
//! Buffer sizes, protocol timing and the radio settings applied at startup
//! are centralized here.

use crate::types::{
    Address, BaudRate, Frequency, NetworkId, OutputPower, Password, RfParameters, WorkMode,
};

/// System clock (HSI16)
pub const SYSCLK_HZ: u32 = 16_000_000;

/// UART receive ring capacity in bytes
///
/// Holds a complete maximum-length `+RCV` record plus the acknowledgment
/// that may follow it.
pub const RX_BUFFER_SIZE: usize = 512;

/// Largest payload the module carries in one `AT+SEND` / `+RCV`
pub const MAX_PAYLOAD_LEN: usize = 240;

/// Outbound command buffer (`AT+SEND=65535,240,` + payload + `\r\n`)
pub const MAX_COMMAND_LEN: usize = 264;

/// UART chunk size handed from the receive task to the ring
pub const RX_CHUNK_SIZE: usize = 64;

/// Default UART baud rate between MCU and module
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Time allowed for a `+OK` style acknowledgment
pub const ACK_TIMEOUT_MS: u32 = 1_000;

/// Time allowed for `+READY` after `AT+RESET`, or `+FACTORY`
pub const RESET_TIMEOUT_MS: u32 = 3_000;

/// Status LED half-period while halted on a radio fault
pub const FAULT_BLINK_MS: u32 = 500;

/// Status LED half-period while running
pub const HEARTBEAT_BLINK_MS: u32 = 100;

/// Default startup frequency (915 MHz ISM)
pub const DEFAULT_FREQUENCY_HZ: u32 = 915_000_000;

/// Default domain password
pub const DEFAULT_PASSWORD: &str = "FFFFFFFF";

/// Pin assignments for GPIO
pub mod pins {
    //! GPIO pin assignments matching the Nucleo-L073RZ wiring

    /// Status LED (LD2)
    pub const LED_STATUS: &str = "PA5";

    /// LPUART1 TX to module RXD
    pub const RADIO_TX: &str = "PC4";

    /// LPUART1 RX from module TXD
    pub const RADIO_RX: &str = "PC5";

    /// Module NRST (active low)
    pub const RADIO_RESET: &str = "PA8";
}

/// DMA channel assignments
pub mod dma {
    //! DMA channels for the radio UART

    /// LPUART1 TX DMA channel
    pub const RADIO_TX: u8 = 2;

    /// LPUART1 RX DMA channel
    pub const RADIO_RX: u8 = 3;
}

/// Radio settings applied by the startup sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RadioConfig {
    /// Network ID
    pub network_id: NetworkId,
    /// This node's address
    pub address: Address,
    /// RF parameter block
    pub parameters: RfParameters,
    /// Work mode
    pub mode: WorkMode,
    /// New UART baud rate, None keeps the current one
    pub baud_rate: Option<BaudRate>,
    /// RF centre frequency
    pub frequency: Frequency,
    /// Store the frequency in module flash
    pub persist_band: bool,
    /// Domain password, None leaves it untouched
    pub password: Option<Password>,
    /// RF output power
    pub output_power: OutputPower,
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self {
            network_id: NetworkId::DEFAULT,
            address: Address::new(1),
            parameters: RfParameters::default(),
            mode: WorkMode::Transceiver,
            baud_rate: None,
            frequency: DEFAULT_FREQUENCY,
            persist_band: true,
            password: Password::new(DEFAULT_PASSWORD),
            output_power: OutputPower::MAX,
        }
    }
}

/// Default startup frequency, checked at compile time
pub const DEFAULT_FREQUENCY: Frequency = match Frequency::from_hz(DEFAULT_FREQUENCY_HZ) {
    Some(freq) => freq,
    None => panic!("DEFAULT_FREQUENCY_HZ outside module band"),
};
