//! Configuration Tests
//!
//! Validates system configuration constants and the startup radio settings.
//! Run with: cargo test --target x86_64-unknown-linux-gnu --no-default-features --features std --test config_tests

use rylr998_firmware::config::*;
use rylr998_firmware::protocol::{Command, RxRing};
use rylr998_firmware::types::{
    Address, Frequency, NetworkId, OutputPower, Password, RfParameters, WorkMode,
};

// =============================================================================
// Buffer Size Tests
// =============================================================================

#[test]
fn test_rx_buffer_holds_longest_record() {
    // +RCV=65535,240,<240 bytes>,-164,-20\r\n
    let longest = "+RCV=65535,240,".len() + MAX_PAYLOAD_LEN + ",-164,-20\r\n".len();
    assert!(RX_BUFFER_SIZE >= longest);
    assert_eq!(RxRing::<RX_BUFFER_SIZE>::new().capacity(), RX_BUFFER_SIZE);
}

#[test]
fn test_command_buffer_holds_longest_send() {
    let longest = "AT+SEND=65535,240,".len() + MAX_PAYLOAD_LEN + 2;
    assert!(MAX_COMMAND_LEN >= longest);
}

#[test]
fn test_rx_chunk_fits_ring() {
    assert!(RX_CHUNK_SIZE > 0);
    assert!(RX_CHUNK_SIZE <= RX_BUFFER_SIZE);
}

// =============================================================================
// Timing Tests
// =============================================================================

#[test]
fn test_timeouts_ordered() {
    assert!(ACK_TIMEOUT_MS > 0);
    assert!(RESET_TIMEOUT_MS >= ACK_TIMEOUT_MS);
    assert!(FAULT_BLINK_MS > HEARTBEAT_BLINK_MS);
}

#[test]
fn test_sysclk() {
    assert_eq!(SYSCLK_HZ, 16_000_000);
}

// =============================================================================
// Pin Assignment Tests
// =============================================================================

#[test]
fn test_pin_assignments() {
    assert_eq!(pins::LED_STATUS, "PA5");
    assert_eq!(pins::RADIO_TX, "PC4");
    assert_eq!(pins::RADIO_RX, "PC5");
    assert_ne!(dma::RADIO_TX, dma::RADIO_RX);
}

// =============================================================================
// RadioConfig Tests
// =============================================================================

#[test]
fn test_default_radio_config() {
    let cfg = RadioConfig::default();
    assert_eq!(cfg.network_id, NetworkId::DEFAULT);
    assert_eq!(cfg.address, Address::new(1));
    assert_eq!(cfg.parameters, RfParameters::from_codes(9, 7, 1, 12).unwrap());
    assert_eq!(cfg.mode, WorkMode::Transceiver);
    assert_eq!(cfg.baud_rate, None);
    assert_eq!(cfg.frequency, Frequency::from_hz(915_000_000).unwrap());
    assert!(cfg.persist_band);
    assert_eq!(cfg.password, Password::new("FFFFFFFF"));
    assert_eq!(cfg.output_power, OutputPower::MAX);
}

#[test]
fn test_default_frequency_constant() {
    assert_eq!(DEFAULT_FREQUENCY.as_hz(), DEFAULT_FREQUENCY_HZ);
    assert_eq!(DEFAULT_BAUD_RATE, 115_200);
}

#[test]
fn test_default_config_encodes() {
    let cfg = RadioConfig::default();
    let band = Command::Band {
        frequency: cfg.frequency,
        persist: cfg.persist_band,
    };
    assert_eq!(band.encode().unwrap().as_slice(), b"AT+BAND=915000000,M\r\n");
}
