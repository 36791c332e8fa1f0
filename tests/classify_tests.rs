//! Response Classifier Tests
//!
//! Run with: cargo test --target x86_64-unknown-linux-gnu --no-default-features --features std --test classify_tests

use proptest::prelude::*;
use rylr998_firmware::protocol::{classify, ResponseTag, RESPONSE_TABLE};

// =============================================================================
// Canonical Responses
// =============================================================================

#[test]
fn test_classify_ok() {
    assert_eq!(classify(b"+OK\r\n"), ResponseTag::Ok);
}

#[test]
fn test_classify_legacy_ok() {
    assert_eq!(classify(b"OK+\r\n"), ResponseTag::Ok);
}

#[test]
fn test_classify_ready() {
    assert_eq!(classify(b"+READY\r\n"), ResponseTag::ReadyAfterBoot);
}

#[test]
fn test_classify_factory() {
    assert_eq!(classify(b"+FACTORY\r\n"), ResponseTag::FactoryResetAck);
}

#[test]
fn test_classify_error_report() {
    assert_eq!(classify(b"+ERR=5\r\n"), ResponseTag::ErrorReport);
    assert_eq!(classify(b"+ERR=17\r\n"), ResponseTag::ErrorReport);
}

#[test]
fn test_classify_baud_echo() {
    assert_eq!(classify(b"+IPR=115200\r\n"), ResponseTag::BaudRateEcho);
}

#[test]
fn test_classify_address_echo() {
    assert_eq!(classify(b"+ADDRESS=120\r\n"), ResponseTag::AddressEcho);
    assert_eq!(classify(b"ADDRESS\r\n"), ResponseTag::AddressEcho);
}

#[test]
fn test_classify_inbound_packet() {
    assert_eq!(
        classify(b"+RCV=50,5,HELLO,-99,40\r\n"),
        ResponseTag::InboundPacket
    );
}

// =============================================================================
// Unrecognized Input
// =============================================================================

#[test]
fn test_classify_empty() {
    assert_eq!(classify(b""), ResponseTag::NotRecognized);
}

#[test]
fn test_classify_terminator_qualified_rows_need_terminator() {
    assert_eq!(classify(b"+OK"), ResponseTag::NotRecognized);
    assert_eq!(classify(b"+OKAY\r\n"), ResponseTag::NotRecognized);
    assert_eq!(classify(b"+READY?\r\n"), ResponseTag::NotRecognized);
    assert_eq!(classify(b"+FACTORY=1\r\n"), ResponseTag::NotRecognized);
}

#[test]
fn test_classify_unknown_plus_record() {
    assert_eq!(classify(b"+BAND=915000000\r\n"), ResponseTag::NotRecognized);
    assert_eq!(classify(b"+\r\n"), ResponseTag::NotRecognized);
}

#[test]
fn test_classify_bare_newline() {
    assert_eq!(classify(b"\n"), ResponseTag::NotRecognized);
    assert_eq!(classify(b"\r\n"), ResponseTag::NotRecognized);
}

#[test]
fn test_classify_is_case_sensitive() {
    assert_eq!(classify(b"+ok\r\n"), ResponseTag::NotRecognized);
}

// =============================================================================
// Table Tests
// =============================================================================

#[test]
fn test_table_rows_classify_to_their_tag() {
    for &(prefix, tag) in RESPONSE_TABLE {
        assert_eq!(classify(prefix), tag, "row {prefix:?}");
    }
}

#[test]
fn test_table_covers_every_recognized_tag() {
    for tag in [
        ResponseTag::Ok,
        ResponseTag::AddressEcho,
        ResponseTag::InboundPacket,
        ResponseTag::ReadyAfterBoot,
        ResponseTag::BaudRateEcho,
        ResponseTag::FactoryResetAck,
        ResponseTag::ErrorReport,
    ] {
        assert!(RESPONSE_TABLE.iter().any(|&(_, t)| t == tag), "{tag:?}");
    }
    assert!(RESPONSE_TABLE
        .iter()
        .all(|&(_, t)| t != ResponseTag::NotRecognized));
}

#[test]
fn test_only_inbound_packet_has_payload() {
    assert!(ResponseTag::InboundPacket.has_payload());
    assert!(!ResponseTag::Ok.has_payload());
    assert!(!ResponseTag::ErrorReport.has_payload());
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #[test]
    fn prop_unprefixed_lines_not_recognized(line in "[B-NP-Z0-9 ][ -~]{0,30}\r\n") {
        prop_assert_eq!(classify(line.as_bytes()), ResponseTag::NotRecognized);
    }

    #[test]
    fn prop_rcv_prefix_always_inbound(rest in "[ -~]{0,60}") {
        let line = format!("+RCV={rest}\r\n");
        prop_assert_eq!(classify(line.as_bytes()), ResponseTag::InboundPacket);
    }

    #[test]
    fn prop_classify_is_total(bytes in proptest::collection::vec(any::<u8>(), 0..80)) {
        let _ = classify(&bytes);
    }
}
