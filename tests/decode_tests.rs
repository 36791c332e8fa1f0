//! Record Decoder Tests
//!
//! Tests for `+RCV` decoding and `+ERR` code extraction.
//! Run with: cargo test --target x86_64-unknown-linux-gnu --no-default-features --features std --test decode_tests

use proptest::prelude::*;
use rylr998_firmware::config::MAX_PAYLOAD_LEN;
use rylr998_firmware::protocol::{decode, error_code, Decoded, InboundPacket, ResponseTag};
use rylr998_firmware::types::{Address, ErrorCode};
use rylr998_firmware::Error;

fn decode_packet(line: &[u8]) -> Result<InboundPacket, Error> {
    match decode(line, ResponseTag::InboundPacket)? {
        Decoded::Packet(packet) => Ok(packet),
        Decoded::Unit => panic!("+RCV decoded to unit"),
    }
}

// =============================================================================
// Well-formed Records
// =============================================================================

#[test]
fn test_decode_hello() {
    let packet = decode_packet(b"+RCV=50,5,HELLO,-99,40\r\n").unwrap();
    assert_eq!(packet.id, Address::new(50));
    assert_eq!(packet.byte_count, 5);
    assert_eq!(packet.payload(), b"HELLO");
    assert_eq!(packet.rssi, -99);
    assert_eq!(packet.snr, 40);
}

#[test]
fn test_decode_zero_length_payload() {
    let packet = decode_packet(b"+RCV=3,0,,-40,11\r\n").unwrap();
    assert_eq!(packet.byte_count, 0);
    assert!(packet.data.is_empty());
    assert_eq!(packet.rssi, -40);
}

#[test]
fn test_decode_payload_with_commas() {
    let packet = decode_packet(b"+RCV=7,5,A,B,C,-40,11\r\n").unwrap();
    assert_eq!(packet.payload(), b"A,B,C");
    assert_eq!(packet.snr, 11);
}

#[test]
fn test_decode_payload_with_equals() {
    let packet = decode_packet(b"+RCV=7,3,a=b,-1,0\r\n").unwrap();
    assert_eq!(packet.payload(), b"a=b");
}

#[test]
fn test_decode_without_terminator() {
    let packet = decode_packet(b"+RCV=1,2,HI,-20,9").unwrap();
    assert_eq!(packet.payload(), b"HI");
}

#[test]
fn test_decode_max_values() {
    let packet = decode_packet(b"+RCV=65535,1,X,-164,255\r\n").unwrap();
    assert_eq!(packet.id, Address::new(65535));
    assert_eq!(packet.rssi, -164);
    assert_eq!(packet.snr, 255);
}

#[test]
fn test_decode_max_payload() {
    let data = [b'Z'; MAX_PAYLOAD_LEN];
    let mut line = format!("+RCV=9,{MAX_PAYLOAD_LEN},").into_bytes();
    line.extend_from_slice(&data);
    line.extend_from_slice(b",-30,8\r\n");
    let packet = decode_packet(&line).unwrap();
    assert_eq!(packet.payload(), &data[..]);
}

// =============================================================================
// Malformed Records
// =============================================================================

#[test]
fn test_decode_count_exceeds_line() {
    assert_eq!(
        decode_packet(b"+RCV=50,9,HI,-99,40\r\n"),
        Err(Error::MalformedRecord)
    );
}

#[test]
fn test_decode_count_shorter_than_payload() {
    assert_eq!(
        decode_packet(b"+RCV=50,3,HELLO,-99,40\r\n"),
        Err(Error::MalformedRecord)
    );
}

#[test]
fn test_decode_too_few_fields() {
    assert_eq!(
        decode_packet(b"+RCV=50,5,HELLO\r\n"),
        Err(Error::MalformedRecord)
    );
    assert_eq!(
        decode_packet(b"+RCV=50,5,HELLO,-99\r\n"),
        Err(Error::MalformedRecord)
    );
    assert_eq!(decode_packet(b"+RCV=\r\n"), Err(Error::MalformedRecord));
    assert_eq!(decode_packet(b"+RCV\r\n"), Err(Error::MalformedRecord));
}

#[test]
fn test_decode_too_many_fields() {
    assert_eq!(
        decode_packet(b"+RCV=50,5,HELLO,-99,40,1\r\n"),
        Err(Error::MalformedRecord)
    );
}

#[test]
fn test_decode_non_numeric_fields() {
    assert_eq!(
        decode_packet(b"+RCV=abc,2,HI,-99,40\r\n"),
        Err(Error::MalformedRecord)
    );
    assert_eq!(
        decode_packet(b"+RCV=1,x,HI,-99,40\r\n"),
        Err(Error::MalformedRecord)
    );
    assert_eq!(
        decode_packet(b"+RCV=1,2,HI,loud,40\r\n"),
        Err(Error::MalformedRecord)
    );
    assert_eq!(
        decode_packet(b"+RCV=1,2,HI,-99,\r\n"),
        Err(Error::MalformedRecord)
    );
}

#[test]
fn test_decode_out_of_range_fields() {
    assert_eq!(
        decode_packet(b"+RCV=65536,2,HI,-99,40\r\n"),
        Err(Error::MalformedRecord)
    );
    // SNR is unsigned
    assert_eq!(
        decode_packet(b"+RCV=1,2,HI,-99,-3\r\n"),
        Err(Error::MalformedRecord)
    );
}

#[test]
fn test_decode_payload_longer_than_module_limit() {
    let mut line = b"+RCV=1,241,".to_vec();
    line.extend_from_slice(&[b'a'; 241]);
    line.extend_from_slice(b",-10,5\r\n");
    assert_eq!(decode_packet(&line), Err(Error::MalformedRecord));
}

// =============================================================================
// Fixed-shape Tags
// =============================================================================

#[test]
fn test_fixed_shape_tags_decode_to_unit() {
    for (line, tag) in [
        (&b"+OK\r\n"[..], ResponseTag::Ok),
        (&b"+READY\r\n"[..], ResponseTag::ReadyAfterBoot),
        (&b"+ERR=5\r\n"[..], ResponseTag::ErrorReport),
        (&b"+IPR=9600\r\n"[..], ResponseTag::BaudRateEcho),
        (&b"garbage\r\n"[..], ResponseTag::NotRecognized),
    ] {
        assert_eq!(decode(line, tag), Ok(Decoded::Unit));
    }
}

#[test]
fn test_error_code_extraction() {
    assert_eq!(error_code(b"+ERR=5\r\n"), Some(ErrorCode::new(5)));
    assert_eq!(error_code(b"+ERR=17\r\n"), Some(ErrorCode::new(17)));
    assert_eq!(error_code(b"+ERR=\r\n"), None);
    assert_eq!(error_code(b"+ERR=x\r\n"), None);
    assert_eq!(error_code(b"+OK\r\n"), None);
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #[test]
    fn prop_decode_round_trip(
        id in any::<u16>(),
        data in "[ -~]{0,240}",
        rssi in -164i16..=0,
        snr in any::<u8>(),
    ) {
        let line = format!("+RCV={id},{},{data},{rssi},{snr}\r\n", data.len());
        let packet = decode_packet(line.as_bytes()).unwrap();
        prop_assert_eq!(packet.id, Address::new(id));
        prop_assert_eq!(packet.byte_count, data.len());
        prop_assert_eq!(packet.payload(), data.as_bytes());
        prop_assert_eq!(packet.rssi, rssi);
        prop_assert_eq!(packet.snr, snr);
    }

    #[test]
    fn prop_overlong_count_is_malformed(data in "[A-Z]{0,20}", extra in 1usize..50) {
        let line = format!("+RCV=1,{},{data},-10,5\r\n", data.len() + extra + 8);
        prop_assert_eq!(decode_packet(line.as_bytes()), Err(Error::MalformedRecord));
    }
}
