//! Codec Tests
//!
//! Byte-level tests for request encoding and reply decoding.

use std::io::{Cursor, Read};

use meshkv_client::error::ClientError;
use meshkv_client::protocol::{
    decode_frame_header, encode_request, read_reply, ExchangeStep, Request, ACK_FRAME,
    HEADER_SIZE, KEY_SIZE,
};

// =============================================================================
// Request Encoding Tests
// =============================================================================

#[test]
fn test_encode_read_request() {
    let frame = encode_request(&Request::Read { key: 42 });

    assert_eq!(frame.len(), 13);
    assert_eq!(frame[0], 200);
    assert_eq!(&frame[1..5], &13u32.to_be_bytes());
    assert_eq!(&frame[5..13], &42u64.to_be_bytes());
}

#[test]
fn test_encode_write_permit_request() {
    let frame = encode_request(&Request::WritePermit { key: 7 });

    assert_eq!(frame.len(), 13);
    assert_eq!(frame[0], 202);
    assert_eq!(&frame[1..5], &13u32.to_be_bytes());
    assert_eq!(&frame[5..13], &7u64.to_be_bytes());
}

#[test]
fn test_encode_submit_request() {
    let frame = encode_request(&Request::Submit {
        value: b"new".to_vec(),
    });

    assert_eq!(frame.len(), 8);
    assert_eq!(frame[0], 0);
    assert_eq!(&frame[1..5], &8u32.to_be_bytes());
    assert_eq!(&frame[5..], b"new");
}

#[test]
fn test_encode_submit_empty_value() {
    let frame = encode_request(&Request::Submit { value: vec![] });

    assert_eq!(frame.len(), HEADER_SIZE);
    assert_eq!(frame[0], 0);
    assert_eq!(&frame[1..5], &5u32.to_be_bytes());
}

#[test]
fn test_key_encoding_round_trips() {
    // Frame length counts the header, so the key sits at bytes 5..13
    for key in [0u64, 1, 42, u64::MAX - 1, u64::MAX] {
        let frame = encode_request(&Request::Read { key });
        let mut raw = [0u8; KEY_SIZE];
        raw.copy_from_slice(&frame[HEADER_SIZE..HEADER_SIZE + KEY_SIZE]);
        assert_eq!(u64::from_be_bytes(raw), key);
    }
}

// =============================================================================
// Reply Header Decoding Tests
// =============================================================================

#[test]
fn test_decode_header_payload_size() {
    // Total length 8 = 5-byte header + 3-byte payload
    let header = [0u8, 0, 0, 0, 8];
    let payload_len = decode_frame_header(&header, ExchangeStep::Value).unwrap();
    assert_eq!(payload_len, 3);
}

#[test]
fn test_decode_header_empty_payload() {
    let header = [0u8, 0, 0, 0, 5];
    let payload_len = decode_frame_header(&header, ExchangeStep::Permission).unwrap();
    assert_eq!(payload_len, 0);
}

#[test]
fn test_decode_header_rejects_wrong_type_for_read() {
    let header = [1u8, 0, 0, 0, 8];
    let err = decode_frame_header(&header, ExchangeStep::Value).unwrap_err();

    match err {
        ClientError::Protocol(msg) => assert_eq!(msg, "unexpected response message type"),
        other => panic!("expected protocol violation, got {:?}", other),
    }
}

#[test]
fn test_decode_header_rejects_wrong_type_for_permission() {
    let header = [200u8, 0, 0, 0, 8];
    let err = decode_frame_header(&header, ExchangeStep::Permission).unwrap_err();

    match err {
        ClientError::Protocol(msg) => assert_eq!(msg, "malformed permission"),
        other => panic!("expected protocol violation, got {:?}", other),
    }
}

#[test]
fn test_decode_header_rejects_undersized_length() {
    // Length 4 cannot even cover the header itself
    let header = [0u8, 0, 0, 0, 4];
    let err = decode_frame_header(&header, ExchangeStep::Value).unwrap_err();
    assert!(matches!(err, ClientError::Protocol(_)));
}

#[test]
fn test_decode_header_rejects_oversized_length() {
    let header = [0u8, 0xFF, 0xFF, 0xFF, 0xFF];
    let err = decode_frame_header(&header, ExchangeStep::Value).unwrap_err();
    assert!(matches!(err, ClientError::Protocol(_)));
}

// =============================================================================
// Stream Reply Tests
// =============================================================================

#[test]
fn test_read_reply_value() {
    // The concrete frame from the read exchange: length 8 = 5 + 3
    let mut stream = Cursor::new(vec![0u8, 0, 0, 0, 8, 0x41, 0x42, 0x43]);
    let value = read_reply(&mut stream, ExchangeStep::Value).unwrap();
    assert_eq!(value, b"ABC");
}

#[test]
fn test_read_reply_empty_value() {
    let mut stream = Cursor::new(vec![0u8, 0, 0, 0, 5]);
    let value = read_reply(&mut stream, ExchangeStep::Value).unwrap();
    assert!(value.is_empty());
}

#[test]
fn test_read_reply_binary_value() {
    let payload: Vec<u8> = vec![0x00, 0xFF, 0xFE, 0x80, 0x01];
    let mut frame = vec![0u8];
    frame.extend_from_slice(&(5 + payload.len() as u32).to_be_bytes());
    frame.extend_from_slice(&payload);

    let mut stream = Cursor::new(frame);
    let value = read_reply(&mut stream, ExchangeStep::Value).unwrap();
    assert_eq!(value, payload);
}

#[test]
fn test_read_reply_wrong_type_stops_at_header() {
    // A payload follows, but the type mismatch must fail before touching it
    let mut stream = Cursor::new(vec![1u8, 0, 0, 0, 8, 0x41, 0x42, 0x43]);
    let err = read_reply(&mut stream, ExchangeStep::Value).unwrap_err();

    assert!(matches!(err, ClientError::Protocol(_)));
    assert_eq!(stream.position(), HEADER_SIZE as u64);
}

#[test]
fn test_read_reply_truncated_payload_is_transport_failure() {
    // Header promises 10 payload bytes, stream ends after 2
    let mut stream = Cursor::new(vec![0u8, 0, 0, 0, 15, 0xAA, 0xBB]);
    let err = read_reply(&mut stream, ExchangeStep::Value).unwrap_err();
    assert!(err.is_transport());
}

// =============================================================================
// Acknowledgement Tests
// =============================================================================

#[test]
fn test_read_reply_ack_matches_fixed_frame() {
    let mut stream = Cursor::new(ACK_FRAME.to_vec());
    let payload = read_reply(&mut stream, ExchangeStep::Ack).unwrap();
    assert!(payload.is_empty());
}

#[test]
fn test_read_reply_ack_rejects_wrong_bytes() {
    // Right shape, wrong trailing characters
    let mut stream = Cursor::new(vec![0u8, 0, 0, 0, 7, b'n', b'o']);
    let err = read_reply(&mut stream, ExchangeStep::Ack).unwrap_err();

    match err {
        ClientError::Protocol(msg) => assert_eq!(msg, "malformed ack response"),
        other => panic!("expected protocol violation, got {:?}", other),
    }
}

#[test]
fn test_read_reply_ack_rejects_wrong_length_field() {
    let mut stream = Cursor::new(vec![0u8, 0, 0, 0, 9, b'o', b'k']);
    let err = read_reply(&mut stream, ExchangeStep::Ack).unwrap_err();
    assert!(matches!(err, ClientError::Protocol(_)));
}

#[test]
fn test_read_reply_ack_truncated_is_transport_failure() {
    let mut stream = Cursor::new(vec![0u8, 0, 0]);
    let err = read_reply(&mut stream, ExchangeStep::Ack).unwrap_err();
    assert!(err.is_transport());
}

#[test]
fn test_ack_frame_constant_shape() {
    assert_eq!(ACK_FRAME, [0, 0, 0, 0, 7, b'o', b'k']);
}

// =============================================================================
// Short Read Handling
// =============================================================================

/// Reader that hands out one byte per call, like a badly segmented socket
struct TrickleReader {
    data: Vec<u8>,
    pos: usize,
}

impl Read for TrickleReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if self.pos >= self.data.len() || buf.is_empty() {
            return Ok(0);
        }
        buf[0] = self.data[self.pos];
        self.pos += 1;
        Ok(1)
    }
}

#[test]
fn test_read_reply_survives_short_reads() {
    let mut stream = TrickleReader {
        data: vec![0u8, 0, 0, 0, 8, 0x41, 0x42, 0x43],
        pos: 0,
    };
    let value = read_reply(&mut stream, ExchangeStep::Value).unwrap();
    assert_eq!(value, b"ABC");
}
