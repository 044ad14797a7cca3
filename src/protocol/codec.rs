//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │ Type (1) │ Len (4)  │         Payload             │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! `Len` is big-endian and counts the whole frame including the 5-byte
//! header, so a received frame's payload size is always `Len - 5`.
//!
//! ### Payload by Request Type
//! - READ (200):         8-byte big-endian key, frame length 13
//! - WRITE-PERMIT (202): 8-byte big-endian key, frame length 13
//! - VALUE (0):          the new value bytes, frame length 5 + value length
//!
//! Replies are read with [`read_reply`], which loops until the exact byte
//! count arrives. A peer close mid-frame surfaces as a transport failure
//! (`UnexpectedEof` from `read_exact`).

use std::io::{Read, Write};

use crate::error::{ClientError, Result};
use super::response::REPLY_TYPE;
use super::{ExchangeStep, Request, ACK_FRAME};

/// Header size: 1 type byte + 4 length bytes
pub const HEADER_SIZE: usize = 5;

/// Keys travel as 8-byte big-endian integers
pub const KEY_SIZE: usize = 8;

/// Maximum accepted reply payload (64 MB)
///
/// Guards the payload allocation against garbage length fields.
pub const MAX_PAYLOAD_SIZE: u32 = 64 * 1024 * 1024;

// =============================================================================
// Request Encoding
// =============================================================================

/// Encode a request to bytes
///
/// Format: type (1) + total_len (4, header included) + payload
pub fn encode_request(request: &Request) -> Vec<u8> {
    let request_type = request.request_type() as u8;

    let payload: &[u8] = match request {
        Request::Read { key } | Request::WritePermit { key } => {
            return encode_keyed_request(request_type, *key);
        }
        Request::Submit { value } => value,
    };

    let total_len = (HEADER_SIZE + payload.len()) as u32;
    let mut frame = Vec::with_capacity(HEADER_SIZE + payload.len());
    frame.push(request_type);
    frame.extend_from_slice(&total_len.to_be_bytes());
    frame.extend_from_slice(payload);

    frame
}

/// Encode a request whose payload is a bare key
fn encode_keyed_request(request_type: u8, key: u64) -> Vec<u8> {
    let total_len = (HEADER_SIZE + KEY_SIZE) as u32;
    let mut frame = Vec::with_capacity(HEADER_SIZE + KEY_SIZE);
    frame.push(request_type);
    frame.extend_from_slice(&total_len.to_be_bytes());
    frame.extend_from_slice(&key.to_be_bytes());

    frame
}

// =============================================================================
// Reply Decoding
// =============================================================================

/// Validate a reply header against the current exchange step
///
/// Returns the payload size (`Len - 5`). The type byte is checked before
/// the length is even looked at, so a wrong-typed reply never triggers a
/// payload read.
pub fn decode_frame_header(header: &[u8; HEADER_SIZE], step: ExchangeStep) -> Result<usize> {
    if header[0] != REPLY_TYPE {
        return Err(ClientError::Protocol(step.violation().to_string()));
    }

    let total_len = u32::from_be_bytes([header[1], header[2], header[3], header[4]]);

    if (total_len as usize) < HEADER_SIZE {
        return Err(ClientError::Protocol(format!(
            "frame length {} shorter than its own header",
            total_len
        )));
    }

    let payload_len = total_len - HEADER_SIZE as u32;
    if payload_len > MAX_PAYLOAD_SIZE {
        return Err(ClientError::Protocol(format!(
            "reply payload too large: {} bytes (max {})",
            payload_len, MAX_PAYLOAD_SIZE
        )));
    }

    Ok(payload_len as usize)
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read one reply from a stream, interpreted per the given exchange step
///
/// Blocks until the full frame is received or the stream errors out.
/// For [`ExchangeStep::Value`] and [`ExchangeStep::Permission`] the returned
/// bytes are the reply payload. [`ExchangeStep::Ack`] is matched wholesale
/// against the fixed 7-byte acknowledgement and returns an empty payload.
pub fn read_reply<R: Read>(reader: &mut R, step: ExchangeStep) -> Result<Vec<u8>> {
    if step == ExchangeStep::Ack {
        let mut ack = [0u8; ACK_FRAME.len()];
        reader.read_exact(&mut ack)?;
        if ack != ACK_FRAME {
            return Err(ClientError::Protocol(step.violation().to_string()));
        }
        return Ok(Vec::new());
    }

    // Read header first
    let mut header = [0u8; HEADER_SIZE];
    reader.read_exact(&mut header)?;

    let payload_len = decode_frame_header(&header, step)?;

    // Read payload
    let mut payload = vec![0u8; payload_len];
    if payload_len > 0 {
        reader.read_exact(&mut payload)?;
    }

    Ok(payload)
}

/// Write a request to a stream
pub fn write_request<W: Write>(writer: &mut W, request: &Request) -> Result<()> {
    let frame = encode_request(request);
    writer.write_all(&frame)?;
    writer.flush()?;
    Ok(())
}
