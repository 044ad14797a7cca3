//! Protocol Module
//!
//! Defines the wire protocol spoken to a MeshKV datastore node.
//!
//! ## Frame Format
//!
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │ Type (1) │ Len (4)  │         Payload             │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! `Len` is big-endian and counts the WHOLE frame, header included:
//! `Len = 5 + payload length`. The payload size of any received frame is
//! therefore `Len - 5`.
//!
//! ### Request Types (client → server)
//! - 200: READ          - Payload: 8-byte big-endian key
//! - 202: WRITE-PERMIT  - Payload: 8-byte big-endian key
//! - 0:   VALUE         - Payload: the new value bytes (second write phase)
//!
//! ### Replies (server → client)
//! Every reply carries type 0. What its payload means depends on which
//! exchange step it answers:
//! - read request       → the value bytes
//! - permission request → the current (old) value bytes
//! - value submission   → the literal 2-byte ack `"ok"`
//!
//! Because the wire byte alone cannot disambiguate, decoding takes an
//! explicit [`ExchangeStep`] naming the reply the client is waiting on.

mod request;
mod response;
mod codec;

pub use request::{Request, RequestType};
pub use response::{ExchangeStep, ACK_FRAME, ACK_PAYLOAD};
pub use codec::{
    encode_request, decode_frame_header, read_reply, write_request, HEADER_SIZE, KEY_SIZE,
    MAX_PAYLOAD_SIZE,
};
