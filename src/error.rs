//! Error types for the MeshKV client
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using ClientError
pub type Result<T> = std::result::Result<T, ClientError>;

/// Unified error type for client operations
#[derive(Debug, Error)]
pub enum ClientError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    /// Connection refused/reset, premature close, or socket timeout.
    /// `read_exact` maps a peer close mid-frame to `UnexpectedEof`.
    #[error("transport failure: {0}")]
    Transport(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    /// A received frame's type byte or structure does not match what the
    /// current exchange step requires. Fatal for the operation, never retried.
    #[error("protocol violation: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// True when the failure came from the transport rather than the protocol
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }
}
