//! Client Module
//!
//! The public entry point: one read and one two-phase write exchange
//! against a single datastore node.
//!
//! ## Sequencing Model
//!
//! Every operation opens its own connection, performs a fixed sequence of
//! blocking sends and receives in strict request/reply order, and releases
//! the connection before returning. The write exchange walks
//!
//! ```text
//! CONNECTING → AWAITING_PERMISSION → PERMISSION_GRANTED
//!            → SENDING_NEW_VALUE → AWAITING_ACK → ACKED
//! ```
//!
//! and the replacement value is never sent before the permission reply has
//! been received in full. Any mismatched reply aborts the exchange; the
//! connection is dropped on every exit path.

use crate::config::Config;
use crate::error::Result;
use crate::network::Connection;
use crate::protocol::{ExchangeStep, Request};

/// A client bound to one datastore node's address
///
/// Holds no connection of its own; each operation owns a transient one.
/// Concurrent operations from independent clients are unordered relative
/// to each other.
pub struct Client {
    /// Node address: bare host/IP or explicit `host:port`
    node: String,

    /// Network configuration
    config: Config,
}

impl Client {
    /// Create a client for the given node with default configuration
    pub fn new(node: impl Into<String>) -> Self {
        Self::with_config(node, Config::default())
    }

    /// Create a client with an explicit configuration
    pub fn with_config(node: impl Into<String>, config: Config) -> Self {
        Self {
            node: node.into(),
            config,
        }
    }

    /// The node address this client talks to
    pub fn node(&self) -> &str {
        &self.node
    }

    /// Read the value stored under `key`
    ///
    /// Returns the raw value bytes, which may be empty or non-UTF8. The
    /// protocol has no missing-key reply; whatever the node answers with
    /// is relayed as-is.
    pub fn read(&self, key: u64) -> Result<Vec<u8>> {
        let mut conn = Connection::open(&self.node, &self.config)?;

        conn.send(&Request::Read { key })?;
        let value = conn.recv(ExchangeStep::Value)?;

        tracing::debug!("Read key {} ({} bytes) from {}", key, value.len(), conn.peer_addr());
        Ok(value)
    }

    /// Replace the value stored under `key`, returning the previous value
    pub fn write(&self, key: u64, new_value: impl Into<Vec<u8>>) -> Result<Vec<u8>> {
        let new_value = new_value.into();
        self.write_with(key, |_| Ok(new_value))
    }

    /// Replace the value stored under `key`, choosing the replacement after
    /// the current value is known
    ///
    /// The permission phase reveals the current value, which is handed to
    /// `supply`; whatever it returns is submitted as the replacement.
    /// `supply` may block (e.g. on interactive input); the connection sits
    /// idle between the two phases, which the protocol permits. Returns the
    /// old value once the node acknowledges the write.
    pub fn write_with<F>(&self, key: u64, supply: F) -> Result<Vec<u8>>
    where
        F: FnOnce(&[u8]) -> Result<Vec<u8>>,
    {
        let mut conn = Connection::open(&self.node, &self.config)?;

        conn.send(&Request::WritePermit { key })?;
        let old_value = conn.recv(ExchangeStep::Permission)?;
        tracing::debug!(
            "Write permission for key {} granted by {} ({} old bytes)",
            key,
            conn.peer_addr(),
            old_value.len()
        );

        let new_value = supply(&old_value)?;

        conn.send(&Request::Submit { value: new_value })?;
        conn.recv(ExchangeStep::Ack)?;

        tracing::debug!("Write for key {} acknowledged by {}", key, conn.peer_addr());
        Ok(old_value)
    }
}
