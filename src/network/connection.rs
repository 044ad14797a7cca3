//! Connection Handler
//!
//! A single-operation connection to a datastore node.

use std::io::{BufReader, BufWriter};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::config::Config;
use crate::error::{ClientError, Result};
use crate::protocol::{read_reply, write_request, ExchangeStep, Request};

/// A connection to one datastore node, owned for the lifetime of one
/// read or write exchange
///
/// Dropping the connection closes the underlying stream, so every exit
/// path of an exchange releases the socket.
pub struct Connection {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Open a connection to the given node
    ///
    /// `node` is either a bare host/IP (the config's port is appended) or an
    /// explicit `host:port` pair. Socket timeouts come from the config; an
    /// expired deadline surfaces as a transport failure on the blocked call.
    pub fn open(node: &str, config: &Config) -> Result<Self> {
        let addr = node_addr(node, config.port);
        let stream = connect(&addr, config.connect_timeout_ms)?;

        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| addr.clone());

        // Disable Nagle's algorithm for low latency
        if config.nodelay {
            stream.set_nodelay(true)?;
        }

        if config.read_timeout_ms > 0 {
            stream.set_read_timeout(Some(Duration::from_millis(config.read_timeout_ms)))?;
        }
        if config.write_timeout_ms > 0 {
            stream.set_write_timeout(Some(Duration::from_millis(config.write_timeout_ms)))?;
        }

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        tracing::debug!("Connection established to {}", peer_addr);

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            peer_addr,
        })
    }

    /// Send one request frame
    pub fn send(&mut self, request: &Request) -> Result<()> {
        tracing::trace!("Sending {:?} to {}", request.request_type(), self.peer_addr);
        write_request(&mut self.writer, request)
    }

    /// Receive one reply, interpreted per the given exchange step
    pub fn recv(&mut self, step: ExchangeStep) -> Result<Vec<u8>> {
        let payload = read_reply(&mut self.reader, step)?;
        tracing::trace!(
            "Received {:?} reply from {} ({} payload bytes)",
            step,
            self.peer_addr,
            payload.len()
        );
        Ok(payload)
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

/// Append the well-known port unless the node address already carries one
fn node_addr(node: &str, port: u16) -> String {
    if node.contains(':') {
        node.to_string()
    } else {
        format!("{}:{}", node, port)
    }
}

/// Resolve and connect, honoring the configured connect timeout
fn connect(addr: &str, timeout_ms: u64) -> Result<TcpStream> {
    if timeout_ms == 0 {
        return Ok(TcpStream::connect(addr)?);
    }

    let timeout = Duration::from_millis(timeout_ms);
    let mut last_err: Option<std::io::Error> = None;

    for candidate in addr.to_socket_addrs()? {
        match TcpStream::connect_timeout(&candidate, timeout) {
            Ok(stream) => return Ok(stream),
            Err(e) => last_err = Some(e),
        }
    }

    Err(match last_err {
        Some(e) => ClientError::Transport(e),
        None => ClientError::Config(format!("node address {} resolved to nothing", addr)),
    })
}
