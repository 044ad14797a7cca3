//! Network Module
//!
//! TCP plumbing for talking to a datastore node.
//!
//! ## Architecture
//! - One connection per logical operation
//! - Blocking, buffered I/O
//! - Closed (dropped) on every exit path, success or failure

mod connection;

pub use connection::Connection;
