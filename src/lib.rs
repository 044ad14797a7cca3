//! # MeshKV Client
//!
//! A synchronous TCP client for the MeshKV distributed key-value store:
//! - Binary wire protocol with self-describing frames
//! - `READ` by 64-bit key
//! - Two-phase `WRITE` (permission handshake, then value submission)
//! - One connection per operation, blocking I/O
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     CLI / Caller                             │
//! │        (key, optional new value, node address)               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Client                                 │
//! │          (read / write exchange sequencing)                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  Protocol   │          │ Connection  │
//!   │  (framing)  │          │ (TcpStream) │
//!   └─────────────┘          └──────┬──────┘
//!                                   │
//!                                   ▼
//!                           ┌─────────────┐
//!                           │ MeshKV node │
//!                           │ (port 52525)│
//!                           └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ClientError, Result};
pub use config::Config;
pub use client::Client;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the MeshKV client
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
