//! # cix
//!
//! A remote file-access client with:
//! - One persistent connection to a file server
//! - A fixed 64-byte header protocol with length-prefixed payloads
//! - Exact-length, all-or-nothing transfers
//! - An interactive command loop (`ls`, `get`, `put`, `rm`)
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Operator Input                            │
//! │                 (one command per line)                       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  Command Dispatcher                          │
//! │              (Connected / Terminated)                        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Client                                 │
//! │            (one exchange per request)                        │
//! └──────────┬──────────────────────────────┬───────────────────┘
//!            │                              │
//!            ▼                              ▼
//!   ┌─────────────────┐            ┌─────────────────┐
//!   │  Header Codec   │            │ Local Files /   │
//!   │   (protocol)    │            │ Operator Output │
//!   └────────┬────────┘            └─────────────────┘
//!            │
//!            ▼
//!   ┌─────────────────┐
//!   │ Framed Transport│
//!   │   (network)     │
//!   └─────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod client;
pub mod dispatcher;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{CixError, Result};
pub use config::Config;
pub use client::{Client, Request};
pub use dispatcher::{CommandTable, Dispatcher, SessionState};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of cix
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
