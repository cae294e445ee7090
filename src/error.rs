//! Error types for cix
//!
//! Provides a unified error type for all operations.
//!
//! Only a few kinds end a session: a broken connection, a payload the client
//! refuses to read, or a failure on the operator's own streams. Everything
//! else is reported to the operator and the session carries on.

use std::path::PathBuf;

use thiserror::Error;

use crate::protocol::{Command, Header};

/// Result type alias using CixError
pub type Result<T> = std::result::Result<T, CixError>;

/// Unified error type for cix operations
#[derive(Debug, Error)]
pub enum CixError {
    // -------------------------------------------------------------------------
    // Operator I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Connection Errors
    // -------------------------------------------------------------------------
    #[error("connection error: {context}: {source}")]
    Connection {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("payload too large: server declared {declared} bytes (max {limit})")]
    PayloadTooLarge { declared: u32, limit: u32 },

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("sent {sent}, server did not return {expected}; server returned {received}")]
    ProtocolMismatch {
        sent: Command,
        expected: Command,
        received: Header,
    },

    #[error("NAK received: {filename} {reason}")]
    RemoteRejection {
        filename: String,
        reason: &'static str,
    },

    // -------------------------------------------------------------------------
    // Local Filesystem Errors
    // -------------------------------------------------------------------------
    #[error("{}: {source}", path.display())]
    LocalFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // User Input Errors
    // -------------------------------------------------------------------------
    #[error("invalid filename {name:?}: {reason}")]
    InvalidFilename { name: String, reason: &'static str },

    #[error("{0}")]
    UserInput(String),
}

impl CixError {
    /// Build a connection error from an I/O failure on the peer stream
    pub fn connection(context: impl Into<String>, source: std::io::Error) -> Self {
        CixError::Connection {
            context: context.into(),
            source,
        }
    }

    /// Whether this error ends the session
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CixError::Io(_) | CixError::Connection { .. } | CixError::PayloadTooLarge { .. }
        )
    }
}
