//! Header definitions
//!
//! The fixed-size block that prefixes every request and response.

use std::borrow::Cow;
use std::fmt;

use super::Command;
use crate::error::{CixError, Result};

/// Capacity of the filename field, terminating NUL included
pub const FILENAME_SIZE: usize = 56;

/// A request or response header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Operation or result code
    pub command: Command,

    /// Length of the payload that follows this header on the stream
    pub byte_count: u32,

    /// NUL-padded filename field
    filename: [u8; FILENAME_SIZE],
}

impl Header {
    /// Create a header with no payload and an empty filename
    pub fn new(command: Command) -> Self {
        Self {
            command,
            byte_count: 0,
            filename: [0u8; FILENAME_SIZE],
        }
    }

    /// Create a header naming a file
    ///
    /// Only GET, PUT and RM carry a filename. The name must be non-empty,
    /// free of NUL bytes, and leave room for the terminating NUL inside the
    /// field.
    pub fn with_filename(command: Command, name: &str) -> Result<Self> {
        let invalid = |reason: &'static str| CixError::InvalidFilename {
            name: name.to_string(),
            reason,
        };

        if !command.takes_filename() {
            return Err(invalid("command does not carry a filename"));
        }
        if name.is_empty() {
            return Err(invalid("filename is empty"));
        }
        if name.as_bytes().contains(&0) {
            return Err(invalid("filename contains a NUL byte"));
        }
        if name.len() >= FILENAME_SIZE {
            return Err(invalid("filename does not fit in the header"));
        }

        let mut header = Self::new(command);
        header.filename[..name.len()].copy_from_slice(name.as_bytes());
        Ok(header)
    }

    /// Set the payload length
    pub fn with_byte_count(mut self, byte_count: u32) -> Self {
        self.byte_count = byte_count;
        self
    }

    /// Rebuild a header from decoded fields
    pub(crate) fn from_parts(command: Command, byte_count: u32, filename: [u8; FILENAME_SIZE]) -> Self {
        Self {
            command,
            byte_count,
            filename,
        }
    }

    /// Raw filename field, NUL padding included
    pub fn filename_field(&self) -> &[u8; FILENAME_SIZE] {
        &self.filename
    }

    /// Filename bytes up to the first NUL
    pub fn filename_bytes(&self) -> &[u8] {
        let end = self
            .filename
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(FILENAME_SIZE);
        &self.filename[..end]
    }

    /// Filename as text
    pub fn filename(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.filename_bytes())
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} nbytes={} filename={:?}",
            self.command,
            self.byte_count,
            self.filename()
        )
    }
}
