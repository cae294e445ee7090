//! Protocol codec
//!
//! Encoding and decoding functions for the wire header.
//!
//! ## Wire Format
//!
//! ```text
//! ┌──────────┬──────────┬──────────────────────────────┐
//! │ Cmd (4)  │ Len (4)  │       Filename (56)          │
//! └──────────┴──────────┴──────────────────────────────┘
//! ```
//!
//! Both integers are big-endian. The filename is NUL-padded.

use bytes::{Buf, BufMut};

use super::header::FILENAME_SIZE;
use super::{Command, Header};

/// Header size: 4 bytes command + 4 bytes length + filename field
pub const HEADER_SIZE: usize = 8 + FILENAME_SIZE;

/// Encode a header to its fixed-size wire block
pub fn encode_header(header: &Header) -> [u8; HEADER_SIZE] {
    let mut block = [0u8; HEADER_SIZE];
    let mut dst = &mut block[..];

    dst.put_u32(header.command.code());
    dst.put_u32(header.byte_count);
    dst.put_slice(header.filename_field());

    block
}

/// Decode a header from its fixed-size wire block
///
/// Never fails: unknown command codes are kept as `Command::Unknown`.
pub fn decode_header(block: &[u8; HEADER_SIZE]) -> Header {
    let mut src = &block[..];

    let command = Command::from_code(src.get_u32());
    let byte_count = src.get_u32();

    let mut filename = [0u8; FILENAME_SIZE];
    src.copy_to_slice(&mut filename);

    Header::from_parts(command, byte_count, filename)
}
