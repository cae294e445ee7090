//! Protocol Module
//!
//! Defines the wire protocol spoken with the file server.
//!
//! ## Exchange Format
//!
//! Every exchange is one request and one response, each a fixed header
//! optionally followed by a payload of exactly `Len` bytes:
//! ```text
//! ┌──────────┬──────────┬──────────────────┬─────────────────────┐
//! │ Cmd (4)  │ Len (4)  │  Filename (56)   │   Payload (Len)     │
//! └──────────┴──────────┴──────────────────┴─────────────────────┘
//! ```
//!
//! ### Requests
//! - 0x02: GET  - filename set, no payload
//! - 0x04: LS   - no filename, no payload
//! - 0x05: PUT  - filename set, payload: file contents
//! - 0x06: RM   - filename set, no payload
//!
//! ### Responses
//! - 0x07: FILEOUT - payload: file contents
//! - 0x08: LSOUT   - payload: listing text
//! - 0x09: ACK
//! - 0x0A: NAK

mod command;
mod header;
mod codec;

pub use command::Command;
pub use header::{Header, FILENAME_SIZE};
pub use codec::{encode_header, decode_header, HEADER_SIZE};
