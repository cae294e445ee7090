//! Client Module
//!
//! Runs one request/response exchange per operator command and applies
//! the local effect of the result.
//!
//! ## Exchange Shape
//! 1. Send the request header (and payload, for PUT)
//! 2. Receive the response header
//! 3. Receive the payload the response header declares, if any
//! 4. Interpret: print a listing, write a file, or report the outcome
//!
//! A response with the wrong command is reported but never tears down the
//! session. Its payload is still read so the next exchange starts on a
//! header boundary.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Component, Path, PathBuf};

use crate::config::Config;
use crate::error::{CixError, Result};
use crate::network::Connection;
use crate::protocol::{Command, Header};

/// A request the client knows how to carry out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// List files on the server
    Ls,

    /// Copy a remote file to the local directory
    Get { filename: String },

    /// Copy a local file to the server
    Put { filename: String },

    /// Remove a file from the server
    Rm { filename: String },
}

impl Request {
    /// The command code this request is sent as
    pub fn command(&self) -> Command {
        match self {
            Request::Ls => Command::Ls,
            Request::Get { .. } => Command::Get,
            Request::Put { .. } => Command::Put,
            Request::Rm { .. } => Command::Rm,
        }
    }
}

/// Protocol client bound to one server connection
pub struct Client<S> {
    /// Connection to the file server
    connection: Connection<S>,

    /// Directory local filenames resolve against
    local_dir: PathBuf,

    /// Largest payload accepted from the server
    max_payload_size: Option<u32>,
}

impl<S: Read + Write> Client<S> {
    /// Create a client over an established connection
    pub fn new(connection: Connection<S>, config: &Config) -> Self {
        Self {
            connection,
            local_dir: config.local_dir.clone(),
            max_payload_size: config.max_payload_size,
        }
    }

    /// Carry out a request, writing its visible result to `out`
    pub fn execute<W: Write>(&mut self, request: &Request, out: &mut W) -> Result<()> {
        match request {
            Request::Ls => self.ls(out),
            Request::Get { filename } => self.get(filename, out),
            Request::Put { filename } => self.put(filename, out),
            Request::Rm { filename } => self.rm(filename, out),
        }
    }

    /// Print the server's file listing
    pub fn ls<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let (response, listing) = self.round_trip(&Header::new(Command::Ls), &[])?;
        if response.command != Command::LsOut {
            return Err(mismatch(Command::Ls, Command::LsOut, response));
        }

        out.write_all(&listing)?;
        out.flush()?;
        Ok(())
    }

    /// Fetch a remote file into the local directory
    pub fn get<W: Write>(&mut self, filename: &str, out: &mut W) -> Result<()> {
        let request = Header::with_filename(Command::Get, filename)?;
        let path = self.local_path(filename)?;
        let (response, contents) = self.round_trip(&request, &[])?;

        match response.command {
            Command::FileOut => {}
            Command::Nak => {
                return Err(CixError::RemoteRejection {
                    filename: filename.to_string(),
                    reason: "does not exist on the server",
                })
            }
            _ => return Err(mismatch(Command::Get, Command::FileOut, response)),
        }

        fs::write(&path, &contents).map_err(|source| CixError::LocalFile { path, source })?;

        writeln!(out, "{} has been retrieved ({} bytes)", filename, contents.len())?;
        Ok(())
    }

    /// Store a local file on the server
    ///
    /// The file is read whole before any traffic. If it cannot be read,
    /// nothing is sent.
    pub fn put<W: Write>(&mut self, filename: &str, out: &mut W) -> Result<()> {
        let request = Header::with_filename(Command::Put, filename)?;

        // Load the whole file before touching the connection
        let path = self.local_path(filename)?;
        let contents = fs::read(&path).map_err(|source| CixError::LocalFile {
            path: path.clone(),
            source,
        })?;
        let byte_count = u32::try_from(contents.len()).map_err(|_| CixError::LocalFile {
            path,
            source: io::Error::new(io::ErrorKind::InvalidInput, "file is too large to send"),
        })?;

        // Header announces the length, contents follow
        let (response, _) = self.round_trip(&request.with_byte_count(byte_count), &contents)?;

        match response.command {
            Command::Ack => {
                writeln!(out, "ACK received: {} has been stored on the server", filename)?;
                Ok(())
            }
            Command::Nak => Err(CixError::RemoteRejection {
                filename: filename.to_string(),
                reason: "could not be stored on the server",
            }),
            _ => Err(mismatch(Command::Put, Command::Ack, response)),
        }
    }

    /// Remove a file from the server
    pub fn rm<W: Write>(&mut self, filename: &str, out: &mut W) -> Result<()> {
        let request = Header::with_filename(Command::Rm, filename)?;
        let (response, _) = self.round_trip(&request, &[])?;

        match response.command {
            Command::Ack => {
                writeln!(out, "ACK received: {} has been removed", filename)?;
                Ok(())
            }
            Command::Nak => Err(CixError::RemoteRejection {
                filename: filename.to_string(),
                reason: "could not be removed from the server",
            }),
            _ => Err(mismatch(Command::Rm, Command::Ack, response)),
        }
    }

    /// Borrow the server connection
    pub fn connection(&self) -> &Connection<S> {
        &self.connection
    }

    /// Give back the server connection
    pub fn into_connection(self) -> Connection<S> {
        self.connection
    }

    /// Send one request and read back the response with its payload
    fn round_trip(&mut self, request: &Header, payload: &[u8]) -> Result<(Header, Vec<u8>)> {
        // Send request
        self.connection.send_header(request)?;
        self.connection.send_payload(payload)?;

        // Read response header
        let response = self.connection.recv_header()?;
        if let Some(limit) = self.max_payload_size {
            if response.byte_count > limit {
                return Err(CixError::PayloadTooLarge {
                    declared: response.byte_count,
                    limit,
                });
            }
        }

        // Read whatever payload it declares, even on a mismatch
        let payload = self.connection.recv_payload(response.byte_count as usize)?;
        Ok((response, payload))
    }

    /// Resolve a filename under the local directory
    ///
    /// Absolute names and `..` components are refused.
    fn local_path(&self, filename: &str) -> Result<PathBuf> {
        let relative = Path::new(filename);
        let contained = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));

        if !contained {
            return Err(CixError::InvalidFilename {
                name: filename.to_string(),
                reason: "filename must stay inside the local directory",
            });
        }
        Ok(self.local_dir.join(relative))
    }
}

fn mismatch(sent: Command, expected: Command, received: Header) -> CixError {
    CixError::ProtocolMismatch {
        sent,
        expected,
        received,
    }
}
