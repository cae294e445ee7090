//! Shared test helpers
//!
//! In-memory streams standing in for the server connection, and a small
//! threaded file server for end-to-end sessions.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{self, Cursor, ErrorKind, Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::thread::{self, JoinHandle};

use cix::network::{recv_exact, send_exact, Connection};
use cix::protocol::{decode_header, encode_header, Command, Header, HEADER_SIZE};
use cix::{Client, Config};

// =============================================================================
// Scripted Stream
// =============================================================================

/// Duplex stream that serves canned response bytes and records writes
pub struct MockStream {
    input: Cursor<Vec<u8>>,
    pub written: Vec<u8>,
}

impl MockStream {
    pub fn new(input: Vec<u8>) -> Self {
        Self {
            input: Cursor::new(input),
            written: Vec::new(),
        }
    }

    /// Bytes of canned input the client has consumed so far
    pub fn consumed(&self) -> usize {
        self.input.position() as usize
    }

    /// Decode the header at the start of the written bytes
    pub fn first_written_header(&self) -> Header {
        let block: [u8; HEADER_SIZE] = self.written[..HEADER_SIZE].try_into().unwrap();
        decode_header(&block)
    }
}

impl Read for MockStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.input.read(buf)
    }
}

impl Write for MockStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// =============================================================================
// Misbehaving Streams
// =============================================================================

/// Hands out at most `chunk` bytes per read or write
pub struct ChunkedStream {
    input: Cursor<Vec<u8>>,
    chunk: usize,
    pub written: Vec<u8>,
    pub interrupt_next: bool,
}

impl ChunkedStream {
    pub fn new(input: Vec<u8>, chunk: usize) -> Self {
        Self {
            input: Cursor::new(input),
            chunk,
            written: Vec::new(),
            interrupt_next: false,
        }
    }
}

impl Read for ChunkedStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.interrupt_next {
            self.interrupt_next = false;
            return Err(io::Error::from(ErrorKind::Interrupted));
        }
        let n = buf.len().min(self.chunk);
        self.input.read(&mut buf[..n])
    }
}

impl Write for ChunkedStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.interrupt_next {
            self.interrupt_next = false;
            return Err(io::Error::from(ErrorKind::Interrupted));
        }
        let n = buf.len().min(self.chunk);
        self.written.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Accepts `limit` bytes and then refuses to make progress
pub struct StalledWriter {
    pub limit: usize,
    pub written: Vec<u8>,
}

impl Write for StalledWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = buf.len().min(self.limit - self.written.len());
        self.written.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Stream whose reads fail with a reset after the canned bytes run out
pub struct ResetStream {
    input: Cursor<Vec<u8>>,
}

impl ResetStream {
    pub fn new(input: Vec<u8>) -> Self {
        Self {
            input: Cursor::new(input),
        }
    }
}

impl Read for ResetStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.input.read(buf)? {
            0 => Err(io::Error::from(ErrorKind::ConnectionReset)),
            n => Ok(n),
        }
    }
}

impl Write for ResetStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// =============================================================================
// Builders
// =============================================================================

/// Wire bytes for one response: header followed by its payload
pub fn response(command: Command, payload: &[u8]) -> Vec<u8> {
    let header = Header::new(command).with_byte_count(payload.len() as u32);
    let mut bytes = encode_header(&header).to_vec();
    bytes.extend_from_slice(payload);
    bytes
}

/// Config rooted at a local directory
pub fn config_for(dir: &Path) -> Config {
    Config::builder().local_dir(dir).build()
}

/// Client over a scripted stream
pub fn mock_client(input: Vec<u8>, dir: &Path) -> Client<MockStream> {
    Client::new(Connection::new(MockStream::new(input), "mock"), &config_for(dir))
}

// =============================================================================
// Threaded File Server
// =============================================================================

/// Serve one connection from an in-memory file store until it closes
///
/// Returns the bound port and a handle yielding the final store.
pub fn spawn_file_server() -> (u16, JoinHandle<HashMap<String, Vec<u8>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut files: HashMap<String, Vec<u8>> = HashMap::new();

        loop {
            let mut block = [0u8; HEADER_SIZE];
            if recv_exact(&mut stream, &mut block).is_err() {
                break;
            }
            let request = decode_header(&block);
            let mut payload = vec![0u8; request.byte_count as usize];
            if recv_exact(&mut stream, &mut payload).is_err() {
                break;
            }

            let name = request.filename().into_owned();
            let (command, body) = match request.command {
                Command::Ls => {
                    let mut names: Vec<&String> = files.keys().collect();
                    names.sort();
                    let listing: String = names.iter().map(|n| format!("{}\n", n)).collect();
                    (Command::LsOut, listing.into_bytes())
                }
                Command::Put => {
                    files.insert(name, payload);
                    (Command::Ack, Vec::new())
                }
                Command::Get => match files.get(&name) {
                    Some(contents) => (Command::FileOut, contents.clone()),
                    None => (Command::Nak, Vec::new()),
                },
                Command::Rm => match files.remove(&name) {
                    Some(_) => (Command::Ack, Vec::new()),
                    None => (Command::Nak, Vec::new()),
                },
                _ => (Command::Nak, Vec::new()),
            };

            if send_exact(&mut stream, &response(command, &body)).is_err() {
                break;
            }
        }

        files
    });

    (port, handle)
}
