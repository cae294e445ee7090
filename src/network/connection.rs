//! Server Connection
//!
//! Owns the duplex stream to the file server and moves headers and
//! payloads across it.

use std::io::{Read, Write};
use std::net::TcpStream;

use crate::config::Config;
use crate::error::{CixError, Result};
use crate::protocol::{decode_header, encode_header, Header, HEADER_SIZE};

use super::transport::{recv_exact, send_exact};

/// A connected stream to the file server
pub struct Connection<S> {
    /// Duplex byte stream
    stream: S,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection<TcpStream> {
    /// Connect to the server named by the config
    pub fn connect(config: &Config) -> Result<Self> {
        let addr = config.server_addr();
        tracing::info!("connecting to {}", addr);

        let stream = TcpStream::connect(&addr)
            .map_err(|e| CixError::connection(format!("cannot connect to {}", addr), e))?;

        if config.nodelay {
            stream
                .set_nodelay(true)
                .map_err(|e| CixError::connection("cannot set TCP_NODELAY", e))?;
        }

        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| addr.clone());

        match stream.local_addr() {
            Ok(local) => tracing::info!("connected to {} from {}", peer_addr, local),
            Err(_) => tracing::info!("connected to {}", peer_addr),
        }
        Ok(Self::new(stream, peer_addr))
    }
}

impl<S> Connection<S> {
    /// Wrap an already-connected stream
    pub fn new(stream: S, peer_addr: impl Into<String>) -> Self {
        Self {
            stream,
            peer_addr: peer_addr.into(),
        }
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }

    /// Borrow the underlying stream
    pub fn get_ref(&self) -> &S {
        &self.stream
    }
}

impl<S: Read + Write> Connection<S> {
    /// Send one header block
    pub fn send_header(&mut self, header: &Header) -> Result<()> {
        tracing::debug!("sending header {}", header);
        send_exact(&mut self.stream, &encode_header(header))
    }

    /// Send a payload that a header has already announced
    pub fn send_payload(&mut self, payload: &[u8]) -> Result<()> {
        if payload.is_empty() {
            return Ok(());
        }
        tracing::debug!("sending {} bytes", payload.len());
        send_exact(&mut self.stream, payload)
    }

    /// Receive one header block
    pub fn recv_header(&mut self) -> Result<Header> {
        let mut block = [0u8; HEADER_SIZE];
        recv_exact(&mut self.stream, &mut block)?;

        let header = decode_header(&block);
        tracing::debug!("received header {}", header);
        Ok(header)
    }

    /// Receive exactly `len` payload bytes
    ///
    /// The buffer is sized to `len` before reading begins.
    pub fn recv_payload(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut payload = vec![0u8; len];
        if len > 0 {
            recv_exact(&mut self.stream, &mut payload)?;
        }
        tracing::debug!("received {} bytes", len);
        Ok(payload)
    }
}
