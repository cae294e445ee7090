//! Framed Transport
//!
//! All-or-nothing transfer of an exact byte count over a blocking stream.

use std::io::{self, ErrorKind, Read, Write};

use crate::error::{CixError, Result};

/// Write every byte of `buf` to the stream
///
/// Re-issues the write until the buffer is drained. A write that makes no
/// progress or reports an error fails the whole transfer.
pub fn send_exact<W: Write + ?Sized>(stream: &mut W, buf: &[u8]) -> Result<()> {
    let total = buf.len();
    let mut sent = 0;

    while sent < total {
        match stream.write(&buf[sent..]) {
            Ok(0) => {
                return Err(CixError::connection(
                    format!("peer stopped accepting data after {} of {} bytes", sent, total),
                    io::Error::from(ErrorKind::WriteZero),
                ));
            }
            Ok(n) => {
                sent += n;
                tracing::trace!("sent {} bytes ({}/{})", n, sent, total);
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(CixError::connection(
                    format!("send failed after {} of {} bytes", sent, total),
                    e,
                ));
            }
        }
    }

    stream
        .flush()
        .map_err(|e| CixError::connection("flush failed", e))
}

/// Fill `buf` completely from the stream
///
/// End of stream before the buffer is full fails the whole transfer.
pub fn recv_exact<R: Read + ?Sized>(stream: &mut R, buf: &mut [u8]) -> Result<()> {
    let total = buf.len();
    let mut received = 0;

    while received < total {
        match stream.read(&mut buf[received..]) {
            Ok(0) => {
                return Err(CixError::connection(
                    format!("peer closed the connection after {} of {} bytes", received, total),
                    io::Error::from(ErrorKind::UnexpectedEof),
                ));
            }
            Ok(n) => {
                received += n;
                tracing::trace!("received {} bytes ({}/{})", n, received, total);
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(CixError::connection(
                    format!("receive failed after {} of {} bytes", received, total),
                    e,
                ));
            }
        }
    }

    Ok(())
}
