//! Network Module
//!
//! Connection to the file server and exact-length transfers over it.
//!
//! ## Architecture
//! - One blocking connection per session
//! - At most one exchange in flight
//! - Every transfer completes fully or fails the connection

mod transport;
mod connection;

pub use transport::{send_exact, recv_exact};
pub use connection::Connection;
