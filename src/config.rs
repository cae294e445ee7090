//! Configuration for cix
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Default server host when none is given
pub const DEFAULT_HOST: &str = "localhost";

/// Default server port when none is given
pub const DEFAULT_PORT: u16 = 50000;

/// Main configuration for a cix session
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// Server host name or address
    pub host: String,

    /// Server TCP port
    pub port: u16,

    /// Disable Nagle's algorithm on the connection
    pub nodelay: bool,

    // -------------------------------------------------------------------------
    // Protocol Configuration
    // -------------------------------------------------------------------------
    /// Largest payload the client agrees to receive (bytes).
    /// `None` trusts whatever length the server declares.
    pub max_payload_size: Option<u32>,

    // -------------------------------------------------------------------------
    // Filesystem Configuration
    // -------------------------------------------------------------------------
    /// Directory that local filenames for GET and PUT are resolved against
    pub local_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            nodelay: true,
            max_payload_size: None,
            local_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// `host:port` form suitable for `TcpStream::connect`
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the server host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the server port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Enable or disable TCP_NODELAY
    pub fn nodelay(mut self, nodelay: bool) -> Self {
        self.config.nodelay = nodelay;
        self
    }

    /// Cap the payload length accepted from the server (in bytes)
    pub fn max_payload_size(mut self, limit: Option<u32>) -> Self {
        self.config.max_payload_size = limit;
        self
    }

    /// Set the local directory for transferred files
    pub fn local_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.local_dir = path.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
