//! cix Client Binary
//!
//! Connects to a file server and runs the interactive command loop.

use std::io::{self, BufWriter};

use clap::Parser;
use cix::config::{DEFAULT_HOST, DEFAULT_PORT};
use cix::network::Connection;
use cix::{Client, CommandTable, Config, Dispatcher};
use tracing_subscriber::{fmt, EnvFilter};

/// cix client
#[derive(Parser, Debug)]
#[command(name = "cix")]
#[command(about = "Interactive client for a remote file server")]
#[command(version)]
struct Args {
    /// Server host
    #[arg(env = "CIX_SERVER_HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Server port
    #[arg(env = "CIX_SERVER_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Local directory for files sent and received
    #[arg(short, long, default_value = ".")]
    dir: String,

    /// Refuse server payloads larger than this many MB
    #[arg(long)]
    max_payload_mb: Option<u32>,
}

fn main() {
    // Initialize tracing/logging on stderr, away from operator output
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,cix=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("cix v{} starting", cix::VERSION);
    tracing::info!("local host {}", local_hostname());

    let config = Config::builder()
        .host(&args.host)
        .port(args.port)
        .local_dir(&args.dir)
        .max_payload_size(args.max_payload_mb.map(|mb| mb.saturating_mul(1024 * 1024)))
        .build();

    if let Err(e) = run(&config) {
        tracing::error!("{}", e);
    }

    tracing::info!("finishing");
}

fn run(config: &Config) -> cix::Result<()> {
    let connection = Connection::connect(config)?;
    let client = Client::new(connection, config);

    let table = CommandTable::new();
    let stdout = io::stdout();
    let mut dispatcher = Dispatcher::new(&table, client, BufWriter::new(stdout.lock()));

    dispatcher.run(io::stdin().lock())
}

/// Host name of this machine, for the startup log
#[cfg(unix)]
fn local_hostname() -> String {
    nix::unistd::gethostname()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "unknown".to_string())
}

#[cfg(not(unix))]
fn local_hostname() -> String {
    "unknown".to_string()
}
