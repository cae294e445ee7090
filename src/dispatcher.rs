//! Command Dispatcher
//!
//! Turns operator lines into client requests.
//!
//! ## States
//! - `Connected`: accepting lines
//! - `Terminated`: reached on `exit`, end of input, or a fatal error
//!
//! Recoverable errors are printed on the operator's output and the session
//! stays `Connected`. Fatal errors move to `Terminated` and propagate.

use std::collections::HashMap;
use std::io::{BufRead, ErrorKind, Read, Write};

use crate::client::{Client, Request};
use crate::error::{CixError, Result};
use crate::protocol::Command;

/// Help summary printed by the `help` verb
pub const HELP_TEXT: &str = "\
exit         - Exit the program.  Equivalent to EOF.
get filename - Copy remote file to local host.
help         - Print help summary.
ls           - List names of files on remote server.
put filename - Copy local file to remote host.
rm filename  - Remove file from remote server.
";

/// Immutable verb → command mapping
#[derive(Debug, Clone)]
pub struct CommandTable {
    verbs: HashMap<&'static str, Command>,
}

impl CommandTable {
    /// Build the standard verb table
    pub fn new() -> Self {
        let verbs = HashMap::from([
            ("exit", Command::Exit),
            ("help", Command::Help),
            ("ls", Command::Ls),
            ("put", Command::Put),
            ("rm", Command::Rm),
            ("get", Command::Get),
        ]);
        Self { verbs }
    }

    /// Look up a verb. Unrecognized verbs map to `Command::Error`.
    pub fn lookup(&self, verb: &str) -> Command {
        self.verbs.get(verb).copied().unwrap_or(Command::Error)
    }
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connected,
    Terminated,
}

/// Reads operator lines and drives the client
pub struct Dispatcher<'t, S, W> {
    table: &'t CommandTable,
    client: Client<S>,
    out: W,
    state: SessionState,
}

impl<'t, S: Read + Write, W: Write> Dispatcher<'t, S, W> {
    pub fn new(table: &'t CommandTable, client: Client<S>, out: W) -> Self {
        Self {
            table,
            client,
            out,
            state: SessionState::Connected,
        }
    }

    /// Current session state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Process lines until `exit`, end of input, or a fatal error
    ///
    /// A line that is not valid UTF-8 is reported and skipped.
    pub fn run<R: BufRead>(&mut self, mut input: R) -> Result<()> {
        let mut buf = Vec::new();

        loop {
            // Read next operator line
            buf.clear();
            let read = match input.read_until(b'\n', &mut buf) {
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.state = SessionState::Terminated;
                    return Err(e.into());
                }
            };
            if read == 0 {
                break;
            }

            // Execute it, or report why it can't be read as a command
            let state = match std::str::from_utf8(&buf) {
                Ok(line) => self.dispatch(line)?,
                Err(_) => self.report(Err(CixError::UserInput(format!(
                    "{}: line is not valid UTF-8",
                    String::from_utf8_lossy(&buf).trim()
                ))))?,
            };
            if state == SessionState::Terminated {
                return Ok(());
            }
        }

        tracing::debug!("end of input");
        self.state = SessionState::Terminated;
        Ok(())
    }

    /// Process a single operator line
    ///
    /// Only fatal errors are returned; everything else is reported on the
    /// operator's output.
    pub fn dispatch(&mut self, line: &str) -> Result<SessionState> {
        if self.state == SessionState::Terminated {
            return Ok(self.state);
        }

        // Split into verb and optional filename
        let mut tokens = line.split_whitespace();
        let Some(verb) = tokens.next() else {
            return Ok(self.state);
        };
        let argument = tokens.next();

        tracing::info!("command {}", line.trim());

        // Execute command
        let outcome = match self.table.lookup(verb) {
            Command::Exit => {
                self.state = SessionState::Terminated;
                return Ok(self.state);
            }
            Command::Help => self.out.write_all(HELP_TEXT.as_bytes()).map_err(CixError::from),
            Command::Ls => self.client.execute(&Request::Ls, &mut self.out),
            command @ (Command::Get | Command::Put | Command::Rm) => {
                Self::request_for(command, verb, argument)
                    .and_then(|request| self.client.execute(&request, &mut self.out))
            }
            _ => Err(CixError::UserInput(format!("{}: invalid command", line.trim()))),
        };

        // Report outcome
        self.report(outcome)
    }

    /// Borrow the operator output
    pub fn output(&self) -> &W {
        &self.out
    }

    /// Borrow the client
    pub fn client(&self) -> &Client<S> {
        &self.client
    }

    fn request_for(command: Command, verb: &str, argument: Option<&str>) -> Result<Request> {
        let filename = argument
            .ok_or_else(|| CixError::UserInput(format!("{}: missing filename", verb)))?
            .to_string();

        match command {
            Command::Get => Ok(Request::Get { filename }),
            Command::Put => Ok(Request::Put { filename }),
            Command::Rm => Ok(Request::Rm { filename }),
            other => Err(CixError::UserInput(format!("{}: not a file command", other))),
        }
    }

    /// Any failure returned from here has already ended the session
    fn report(&mut self, outcome: Result<()>) -> Result<SessionState> {
        let result = match outcome {
            Ok(()) => self.out.flush().map_err(CixError::from),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                tracing::warn!("{}", e);
                writeln!(self.out, "{}", e)
                    .and_then(|()| self.out.flush())
                    .map_err(CixError::from)
            }
        };

        if result.is_err() {
            self.state = SessionState::Terminated;
        }
        result.map(|()| self.state)
    }
}
