//! Command definitions
//!
//! Command codes carried in every header, for requests and responses alike.

use std::fmt;

/// Command and result codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Error,
    Exit,
    Get,
    Help,
    Ls,
    Put,
    Rm,
    FileOut,
    LsOut,
    Ack,
    Nak,

    /// A code this client does not know. Kept so decoding never fails.
    Unknown(u32),
}

impl Command {
    /// Wire code for this command
    pub fn code(self) -> u32 {
        match self {
            Command::Error => 0,
            Command::Exit => 1,
            Command::Get => 2,
            Command::Help => 3,
            Command::Ls => 4,
            Command::Put => 5,
            Command::Rm => 6,
            Command::FileOut => 7,
            Command::LsOut => 8,
            Command::Ack => 9,
            Command::Nak => 10,
            Command::Unknown(code) => code,
        }
    }

    /// Map a wire code back to a command
    pub fn from_code(code: u32) -> Self {
        match code {
            0 => Command::Error,
            1 => Command::Exit,
            2 => Command::Get,
            3 => Command::Help,
            4 => Command::Ls,
            5 => Command::Put,
            6 => Command::Rm,
            7 => Command::FileOut,
            8 => Command::LsOut,
            9 => Command::Ack,
            10 => Command::Nak,
            other => Command::Unknown(other),
        }
    }

    /// Whether a request with this command names a file
    pub fn takes_filename(self) -> bool {
        matches!(self, Command::Get | Command::Put | Command::Rm)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Command::Error => "ERROR",
            Command::Exit => "EXIT",
            Command::Get => "GET",
            Command::Help => "HELP",
            Command::Ls => "LS",
            Command::Put => "PUT",
            Command::Rm => "RM",
            Command::FileOut => "FILEOUT",
            Command::LsOut => "LSOUT",
            Command::Ack => "ACK",
            Command::Nak => "NAK",
            Command::Unknown(code) => return write!(f, "UNKNOWN(0x{:08x})", code),
        };
        f.write_str(name)
    }
}
