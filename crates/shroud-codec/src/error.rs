//! Error types for registration, serialization, and decoding.

use std::error::Error;
use std::fmt;
use std::io;

use shroud_tape::TapeError;

/// Errors produced by the encode and decode paths.
#[derive(Debug)]
pub enum CodecError {
    /// The string's UTF-16 form exceeds the representable record length.
    TooLong {
        /// Length of the rejected string in code units.
        length: usize,
    },
    /// The registry's 32-bit offset space cannot fit another record.
    TapeFull {
        /// Units the record would occupy, length prefix included.
        needed: u64,
        /// Units still addressable before the offset space runs out.
        remaining: u64,
    },
    /// Unmasked units do not form valid UTF-16.
    MalformedRecord {
        /// What was wrong with the recovered units.
        detail: String,
    },
    /// The tape rejected an access or failed to load.
    Tape(TapeError),
    /// An underlying I/O operation failed.
    Io(io::Error),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLong { length } => write!(
                f,
                "string of {length} UTF-16 units exceeds the {}-unit record limit",
                crate::MAX_TEXT_LEN
            ),
            Self::TapeFull { needed, remaining } => write!(
                f,
                "record of {needed} units does not fit in the {remaining} units of offset space left"
            ),
            Self::MalformedRecord { detail } => write!(f, "malformed record: {detail}"),
            Self::Tape(e) => write!(f, "tape error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Tape(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TapeError> for CodecError {
    fn from(e: TapeError) -> Self {
        Self::Tape(e)
    }
}

impl From<io::Error> for CodecError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
