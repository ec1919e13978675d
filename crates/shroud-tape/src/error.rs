//! Error types for tape storage and transport decoding.

use std::fmt;
use std::io;

/// Errors from tape construction, addressing, and transport decoding.
///
/// None of these occur in a correctly built artifact. They exist so a
/// corrupted, truncated, or mismatched tape fails loudly instead of
/// yielding garbage text, and none are transient: every variant signals
/// a permanent build or packaging defect.
#[derive(Debug)]
pub enum TapeError {
    /// A global offset resolves past the tape's declared length, or to a
    /// segment index beyond the available slots.
    OffsetOutOfRange {
        /// The offending global offset.
        offset: u64,
        /// The tape's declared total length in units.
        len: u64,
    },
    /// The addressed segment slot is absent.
    SegmentMissing {
        /// Index of the absent segment.
        segment: usize,
    },
    /// The offset lands inside a segment that is present but shorter
    /// than the addressing arithmetic expects.
    LocalOffsetOutOfRange {
        /// Index of the short segment.
        segment: usize,
        /// Offset within the segment.
        local: usize,
        /// The segment's actual length in units.
        segment_len: usize,
    },
    /// A serialized tape could not be reconstructed (truncated data,
    /// odd byte length, or an inconsistent declared length).
    MalformedBuffer {
        /// Human-readable description of what went wrong.
        detail: String,
    },
    /// Transport input contains a byte outside the 7-bit range.
    InvalidEncoding {
        /// Byte position of the offending input byte.
        position: usize,
        /// The offending byte.
        byte: u8,
    },
    /// An I/O error occurred while streaming a tape.
    Io(io::Error),
}

impl fmt::Display for TapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OffsetOutOfRange { offset, len } => {
                write!(f, "offset {offset} out of range for tape of {len} units")
            }
            Self::SegmentMissing { segment } => {
                write!(f, "tape segment {segment} is missing")
            }
            Self::LocalOffsetOutOfRange {
                segment,
                local,
                segment_len,
            } => {
                write!(
                    f,
                    "local offset {local} out of range for segment {segment} of {segment_len} units"
                )
            }
            Self::MalformedBuffer { detail } => write!(f, "malformed tape buffer: {detail}"),
            Self::InvalidEncoding { position, byte } => {
                write!(
                    f,
                    "invalid transport byte {byte:#04x} at position {position}"
                )
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for TapeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for TapeError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
