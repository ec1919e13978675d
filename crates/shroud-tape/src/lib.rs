//! Chunked character tape storage for the Shroud obfuscation codec.
//!
//! A tape is one contiguous logical sequence of UTF-16 code units holding
//! every obfuscated string record back to back. For storage it is split
//! into fixed-size segments ("chunks") of at most [`MAX_CHUNK_LEN`] units
//! so each serialized piece stays under common resource-size ceilings.
//! The addressing contract still treats the tape as unbroken.
//!
//! # Architecture
//!
//! - [`ChunkTape`] resolves a global offset to `(segment, local)` on every
//!   access and never materializes the joined sequence
//! - [`transport`] is the minimal Base64 layer for tapes shipped as text
//!   resources instead of raw bytes
//! - All loading paths validate against the declared total length; the
//!   serialized form itself carries no header or framing
//!
//! # Serialized form
//!
//! ```text
//! [unit 0: u16 BE] [unit 1: u16 BE] ... [unit total_len-1: u16 BE]
//! ```
//!
//! The total length travels out-of-band, supplied by whatever packaged
//! the tape; the final segment's exact length cannot be recovered from
//! the byte stream alone.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod tape;
pub mod transport;

pub use error::TapeError;
pub use tape::ChunkTape;
pub use transport::{decode_base64, encode_base64};

/// Maximum number of code units per tape segment.
///
/// 8191 units keep a segment's serialized form at 16382 bytes, well
/// under common text/resource size limits.
pub const MAX_CHUNK_LEN: usize = 0x1FFF;
