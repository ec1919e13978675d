//! String registry and decoder for the Shroud obfuscation codec.
//!
//! Encode side: [`StringRegistry`] collects strings at build time,
//! masks each one with a seed-derived keystream, and packs all records
//! onto one logical tape. Decode side: [`decode`] recovers a string
//! from its [`StringId`](shroud_core::StringId) and a loaded
//! [`ChunkTape`](shroud_tape::ChunkTape), touching only the units of
//! that one record.
//!
//! The two sides share nothing beyond the tape bytes and the 64-bit
//! identifier, so they can run in different processes or entirely
//! different programs.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod decoder;
pub mod error;
pub mod registry;

pub use decoder::{decode, decode_raw};
pub use error::CodecError;
pub use registry::{RecordEntry, StringRegistry};

/// Longest registrable string, in UTF-16 code units.
///
/// A record's length field is a single masked `u16` on the tape, so
/// lengths above `u16::MAX` cannot be represented.
pub const MAX_TEXT_LEN: usize = 0xFFFF;
