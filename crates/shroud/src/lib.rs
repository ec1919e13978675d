//! Shroud: a string obfuscation codec for build-time registration and
//! runtime recovery.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all Shroud sub-crates. For most users, adding `shroud` as a
//! single dependency is sufficient.
//!
//! A build step registers every string literal with a
//! [`StringRegistry`](codec::StringRegistry), which masks the text
//! under a seeded keystream and hands back a 64-bit
//! [`StringId`](types::StringId). The masked units land on a chunked
//! tape, shipped beside the program as big-endian bytes or Base64
//! text. At runtime, [`decode`](codec::decode) reverses the masking
//! for one identifier at a time; the plaintext never exists outside
//! that call's return value.
//!
//! # Quick start
//!
//! ```rust
//! use shroud::prelude::*;
//!
//! // Build time: register literals, keep the ids, ship the tape.
//! let mut registry = StringRegistry::new();
//! let greeting = registry.register(12345, "Hello, World!")?;
//! let farewell = registry.register(12345, "Goodbye!")?;
//! let total_len = registry.total_len();
//! let transport = registry.to_base64();
//!
//! // Run time: load the tape once, decode ids on demand.
//! let tape = ChunkTape::from_base64(&transport, total_len)?;
//! assert_eq!(decode(greeting, &tape)?, "Hello, World!");
//! assert_eq!(decode(farewell, &tape)?, "Goodbye!");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for items not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `shroud-core` | Keystream generator and identifier packing |
//! | [`tape`] | `shroud-tape` | Chunked tape, loaders, Base64 transport |
//! | [`codec`] | `shroud-codec` | String registry and decoder |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Keystream generator and identifier packing (`shroud-core`).
///
/// [`types::KeystreamState`] is the deterministic mask source;
/// [`types::StringId`] packs a seed with a masked tape offset.
pub use shroud_core as types;

/// Chunked tape storage and transport decoding (`shroud-tape`).
///
/// [`tape::ChunkTape`] holds the masked units; its constructors cover
/// flat buffers, readers, per-segment parts, and Base64 text.
pub use shroud_tape as tape;

/// String registry and decoder (`shroud-codec`).
///
/// [`codec::StringRegistry`] is the encode side,
/// [`codec::decode`] / [`codec::decode_raw`] the decode side.
pub use shroud_codec as codec;

/// Common imports for typical Shroud usage.
///
/// ```rust
/// use shroud::prelude::*;
/// ```
///
/// This imports the registry, decoder, tape, identifier types, and
/// their error enums.
pub mod prelude {
    // Keystream and identifiers
    pub use shroud_core::{KeystreamState, StringId};

    // Tape and transport
    pub use shroud_tape::{decode_base64, encode_base64, ChunkTape, TapeError, MAX_CHUNK_LEN};

    // Registry and decoder
    pub use shroud_codec::{
        decode, decode_raw, CodecError, RecordEntry, StringRegistry, MAX_TEXT_LEN,
    };
}
