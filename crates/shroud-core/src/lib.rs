//! Keystream generator and identifier types for the Shroud obfuscation codec.
//!
//! This is the leaf crate with zero dependencies. It defines the two
//! primitives everything else is built from: [`KeystreamState`], the
//! deterministic PRNG whose output sequence masks tape characters, and
//! [`StringId`], the 64-bit identifier that stands in for an obfuscated
//! string literal in the consuming program.
//!
//! Both encode and decode sides derive the same keystream from the same
//! seed, so the bit layout here is load-bearing: any change breaks every
//! previously serialized tape.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod id;
pub mod keystream;

pub use id::StringId;
pub use keystream::KeystreamState;
