//! Identifier-driven string recovery from a loaded tape.

use smallvec::SmallVec;

use shroud_core::StringId;
use shroud_tape::ChunkTape;

use crate::error::CodecError;

/// Most recovered strings fit this buffer without a heap allocation.
const INLINE_UNITS: usize = 64;

/// Recover the string a registry encoded under `id`.
///
/// Reveals the tape offset from the identifier, unmasks the length
/// prefix, then unmasks exactly that many code units. Only the record's
/// own units are touched, so decoding cost is proportional to the one
/// string and never to the tape.
///
/// # Errors
///
/// [`CodecError::Tape`] if any required unit is outside the tape or in
/// an absent segment, [`CodecError::MalformedRecord`] if the unmasked
/// units are not valid UTF-16. Both indicate a mismatched identifier,
/// a truncated tape, or corruption in transit.
///
/// # Examples
///
/// ```
/// use shroud_codec::{decode, StringRegistry};
///
/// let mut registry = StringRegistry::new();
/// let id = registry.register(12345, "Hello, World!")?;
/// let tape = registry.into_tape();
///
/// assert_eq!(decode(id, &tape)?, "Hello, World!");
/// # Ok::<(), shroud_codec::CodecError>(())
/// ```
pub fn decode(id: StringId, tape: &ChunkTape) -> Result<String, CodecError> {
    let (offset, state) = id.reveal();
    let offset = u64::from(offset);

    let mut state = state.advance();
    let len = state.output() ^ tape.unit_at(offset)?;

    let mut units: SmallVec<[u16; INLINE_UNITS]> = SmallVec::with_capacity(len as usize);
    for i in 0..u64::from(len) {
        state = state.advance();
        units.push(state.output() ^ tape.unit_at(offset + 1 + i)?);
    }

    String::from_utf16(&units).map_err(|e| CodecError::MalformedRecord {
        detail: e.to_string(),
    })
}

/// [`decode`] for callers holding the identifier in its packed form.
///
/// Generated call sites embed the identifier as a single 64-bit
/// literal; this accepts the literal directly.
pub fn decode_raw(raw: u64, tape: &ChunkTape) -> Result<String, CodecError> {
    decode(StringId::from_raw(raw), tape)
}
