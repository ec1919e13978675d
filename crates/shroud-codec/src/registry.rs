//! Build-time string registration and tape serialization.

use std::io::Write;

use indexmap::IndexMap;
use shroud_core::StringId;
use shroud_tape::{ChunkTape, MAX_CHUNK_LEN};

use crate::error::CodecError;
use crate::MAX_TEXT_LEN;

/// Offsets are 32-bit, so one registry addresses at most this many units.
const OFFSET_SPACE: u64 = 1 << 32;

/// Placement of one registered string on the tape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordEntry {
    /// Tape offset of the record's masked length prefix.
    pub offset: u32,
    /// String length in UTF-16 code units.
    pub len: u16,
}

/// Append-only collector for the encode side.
///
/// Each [`register`](Self::register) call appends one record to the
/// logical tape: a masked length prefix followed by the string's masked
/// UTF-16 code units, keystream-XORed under the caller's seed. The
/// returned [`StringId`] packs the seed with the keystream-masked tape
/// offset and is the only handle a decoder needs besides the tape
/// itself.
///
/// Identifiers are unique across registrations: records under different
/// seeds differ in the seed half, and records under one seed sit at
/// distinct offsets, which distinct masked offsets preserve. Records
/// registered under one seed share a keystream, so their ciphertext
/// differs only where their plaintext does.
///
/// # Examples
///
/// ```
/// use shroud_codec::{decode, StringRegistry};
///
/// let mut registry = StringRegistry::new();
/// let id = registry.register(12345, "Hello, World!")?;
///
/// let tape = registry.into_tape();
/// assert_eq!(decode(id, &tape)?, "Hello, World!");
/// # Ok::<(), shroud_codec::CodecError>(())
/// ```
#[derive(Clone, Debug)]
pub struct StringRegistry {
    /// The logical tape, masked units in registration order.
    units: Vec<u16>,
    /// Identifier to placement, preserving registration order.
    records: IndexMap<StringId, RecordEntry>,
}

impl StringRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            units: Vec::new(),
            records: IndexMap::new(),
        }
    }

    /// Register `text` under `seed` and return its identifier.
    ///
    /// # Errors
    ///
    /// [`CodecError::TooLong`] if the string exceeds [`MAX_TEXT_LEN`]
    /// UTF-16 code units, [`CodecError::TapeFull`] if the record would
    /// push the tape past the 32-bit offset space.
    pub fn register(&mut self, seed: u32, text: &str) -> Result<StringId, CodecError> {
        let units: Vec<u16> = text.encode_utf16().collect();
        if units.len() > MAX_TEXT_LEN {
            return Err(CodecError::TooLong {
                length: units.len(),
            });
        }

        let cursor = self.units.len() as u64;
        let needed = units.len() as u64 + 1;
        check_capacity(cursor, needed)?;

        let (id, state) = StringId::conceal(seed, cursor as u32);
        self.units.reserve(units.len() + 1);

        let mut state = state.advance();
        self.units.push(state.output() ^ units.len() as u16);
        for &unit in &units {
            state = state.advance();
            self.units.push(state.output() ^ unit);
        }

        self.records.insert(
            id,
            RecordEntry {
                offset: cursor as u32,
                len: units.len() as u16,
            },
        );
        Ok(id)
    }

    /// Logical tape length in code units.
    pub fn total_len(&self) -> u64 {
        self.units.len() as u64
    }

    /// Number of segments the serialized tape occupies.
    pub fn chunk_count(&self) -> u32 {
        self.total_len().div_ceil(MAX_CHUNK_LEN as u64) as u32
    }

    /// Number of registered strings.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no strings have been registered.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Registered identifiers and their placements, in registration
    /// order.
    pub fn records(&self) -> impl Iterator<Item = (&StringId, &RecordEntry)> {
        self.records.iter()
    }

    /// Placement of a previously registered identifier.
    pub fn record(&self, id: StringId) -> Option<&RecordEntry> {
        self.records.get(&id)
    }

    /// The tape's segments in order, each at most [`MAX_CHUNK_LEN`]
    /// units.
    pub fn chunks(&self) -> impl Iterator<Item = &[u16]> {
        self.units.chunks(MAX_CHUNK_LEN)
    }

    /// Serialize the tape to flat big-endian bytes.
    ///
    /// No header and no length field: the serialized form is exactly
    /// `2 * total_len` bytes, and the consumer carries the declared
    /// length out of band.
    pub fn to_be_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.units.len() * 2);
        for &unit in &self.units {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        bytes
    }

    /// Stream the serialized tape to a writer, one segment at a time.
    ///
    /// # Errors
    ///
    /// [`CodecError::Io`] if the writer fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), CodecError> {
        let mut buf = Vec::with_capacity(self.units.len().min(MAX_CHUNK_LEN) * 2);
        for chunk in self.chunks() {
            buf.clear();
            for &unit in chunk {
                buf.extend_from_slice(&unit.to_be_bytes());
            }
            writer.write_all(&buf)?;
        }
        Ok(())
    }

    /// Base64 transport form of the serialized tape.
    pub fn to_base64(&self) -> String {
        shroud_tape::encode_base64(&self.to_be_bytes())
    }

    /// Consume the registry into a decodable in-memory tape.
    ///
    /// Skips the serialize and reload cycle for same-process decoding.
    pub fn into_tape(self) -> ChunkTape {
        ChunkTape::from_units(self.units)
    }
}

impl Default for StringRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn check_capacity(cursor: u64, needed: u64) -> Result<(), CodecError> {
    let remaining = OFFSET_SPACE - cursor;
    if needed > remaining {
        return Err(CodecError::TapeFull { needed, remaining });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    // register(12345, "Hello, World!") as the first record.
    const HELLO_TAPE: [u8; 28] = [
        0xda, 0x93, 0x15, 0xdd, 0xfa, 0x62, 0x8b, 0x52, 0x21, 0x6a, 0xc2, 0xba, 0x37, 0x52,
        0x8e, 0x07, 0x13, 0xb1, 0x0d, 0x95, 0xaa, 0x44, 0xdf, 0xbf, 0xf7, 0xe1, 0xd3, 0x1d,
    ];

    #[test]
    fn hello_world_identifier_and_bytes() {
        let mut registry = StringRegistry::new();
        let id = registry.register(12345, "Hello, World!").unwrap();

        assert_eq!(id.to_raw(), 0x1743_f934_0000_3039);
        assert_eq!(registry.total_len(), 14);
        assert_eq!(registry.chunk_count(), 1);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.to_be_bytes(), HELLO_TAPE);
    }

    #[test]
    fn base64_transport_anchor() {
        let mut registry = StringRegistry::new();
        registry.register(12345, "Hello, World!").unwrap();
        assert_eq!(registry.to_base64(), "2pMV3fpii1IhasK6N1KOBxOxDZWqRN+/9+HTHQ==");
    }

    #[test]
    fn repeat_registration_perturbs_only_the_identifier() {
        let mut registry = StringRegistry::new();
        let first = registry.register(12345, "Hello, World!").unwrap();
        let second = registry.register(12345, "Hello, World!").unwrap();

        assert_eq!(first.to_raw(), 0x1743_f934_0000_3039);
        assert_eq!(second.to_raw(), 0x1743_f93a_0000_3039);

        // Same seed, same plaintext: the keystream repeats, so the two
        // record regions are byte-identical.
        let bytes = registry.to_be_bytes();
        assert_eq!(bytes[..28], bytes[28..]);
        assert_eq!(registry.record(first).unwrap().offset, 0);
        assert_eq!(registry.record(second).unwrap().offset, 14);
    }

    #[test]
    fn distinct_seeds_produce_distinct_ciphertext() {
        let mut registry = StringRegistry::new();
        let a = registry.register(12345, "Hello, World!").unwrap();
        let b = registry.register(54321, "Hello, World!").unwrap();

        assert_ne!(a, b);
        let bytes = registry.to_be_bytes();
        assert_ne!(bytes[..28], bytes[28..]);
    }

    #[test]
    fn seed_54321_identifier_anchor() {
        let mut registry = StringRegistry::new();
        let id = registry.register(54321, "Hello, World!").unwrap();
        assert_eq!(id.to_raw(), 0xc5a2_dd65_0000_d431);
    }

    #[test]
    fn empty_string_occupies_one_unit() {
        let mut registry = StringRegistry::new();
        let id = registry.register(12345, "").unwrap();

        assert_eq!(id.to_raw(), 0x1743_f934_0000_3039);
        assert_eq!(registry.total_len(), 1);
        assert_eq!(registry.to_be_bytes(), [0xda, 0x9e]);
        assert_eq!(registry.record(id).unwrap().len, 0);
    }

    #[test]
    fn length_counts_utf16_units_not_chars() {
        let mut registry = StringRegistry::new();
        let id = registry.register(7, "Hé🌍").unwrap();

        assert_eq!(id.to_raw(), 0x7817_1bf6_0000_0007);
        let entry = registry.record(id).unwrap();
        assert_eq!(entry.len as usize, "Hé🌍".encode_utf16().count());
        assert_eq!(entry.len, 4);
        assert_eq!(registry.total_len(), 5);
    }

    #[test]
    fn rejects_strings_over_the_record_limit() {
        let mut registry = StringRegistry::new();

        let at_limit = "x".repeat(MAX_TEXT_LEN);
        assert!(registry.register(1, &at_limit).is_ok());

        let over = "x".repeat(MAX_TEXT_LEN + 1);
        match registry.register(1, &over) {
            Err(CodecError::TooLong { length }) => assert_eq!(length, MAX_TEXT_LEN + 1),
            other => panic!("expected TooLong, got {other:?}"),
        }

        // Surrogate pairs count two units apiece.
        let astral = "🌍".repeat(32_768);
        assert!(matches!(
            registry.register(1, &astral),
            Err(CodecError::TooLong { length: 65_536 })
        ));
    }

    #[test]
    fn capacity_guard_tracks_offset_space() {
        assert!(check_capacity(0, 1).is_ok());
        assert!(check_capacity(OFFSET_SPACE - 3, 3).is_ok());

        match check_capacity(OFFSET_SPACE - 2, 3) {
            Err(CodecError::TapeFull { needed, remaining }) => {
                assert_eq!(needed, 3);
                assert_eq!(remaining, 2);
            }
            other => panic!("expected TapeFull, got {other:?}"),
        }
    }

    #[test]
    fn chunk_count_tracks_segment_boundaries() {
        let mut registry = StringRegistry::new();
        registry.register(42, &"x".repeat(8190)).unwrap();
        assert_eq!(registry.total_len(), 8191);
        assert_eq!(registry.chunk_count(), 1);

        registry.register(42, "y").unwrap();
        assert_eq!(registry.total_len(), 8193);
        assert_eq!(registry.chunk_count(), 2);

        let lens: Vec<usize> = registry.chunks().map(<[u16]>::len).collect();
        assert_eq!(lens, [8191, 2]);
    }

    #[test]
    fn serialized_forms_agree() {
        let mut registry = StringRegistry::new();
        registry.register(9, "one").unwrap();
        registry.register(10, "two").unwrap();

        let bytes = registry.to_be_bytes();
        let mut streamed = Vec::new();
        registry.write_to(&mut streamed).unwrap();
        assert_eq!(streamed, bytes);

        let reloaded = ChunkTape::from_be_bytes(&bytes, registry.total_len()).unwrap();
        assert_eq!(registry.into_tape(), reloaded);
    }

    #[test]
    fn registration_order_is_preserved() {
        let mut registry = StringRegistry::new();
        let ids = [
            registry.register(1, "first").unwrap(),
            registry.register(2, "second").unwrap(),
            registry.register(1, "third").unwrap(),
        ];

        let seen: Vec<StringId> = registry.records().map(|(id, _)| *id).collect();
        assert_eq!(seen, ids);

        let offsets: Vec<u32> = registry.records().map(|(_, entry)| entry.offset).collect();
        assert_eq!(offsets, [0, 6, 13]);
    }

    proptest! {
        #[test]
        fn identifiers_are_unique(seed in any::<u32>(), texts in prop::collection::vec(".{0,40}", 1..30)) {
            let mut registry = StringRegistry::new();
            let mut ids = HashSet::new();
            for text in &texts {
                prop_assert!(ids.insert(registry.register(seed, text).unwrap()));
            }
            prop_assert_eq!(registry.len(), texts.len());
        }
    }
}
