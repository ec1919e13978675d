//! String identifiers and the offset-masking scheme.

use std::fmt;

use crate::keystream::KeystreamState;

/// Identifies one obfuscated string record on a tape.
///
/// An identifier is what replaces a string literal in the consuming
/// program: 64 bits packing the keystream seed in the low half and the
/// record's tape offset, XOR-perturbed by the first two keystream
/// outputs, in the high half. The perturbation keeps plain offsets out
/// of the compiled artifact; it is obfuscation, not secrecy.
///
/// [`conceal`](Self::conceal) and [`reveal`](Self::reveal) are the only
/// places the mask is computed, so encode and decode cannot drift apart.
/// [`from_raw`](Self::from_raw) / [`to_raw`](Self::to_raw) convert to and
/// from the packed literal form.
///
/// # Examples
///
/// ```
/// use shroud_core::StringId;
///
/// let (id, _state) = StringId::conceal(12345, 6);
/// assert_eq!(id.seed, 12345);
/// assert_ne!(id.masked_offset, 6);
///
/// let (offset, _state) = StringId::reveal(id);
/// assert_eq!(offset, 6);
///
/// assert_eq!(StringId::from_raw(id.to_raw()), id);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StringId {
    /// Seed the record's keystream is derived from.
    pub seed: u32,
    /// The record's tape offset XORed with the offset mask for `seed`.
    pub masked_offset: u32,
}

impl StringId {
    /// Unpack an identifier from its 64-bit literal form.
    ///
    /// The low 32 bits are the seed, the high 32 bits the masked offset.
    pub fn from_raw(raw: u64) -> Self {
        Self {
            seed: raw as u32,
            masked_offset: (raw >> 32) as u32,
        }
    }

    /// Pack this identifier into its 64-bit literal form.
    pub fn to_raw(self) -> u64 {
        u64::from(self.seed) | (u64::from(self.masked_offset) << 32)
    }

    /// Build the identifier for a record at `offset`, masking the offset.
    ///
    /// Returns the identifier together with the keystream state positioned
    /// after the two mask derivations, ready to mask the record's length
    /// word next.
    pub fn conceal(seed: u32, offset: u32) -> (Self, KeystreamState) {
        let (mask, state) = offset_mask(seed);
        (
            Self {
                seed,
                masked_offset: offset ^ mask,
            },
            state,
        )
    }

    /// Recover the record's true tape offset.
    ///
    /// Returns the offset together with the keystream state positioned
    /// exactly as [`conceal`](Self::conceal) left it, so the caller can
    /// continue the stream to unmask the length word and characters.
    pub fn reveal(self) -> (u32, KeystreamState) {
        let (mask, state) = offset_mask(self.seed);
        (self.masked_offset ^ mask, state)
    }
}

/// Derive the 32-bit offset mask for a seed.
///
/// First advance supplies the low 16 bits, second advance the high 16.
fn offset_mask(seed: u32) -> (u32, KeystreamState) {
    let state = KeystreamState::seed(seed).advance();
    let low = u32::from(state.output());
    let state = state.advance();
    let high = u32::from(state.output()) << 16;
    (low | high, state)
}

impl fmt::Display for StringId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.to_raw())
    }
}

impl From<u64> for StringId {
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}

impl From<StringId> for u64 {
    fn from(id: StringId) -> u64 {
        id.to_raw()
    }
}
