//! Deterministic keystream generation.
//!
//! The generator is a two-stage construction. [`KeystreamState::seed`] maps
//! a 32-bit external seed into the state space with a SplitMix-style
//! multiply/xor/shift avalanche, and [`KeystreamState::advance`] steps the
//! state with a xoroshiro-family round over two 16-bit lanes. Each advanced
//! state carries one 16-bit output word, extracted by
//! [`KeystreamState::output`] and XORed against one tape character.
//!
//! All arithmetic is fixed-width and wrapping, so the sequence produced
//! from a given seed is identical on every platform and every run. That
//! property is the whole contract: a tape masked at build time must
//! unmask bit-for-bit at runtime, possibly years later on different
//! hardware.

use std::fmt;

/// Internal state of the keystream generator.
///
/// The low 32 bits hold the two 16-bit generator lanes; bits 32..48 hold
/// the output word produced by the most recent [`advance`](Self::advance).
/// States are plain values: copying one forks the stream, and replaying
/// the same calls on the copy yields the same outputs.
///
/// # Examples
///
/// ```
/// use shroud_core::KeystreamState;
///
/// let a = KeystreamState::seed(12345).advance();
/// let b = KeystreamState::seed(12345).advance();
/// assert_eq!(a, b);
/// assert_eq!(a.output(), b.output());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeystreamState(u64);

impl KeystreamState {
    /// Derive the initial state for a 32-bit seed.
    ///
    /// Applies a fixed multiply/xor/shift cascade and keeps the upper
    /// half of the result, decorrelating nearby seeds. Not cryptographic,
    /// and not meant to be: the requirement is determinism and a
    /// well-spread state, nothing more.
    pub fn seed(seed: u32) -> Self {
        let x = u64::from(seed);
        let z = (x ^ (x >> 33)).wrapping_mul(0x62A9_D9ED_7997_05F5);
        let z = (z ^ (z >> 28)).wrapping_mul(0xCB24_D0A5_C88C_35B3);
        Self(z >> 32)
    }

    /// Step the generator one round, producing the next output word.
    ///
    /// One round scrambles the two 16-bit lanes with the (9, 13, 5, 10)
    /// rotation/shift triplet and places the scrambled sum in the output
    /// position. Only the low 32 bits of the incoming state feed the
    /// round; the previous output word is discarded.
    #[must_use]
    pub fn advance(self) -> Self {
        let s0 = self.0 as u16;
        let s1 = (self.0 >> 16) as u16;

        let out = s0.wrapping_add(s1).rotate_left(9).wrapping_add(s0);

        let s1 = s1 ^ s0;
        let new_s0 = s0.rotate_left(13) ^ s1 ^ (s1 << 5);
        let new_s1 = s1.rotate_left(10);

        Self((u64::from(out) << 32) | (u64::from(new_s1) << 16) | u64::from(new_s0))
    }

    /// The 16-bit output word carried by this state.
    ///
    /// Meaningful after at least one [`advance`](Self::advance); the
    /// freshly seeded state carries no output word in this position.
    pub fn output(self) -> u16 {
        (self.0 >> 32) as u16
    }
}

impl fmt::Display for KeystreamState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#014x}", self.0)
    }
}

impl From<u64> for KeystreamState {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

impl From<KeystreamState> for u64 {
    fn from(s: KeystreamState) -> u64 {
        s.0
    }
}
