//! Shared fixtures and corpus generators for Shroud development.
//!
//! Deterministic helpers only: every generator takes an explicit seed so
//! a failing test reproduces exactly. Used by the codec integration
//! tests and the benchmark suite.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Obfuscation seeds that exercise the keystream's edge cases.
pub const SEEDS: &[u32] = &[0, 1, 42, 12_345, 54_321, 0xDEAD_BEEF, u32::MAX];

/// Hand-picked strings covering the encoding corner cases: empty, single
/// unit, multi-byte UTF-8 with single-unit UTF-16, and surrogate pairs.
pub const FIXTURES: &[&str] = &[
    "",
    "a",
    "Hello, World!",
    "naïve café résumé",
    "日本語のテキスト",
    "mixed ascii and 中文",
    "🎉 emoji 🌍 pairs 🚀",
    "\u{0}\u{1}\u{FFFD}",
];

/// Deterministic text of `len` characters drawn from a broad script mix.
///
/// Covers ASCII, Latin supplement, CJK, and astral-plane characters so
/// generated strings hit both one- and two-unit UTF-16 encodings.
pub fn seeded_text(seed: u64, len: usize) -> String {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len).map(|_| random_char(&mut rng)).collect()
}

/// A corpus of `count` deterministic strings with lengths up to
/// `max_len` characters.
pub fn corpus(seed: u64, count: usize, max_len: usize) -> Vec<String> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let len = rng.random_range(0..=max_len);
            (0..len).map(|_| random_char(&mut rng)).collect()
        })
        .collect()
}

fn random_char(rng: &mut ChaCha8Rng) -> char {
    match rng.random_range(0..10u32) {
        0..=5 => char::from(rng.random_range(b' '..=b'~')),
        6 => char::from_u32(rng.random_range(0x00A1..0x0250)).unwrap_or('ø'),
        7 | 8 => char::from_u32(rng.random_range(0x4E00..0x9FFF)).unwrap_or('中'),
        _ => char::from_u32(rng.random_range(0x1F300..0x1F600)).unwrap_or('🌍'),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_corpus() {
        assert_eq!(corpus(7, 20, 50), corpus(7, 20, 50));
        assert_eq!(seeded_text(99, 200), seeded_text(99, 200));
    }

    #[test]
    fn corpus_respects_bounds() {
        let strings = corpus(3, 40, 25);
        assert_eq!(strings.len(), 40);
        assert!(strings.iter().all(|s| s.chars().count() <= 25));
    }
}
