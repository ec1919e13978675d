//! Benchmark profiles and utilities for the Shroud codec.
//!
//! Provides pre-built registry profiles shared by the Criterion benches:
//!
//! - [`reference_registry`]: 1K short strings on a handful of segments
//! - [`stress_registry`]: 10K mixed strings across many segments

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use shroud_codec::StringRegistry;
use shroud_core::StringId;
use shroud_test_utils::{corpus, SEEDS};

/// Build a registry of `count` strings up to `max_len` characters.
///
/// Returns the registry together with the identifiers in registration
/// order. Deterministic for a given `seed`.
pub fn seeded_registry(seed: u64, count: usize, max_len: usize) -> (StringRegistry, Vec<StringId>) {
    let mut registry = StringRegistry::new();
    let ids = corpus(seed, count, max_len)
        .iter()
        .enumerate()
        .map(|(i, text)| registry.register(SEEDS[i % SEEDS.len()], text).unwrap())
        .collect();
    (registry, ids)
}

/// Reference profile: 1,000 short strings, a handful of segments.
pub fn reference_registry() -> (StringRegistry, Vec<StringId>) {
    seeded_registry(42, 1_000, 60)
}

/// Stress profile: 10,000 mixed strings across many segments.
pub fn stress_registry() -> (StringRegistry, Vec<StringId>) {
    seeded_registry(42, 10_000, 200)
}
