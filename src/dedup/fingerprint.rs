//! Content fingerprinting
//!
//! A page's token sequence is cut into overlapping 3-token shingles, each
//! shingle is hashed with a fixed polynomial rolling hash, and a
//! deterministic quarter of the hash values is kept as the fingerprint.

use std::collections::HashSet;

/// Width of a shingle window, in tokens
const SHINGLE_WIDTH: usize = 3;

/// Base of the polynomial rolling hash
const HASH_BASE: u64 = 31;

/// Modulus of the polynomial rolling hash
const HASH_MODULUS: u64 = 1_000_000_007;

/// Only hashes divisible by this survive into the fingerprint
const SAMPLE_DIVISOR: u64 = 4;

/// Sampled set of shingle hashes representing one page
///
/// Immutable once built. Pages below the engine's token floor get no
/// fingerprint at all rather than an unreliable one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint(HashSet<u64>);

impl Fingerprint {
    /// Number of sampled hashes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if sampling kept nothing
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Jaccard similarity |A ∩ B| / |A ∪ B| between two fingerprints
    ///
    /// Defined as 0.0 when both sets are empty, so content-free pages never
    /// count as similar to each other.
    pub fn jaccard(&self, other: &Fingerprint) -> f64 {
        if self.0.is_empty() && other.0.is_empty() {
            return 0.0;
        }
        let intersection = self.0.intersection(&other.0).count();
        let union = self.0.len() + other.0.len() - intersection;
        intersection as f64 / union as f64
    }
}

/// Builds fingerprints from token sequences
#[derive(Debug, Clone)]
pub struct FingerprintEngine {
    min_token_count: usize,
}

impl FingerprintEngine {
    /// Creates an engine with the given token floor
    pub fn new(min_token_count: usize) -> Self {
        Self { min_token_count }
    }

    /// Fingerprints a token sequence
    ///
    /// Returns `None` when the sequence is shorter than the configured
    /// floor; such pages are too short for a meaningful comparison and the
    /// duplicate test must treat them as unique.
    pub fn fingerprint(&self, tokens: &[String]) -> Option<Fingerprint> {
        if tokens.len() < self.min_token_count {
            return None;
        }

        let mut hashes = HashSet::new();
        for window in tokens.windows(SHINGLE_WIDTH) {
            let shingle = window.join(" ");
            hashes.insert(shingle_hash(&shingle));
        }
        hashes.retain(|h| h % SAMPLE_DIVISOR == 0);

        Some(Fingerprint(hashes))
    }
}

/// Polynomial rolling hash of a shingle string
///
/// Each lowercase letter maps to its 1-based alphabet position, every other
/// character (the shingle separator in practice) to 0; character i
/// contributes `value * 31^i` and everything is reduced mod 1_000_000_007.
/// The result is stable across runs and platforms, which the sampling step
/// depends on.
pub fn shingle_hash(shingle: &str) -> u64 {
    let mut hash: u64 = 0;
    let mut power: u64 = 1;
    for c in shingle.chars() {
        let value = if c.is_ascii_lowercase() {
            c as u64 - 'a' as u64 + 1
        } else {
            0
        };
        hash = (hash + value * power) % HASH_MODULUS;
        power = (power * HASH_BASE) % HASH_MODULUS;
    }
    hash
}
