//! Similarity index over accepted-page fingerprints

use crate::dedup::Fingerprint;

/// Append-only store of fingerprints with a near-duplicate test
///
/// Comparison is a linear scan over every fingerprint accepted so far in
/// the session. Crawl sessions are bounded in page count, so the scan stays
/// affordable; a banded LSH index would be the upgrade path for very large
/// crawls, provided it preserves the exact threshold semantics.
#[derive(Debug)]
pub struct SimilarityIndex {
    store: Vec<Fingerprint>,
    threshold: f64,
}

impl SimilarityIndex {
    /// Creates an empty index with the given similarity threshold
    pub fn new(threshold: f64) -> Self {
        Self {
            store: Vec::new(),
            threshold,
        }
    }

    /// Tests a fingerprint against the store, recording it when novel
    ///
    /// Returns `true` (duplicate) if the Jaccard similarity to any stored
    /// fingerprint reaches the threshold; the duplicate's fingerprint is
    /// NOT stored. Otherwise stores the fingerprint and returns `false`.
    pub fn test_and_record(&mut self, fingerprint: Fingerprint) -> bool {
        for stored in &self.store {
            if stored.jaccard(&fingerprint) >= self.threshold {
                return true;
            }
        }
        self.store.push(fingerprint);
        false
    }

    /// Number of fingerprints stored so far
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// True when nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
