//! Near-duplicate content detection
//!
//! Pages are reduced to fingerprints (sampled shingle hashes) and compared
//! by Jaccard similarity against everything accepted so far in the session.

mod fingerprint;
mod index;

pub use fingerprint::{shingle_hash, Fingerprint, FingerprintEngine};
pub use index::SimilarityIndex;
