//! URL handling module for Page-Sieve
//!
//! This module provides URL canonicalization (resolve + defragment) and the
//! scope/trap policy filter applied to every candidate link before it is
//! re-queued.

mod normalize;
mod policy;

pub use normalize::{canonicalize, canonicalize_absolute};
pub use policy::UrlPolicyFilter;
