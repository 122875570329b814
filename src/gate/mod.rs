//! Page admission gate
//!
//! The gate is invoked once per fetched page and decides whether the page
//! is kept for statistics and link-following. It owns all cross-page state
//! (the similarity index and the statistics aggregator) behind mutexes, so
//! worker threads can call [`PageGate::process`] concurrently.

use crate::config::Config;
use crate::dedup::{FingerprintEngine, SimilarityIndex};
use crate::stats::StatsAggregator;
use crate::text::{raw_word_count, tokens};
use crate::url::{canonicalize, canonicalize_absolute, UrlPolicyFilter};
use crate::Result;
use std::fmt;
use std::sync::Mutex;

/// One fetched page as handed over by the fetch layer
///
/// Owned transiently per fetch; nothing here outlives a single
/// [`PageGate::process`] call.
#[derive(Debug, Clone)]
pub struct PageResponse {
    /// HTTP status code; anything but 200 is rejected outright
    pub status: u16,

    /// Error description accompanying a failed fetch, for logging
    pub error: Option<String>,

    /// The URL the content was actually served from, after redirects
    pub effective_url: String,

    /// Raw body bytes
    pub body: Vec<u8>,
}

/// Admission decision for one page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageOutcome {
    /// Page was kept; its stats were recorded and its links returned
    Accepted,

    /// Response status was not 200
    RejectedStatus,

    /// Body exceeded the size cap and was never decoded
    RejectedTooLarge,

    /// Fewer raw words than the floor
    RejectedTooShort,

    /// Large body with too little text - markup or boilerplate heavy
    RejectedTooSparse,

    /// Near-duplicate of an already accepted page
    RejectedDuplicate,
}

impl PageOutcome {
    /// Returns true if the page was admitted
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Returns true for any rejection outcome
    pub fn is_rejected(&self) -> bool {
        !self.is_accepted()
    }

    /// Short lowercase label for logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::RejectedStatus => "rejected_status",
            Self::RejectedTooLarge => "rejected_too_large",
            Self::RejectedTooShort => "rejected_too_short",
            Self::RejectedTooSparse => "rejected_too_sparse",
            Self::RejectedDuplicate => "rejected_duplicate",
        }
    }
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What [`PageGate::process`] returns for one page
#[derive(Debug, Clone)]
pub struct GateDecision {
    /// How the page was classified
    pub outcome: PageOutcome,

    /// Candidate links to re-queue, in extraction order; empty unless the
    /// page was accepted
    pub links: Vec<String>,
}

impl GateDecision {
    fn rejected(outcome: PageOutcome) -> Self {
        Self {
            outcome,
            links: Vec::new(),
        }
    }
}

/// The content-admission gate
///
/// Holds the shared mutable session state. All mutation happens under one
/// of two mutexes with short, in-memory-only hold times; no I/O is ever
/// performed under a lock.
pub struct PageGate {
    gate_config: crate::config::GateConfig,
    policy: UrlPolicyFilter,
    engine: FingerprintEngine,
    index: Mutex<SimilarityIndex>,
    stats: Mutex<StatsAggregator>,
}

impl PageGate {
    /// Builds a gate from configuration
    pub fn new(config: &Config) -> Self {
        Self {
            gate_config: config.gate.clone(),
            policy: UrlPolicyFilter::new(&config.scope, &config.filter),
            engine: FingerprintEngine::new(config.dedup.min_token_count),
            index: Mutex::new(SimilarityIndex::new(config.dedup.similarity_threshold)),
            stats: Mutex::new(StatsAggregator::new(&config.stats)),
        }
    }

    /// Processes one fetched page
    ///
    /// Sequences the admission pipeline: unconditional unique-page
    /// tracking, early status/size rejections, text extraction, word-count
    /// thresholds, near-duplicate detection, then statistics update and
    /// link filtering for accepted pages.
    ///
    /// # Arguments
    ///
    /// * `request_url` - The URL that was fetched (used for logging)
    /// * `response` - The fetched page
    ///
    /// # Returns
    ///
    /// * `Ok(GateDecision)` - Outcome plus the filtered link list
    /// * `Err(SieveError)` - The response's effective URL was malformed
    pub fn process(&self, request_url: &str, response: &PageResponse) -> Result<GateDecision> {
        let effective = canonicalize_absolute(&response.effective_url)?;

        // Unique-page and subdomain tracking happens for every response,
        // keyed off where the content was actually served from.
        self.stats.lock().unwrap().record_page_seen(&effective);

        if response.status != 200 {
            tracing::debug!(
                "rejecting {} (status {}, error: {})",
                request_url,
                response.status,
                response.error.as_deref().unwrap_or("none")
            );
            return Ok(GateDecision::rejected(PageOutcome::RejectedStatus));
        }

        // Oversized bodies are rejected before any decoding
        if response.body.len() > self.gate_config.max_body_bytes {
            tracing::debug!(
                "rejecting {} ({} bytes exceeds cap)",
                request_url,
                response.body.len()
            );
            return Ok(GateDecision::rejected(PageOutcome::RejectedTooLarge));
        }

        let page = crate::html::extract_page(&response.body);

        let word_count = raw_word_count(&page.text);
        if word_count < self.gate_config.min_word_count {
            return Ok(GateDecision::rejected(PageOutcome::RejectedTooShort));
        }
        if word_count < self.gate_config.sparse_word_count
            && response.body.len() > self.gate_config.sparse_body_bytes
        {
            return Ok(GateDecision::rejected(PageOutcome::RejectedTooSparse));
        }

        let token_sequence: Vec<String> = tokens(&page.text).collect();
        if let Some(fingerprint) = self.engine.fingerprint(&token_sequence) {
            let duplicate = self.index.lock().unwrap().test_and_record(fingerprint);
            if duplicate {
                tracing::debug!("rejecting {} as near-duplicate", request_url);
                return Ok(GateDecision::rejected(PageOutcome::RejectedDuplicate));
            }
        }

        self.stats
            .lock()
            .unwrap()
            .record_accepted_content(&effective, word_count, &page.text);

        let links = self.filter_links(&page.links, &effective);

        Ok(GateDecision {
            outcome: PageOutcome::Accepted,
            links,
        })
    }

    /// Canonicalizes raw hrefs against the page URL and applies the policy
    ///
    /// Individual malformed links are logged and skipped; one bad href on a
    /// page should not cost the rest of its links.
    fn filter_links(&self, raw_links: &[String], base: &url::Url) -> Vec<String> {
        let mut links = Vec::new();

        for raw in raw_links {
            let candidate = match canonicalize(raw, base) {
                Ok(url) => url,
                Err(e) => {
                    tracing::debug!("skipping malformed link on {}: {}", base, e);
                    continue;
                }
            };

            if self.policy.is_allowed(&candidate) {
                links.push(candidate.to_string());
            }
        }

        links
    }

    /// Renders the statistics report under the aggregator lock
    pub fn render_report(&self) -> String {
        self.stats.lock().unwrap().render_report()
    }

    /// Runs a closure against the aggregator, for inspection in tests and
    /// progress logging
    pub fn with_stats<T>(&self, f: impl FnOnce(&StatsAggregator) -> T) -> T {
        f(&self.stats.lock().unwrap())
    }
}
