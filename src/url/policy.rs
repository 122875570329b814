//! URL scope and trap policy
//!
//! Decides, from a canonical URL alone, whether a link is worth fetching.
//! Traps are URL families that generate unbounded distinct URLs over the
//! same content (calendars, faceted views, session state); this filter is a
//! cheap URL-only heuristic applied before any fetch of the target, so false
//! rejects are preferred over crawling an infinite trap.

use crate::config::{FilterConfig, ScopeConfig};
use crate::{UrlError, UrlResult};
use regex::Regex;
use std::collections::HashSet;
use url::Url;

/// An allow-listed suffix with its optional path-prefix requirement
#[derive(Debug, Clone)]
struct ScopeRule {
    suffix: String,
    path_prefix: Option<String>,
}

/// Scope and trap filter for candidate URLs
///
/// Built once from configuration; all patterns are compiled up front so the
/// per-URL check is allocation-free.
#[derive(Debug)]
pub struct UrlPolicyFilter {
    rules: Vec<ScopeRule>,
    blocked_extensions: HashSet<String>,
    blocked_params: HashSet<String>,
    max_query_length: usize,
    day_pattern: Regex,
    month_pattern: Regex,
}

impl UrlPolicyFilter {
    /// Creates a policy filter from scope and filter configuration
    pub fn new(scope: &ScopeConfig, filter: &FilterConfig) -> Self {
        let rules = scope
            .allow
            .iter()
            .map(|entry| ScopeRule {
                suffix: entry.suffix.to_lowercase(),
                path_prefix: entry.path_prefix.clone(),
            })
            .collect();

        // Day-level and month-level calendar indicators are deliberately kept
        // as two separate checks so each can be tested on its own.
        let day_pattern = Regex::new(r"\d{4}-\d{2}-\d{2}").expect("static day pattern");
        let month_pattern = Regex::new(r"\d{4}-\d{2}").expect("static month pattern");

        Self {
            rules,
            blocked_extensions: filter.blocked_extensions.iter().cloned().collect(),
            blocked_params: filter.blocked_query_params.iter().cloned().collect(),
            max_query_length: filter.max_query_length,
            day_pattern,
            month_pattern,
        }
    }

    /// Decides whether a canonical URL is in-scope and trap-free
    ///
    /// The checks short-circuit on the first reject:
    /// 1. scheme must be http or https
    /// 2. host must end with an allow-listed suffix (one suffix also
    ///    requires a path prefix)
    /// 3. the path's final extension must not be blocked
    /// 4. the path must not look like a calendar day or month
    /// 5. the query must not carry blocked parameters or be overlong
    pub fn is_allowed(&self, url: &Url) -> bool {
        if url.scheme() != "http" && url.scheme() != "https" {
            return false;
        }

        let host = match url.host_str() {
            Some(h) => h.to_lowercase(),
            None => return false,
        };

        let mut in_scope = false;
        for rule in &self.rules {
            if host.ends_with(&rule.suffix) {
                if let Some(prefix) = &rule.path_prefix {
                    // Host matched, but this suffix only admits one subtree
                    if !url.path().starts_with(prefix.as_str()) {
                        return false;
                    }
                }
                in_scope = true;
                break;
            }
        }
        if !in_scope {
            return false;
        }

        let path = url.path().to_lowercase();

        if let Some(ext) = final_extension(&path) {
            if self.blocked_extensions.contains(ext) {
                return false;
            }
        }

        if self.day_pattern.is_match(&path) {
            return false;
        }
        if self.month_pattern.is_match(&path) {
            return false;
        }

        if let Some(query) = url.query() {
            if query.len() > self.max_query_length {
                return false;
            }
            for (name, _) in url.query_pairs() {
                if self.blocked_params.contains(name.as_ref()) {
                    return false;
                }
            }
        }

        true
    }

    /// String-input convenience wrapper
    ///
    /// Parses and defragments the input first; an unparseable URL surfaces
    /// as `UrlError::Malformed` instead of a silent reject, so callers can
    /// tell "out of scope" apart from "garbage input".
    pub fn is_allowed_str(&self, raw: &str) -> UrlResult<bool> {
        let url = Url::parse(raw).map_err(|e| UrlError::Malformed(format!("{}: {}", raw, e)))?;
        Ok(self.is_allowed(&url))
    }
}

/// Extracts the final extension of a path, if any
///
/// Only a dot inside the last path segment counts: "/a.b/c" has none.
fn final_extension(path: &str) -> Option<&str> {
    let last_segment = path.rsplit('/').next().unwrap_or(path);
    let (_, ext) = last_segment.rsplit_once('.')?;
    if ext.is_empty() {
        None
    } else {
        Some(ext)
    }
}
