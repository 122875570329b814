use serde::Deserialize;

/// Main configuration structure for Page-Sieve
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawl: CrawlConfig,
    #[serde(default)]
    pub scope: ScopeConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub gate: GateConfig,
    #[serde(default)]
    pub dedup: DedupConfig,
    #[serde(default)]
    pub stats: StatsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawl driver configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Seed URLs to start crawling from
    #[serde(default)]
    pub seeds: Vec<String>,

    /// Maximum number of concurrent page fetches
    #[serde(rename = "max-concurrent-fetches", default = "default_concurrency")]
    pub max_concurrent_fetches: u32,

    /// Polite delay between requests from one worker (milliseconds)
    #[serde(rename = "fetch-delay-ms", default = "default_fetch_delay")]
    pub fetch_delay_ms: u64,

    /// Stop after this many pages have been processed
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: u64,
}

/// URL scope configuration: which hosts are in-crawl
#[derive(Debug, Clone, Deserialize)]
pub struct ScopeConfig {
    /// Allow-listed domain suffixes
    #[serde(default = "default_allow")]
    pub allow: Vec<AllowEntry>,
}

/// A single allow-listed domain suffix
///
/// An entry may carry a required path prefix; a URL whose host matches the
/// suffix is then accepted only when its path starts with that prefix.
#[derive(Debug, Clone, Deserialize)]
pub struct AllowEntry {
    /// Domain suffix (e.g. "ics.uci.edu" matches "vision.ics.uci.edu")
    pub suffix: String,

    /// Required path prefix for this suffix, if any
    #[serde(rename = "path-prefix", default)]
    pub path_prefix: Option<String>,
}

/// URL trap-filter configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    /// File extensions that are never fetched (lowercase, no dot)
    #[serde(rename = "blocked-extensions", default = "default_blocked_extensions")]
    pub blocked_extensions: Vec<String>,

    /// Query parameter names seen on session/view-state trap pages
    #[serde(rename = "blocked-query-params", default = "default_blocked_params")]
    pub blocked_query_params: Vec<String>,

    /// Queries longer than this are rejected outright
    #[serde(rename = "max-query-length", default = "default_max_query_length")]
    pub max_query_length: usize,
}

/// Page admission thresholds
#[derive(Debug, Clone, Deserialize)]
pub struct GateConfig {
    /// Bodies larger than this are rejected without decoding
    #[serde(rename = "max-body-bytes", default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Pages with fewer raw words than this are rejected
    #[serde(rename = "min-word-count", default = "default_min_word_count")]
    pub min_word_count: usize,

    /// Word floor for the large-but-sparse rejection
    #[serde(rename = "sparse-word-count", default = "default_sparse_word_count")]
    pub sparse_word_count: usize,

    /// Body size above which the sparse rejection applies
    #[serde(rename = "sparse-body-bytes", default = "default_sparse_body_bytes")]
    pub sparse_body_bytes: usize,
}

/// Near-duplicate detection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DedupConfig {
    /// Jaccard similarity at or above which a page is a near-duplicate
    #[serde(rename = "similarity-threshold", default = "default_similarity")]
    pub similarity_threshold: f64,

    /// Pages with fewer tokens than this are never fingerprinted
    #[serde(rename = "min-token-count", default = "default_min_tokens")]
    pub min_token_count: usize,
}

/// Statistics configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StatsConfig {
    /// Subdomain counts are kept for hosts under this parent domain
    #[serde(rename = "domain-suffix", default = "default_stats_suffix")]
    pub domain_suffix: String,

    /// Replacement stop-word list; the built-in English list when absent
    #[serde(rename = "stop-words", default)]
    pub stop_words: Option<Vec<String>>,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the plain-text crawl report
    #[serde(rename = "report-path", default = "default_report_path")]
    pub report_path: String,
}

fn default_concurrency() -> u32 {
    4
}

fn default_fetch_delay() -> u64 {
    500
}

fn default_max_pages() -> u64 {
    10_000
}

fn default_allow() -> Vec<AllowEntry> {
    let plain = ["ics.uci.edu", "cs.uci.edu", "informatics.uci.edu", "stat.uci.edu"];
    let mut allow: Vec<AllowEntry> = plain
        .iter()
        .map(|suffix| AllowEntry {
            suffix: suffix.to_string(),
            path_prefix: None,
        })
        .collect();
    allow.push(AllowEntry {
        suffix: "today.uci.edu".to_string(),
        path_prefix: Some("/department/information_computer_sciences/".to_string()),
    });
    allow
}

fn default_blocked_extensions() -> Vec<String> {
    [
        "css", "js", "bmp", "gif", "jpeg", "jpg", "ico", "png", "tif", "tiff", "mid", "mp2",
        "mp3", "mp4", "wav", "avi", "mov", "mpeg", "ram", "m4v", "mkv", "ogg", "ogv", "pdf",
        "ps", "eps", "tex", "ppt", "pptx", "doc", "docx", "xls", "xlsx", "names", "data",
        "dat", "exe", "bz2", "tar", "msi", "bin", "7z", "psd", "dmg", "iso", "epub", "dll",
        "cnf", "tgz", "sha1", "thmx", "mso", "arff", "rtf", "jar", "csv", "rm", "smil", "wmv",
        "swf", "wma", "zip", "rar", "gz",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_blocked_params() -> Vec<String> {
    // Observed on calendar exports and wiki view-state trap pages
    [
        "ical",
        "outlook-ical",
        "do",
        "rev",
        "tab_files",
        "tab_details",
        "image",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_max_query_length() -> usize {
    100
}

fn default_max_body_bytes() -> usize {
    1_000_000
}

fn default_min_word_count() -> usize {
    100
}

fn default_sparse_word_count() -> usize {
    300
}

fn default_sparse_body_bytes() -> usize {
    500_000
}

fn default_similarity() -> f64 {
    0.85
}

fn default_min_tokens() -> usize {
    10
}

fn default_stats_suffix() -> String {
    "uci.edu".to_string()
}

fn default_report_path() -> String {
    "./report.txt".to_string()
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            seeds: Vec::new(),
            max_concurrent_fetches: default_concurrency(),
            fetch_delay_ms: default_fetch_delay(),
            max_pages: default_max_pages(),
        }
    }
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            allow: default_allow(),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            blocked_extensions: default_blocked_extensions(),
            blocked_query_params: default_blocked_params(),
            max_query_length: default_max_query_length(),
        }
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: default_max_body_bytes(),
            min_word_count: default_min_word_count(),
            sparse_word_count: default_sparse_word_count(),
            sparse_body_bytes: default_sparse_body_bytes(),
        }
    }
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity(),
            min_token_count: default_min_tokens(),
        }
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            domain_suffix: default_stats_suffix(),
            stop_words: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_path: default_report_path(),
        }
    }
}
