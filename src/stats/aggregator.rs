use crate::config::StatsConfig;
use crate::text::normalize_word;
use std::collections::{HashMap, HashSet};
use url::Url;

/// Default English stop-word list (the ranks.nl list, minus punctuation)
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "aren", "arent", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "cannot", "cant", "could", "couldnt", "did", "didnt", "do", "does",
    "doesnt", "doing", "dont", "down", "during", "each", "few", "for", "from", "further", "had",
    "hadnt", "has", "hasnt", "have", "havent", "having", "he", "hed", "hell", "her", "here",
    "heres", "hers", "herself", "hes", "him", "himself", "his", "how", "hows", "i", "id", "if",
    "ill", "im", "in", "into", "is", "isnt", "it", "its", "itself", "ive", "lets", "me", "more",
    "most", "mustnt", "my", "myself", "no", "nor", "not", "of", "off", "on", "once", "only", "or",
    "other", "ought", "our", "ours", "ourselves", "out", "over", "own", "same", "shant", "she",
    "shed", "shell", "shes", "should", "shouldnt", "so", "some", "such", "than", "that", "thats",
    "the", "their", "theirs", "them", "themselves", "then", "there", "theres", "these", "they",
    "theyd", "theyll", "theyre", "theyve", "this", "those", "through", "to", "too", "under",
    "until", "up", "very", "was", "wasnt", "we", "wed", "well", "were", "werent", "weve", "what",
    "whats", "when", "whens", "where", "wheres", "which", "while", "who", "whom", "whos", "why",
    "whys", "with", "wont", "would", "wouldnt", "you", "youd", "youll", "youre", "youve", "your",
    "yours", "yourself", "yourselves",
];

/// How many of the most frequent words the report lists
const REPORT_WORD_COUNT: usize = 50;

/// URL and raw word count of the longest page seen so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongestPageRecord {
    pub url: String,
    pub word_count: usize,
}

/// Per-word running state
#[derive(Debug, Clone)]
struct WordEntry {
    count: u64,
    /// Encounter sequence, for deterministic ordering of tied counts
    first_seen: u64,
}

/// Cross-page running statistics for one crawl session
///
/// Page sightings are idempotent per distinct canonical URL; counts only
/// ever grow. The aggregator itself is not synchronized - the gate wraps it
/// in a mutex.
#[derive(Debug)]
pub struct StatsAggregator {
    domain_suffix: String,
    stop_words: HashSet<String>,
    unique_pages: HashSet<String>,
    subdomain_counts: HashMap<String, u64>,
    word_counts: HashMap<String, WordEntry>,
    next_word_seq: u64,
    longest_page: Option<LongestPageRecord>,
}

impl StatsAggregator {
    /// Creates an empty aggregator from statistics configuration
    pub fn new(config: &StatsConfig) -> Self {
        let stop_words = match &config.stop_words {
            Some(words) => words.iter().map(|w| w.to_ascii_lowercase()).collect(),
            None => DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
        };

        Self {
            domain_suffix: config.domain_suffix.to_lowercase(),
            stop_words,
            unique_pages: HashSet::new(),
            subdomain_counts: HashMap::new(),
            word_counts: HashMap::new(),
            next_word_seq: 0,
            longest_page: None,
        }
    }

    /// Records a sighting of a canonical URL
    ///
    /// Idempotent: only the first sighting of a URL counts it as unique and
    /// bumps its subdomain, if the host falls under the statistics domain.
    pub fn record_page_seen(&mut self, url: &Url) {
        if !self.unique_pages.insert(url.as_str().to_string()) {
            return;
        }

        if let Some(host) = url.host_str() {
            let host = host.to_lowercase();
            if host.ends_with(&self.domain_suffix) {
                *self.subdomain_counts.entry(host).or_insert(0) += 1;
            }
        }
    }

    /// Folds an accepted page's content into the aggregates
    ///
    /// Updates the longest-page record when this page's raw word count
    /// strictly exceeds it, then counts every normalized, non-stop word.
    pub fn record_accepted_content(&mut self, url: &Url, raw_word_count: usize, text: &str) {
        let beats_record = self
            .longest_page
            .as_ref()
            .map(|record| raw_word_count > record.word_count)
            .unwrap_or(true);
        if beats_record {
            self.longest_page = Some(LongestPageRecord {
                url: url.as_str().to_string(),
                word_count: raw_word_count,
            });
        }

        for raw_word in text.split_whitespace() {
            let Some(word) = normalize_word(raw_word) else {
                continue;
            };
            if self.stop_words.contains(&word) {
                continue;
            }
            let seq = self.next_word_seq;
            let entry = self.word_counts.entry(word).or_insert(WordEntry {
                count: 0,
                first_seen: seq,
            });
            if entry.count == 0 {
                self.next_word_seq += 1;
            }
            entry.count += 1;
        }
    }

    /// Number of distinct canonical URLs seen
    pub fn unique_page_count(&self) -> usize {
        self.unique_pages.len()
    }

    /// The longest page seen so far, if any page was accepted
    pub fn longest_page(&self) -> Option<&LongestPageRecord> {
        self.longest_page.as_ref()
    }

    /// Number of distinct words counted
    pub fn distinct_word_count(&self) -> usize {
        self.word_counts.len()
    }

    /// Count for one word, mainly for tests
    pub fn word_count(&self, word: &str) -> u64 {
        self.word_counts.get(word).map(|e| e.count).unwrap_or(0)
    }

    /// Subdomain page counts sorted alphabetically by host
    pub fn subdomains_sorted(&self) -> Vec<(String, u64)> {
        let mut subdomains: Vec<(String, u64)> = self
            .subdomain_counts
            .iter()
            .map(|(host, count)| (host.clone(), *count))
            .collect();
        subdomains.sort_by(|a, b| a.0.cmp(&b.0));
        subdomains
    }

    /// The most frequent words, descending; ties break by encounter order
    pub fn top_words(&self, limit: usize) -> Vec<(String, u64)> {
        let mut words: Vec<(&String, &WordEntry)> = self.word_counts.iter().collect();
        words.sort_by(|a, b| {
            b.1.count
                .cmp(&a.1.count)
                .then(a.1.first_seen.cmp(&b.1.first_seen))
        });
        words
            .into_iter()
            .take(limit)
            .map(|(word, entry)| (word.clone(), entry.count))
            .collect()
    }

    /// Renders the session report
    ///
    /// In order: unique-page count, longest page, the top 50 `word: count`
    /// lines, total subdomain count, then each `host: count` line sorted by
    /// host name.
    pub fn render_report(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!("Unique pages: {}\n", self.unique_pages.len()));

        match &self.longest_page {
            Some(record) => out.push_str(&format!(
                "Longest page: {} ({} words)\n",
                record.url, record.word_count
            )),
            None => out.push_str("Longest page: none\n"),
        }

        for (word, count) in self.top_words(REPORT_WORD_COUNT) {
            out.push_str(&format!("{}: {}\n", word, count));
        }

        out.push_str(&format!("Subdomains: {}\n", self.subdomain_counts.len()));
        for (host, count) in self.subdomains_sorted() {
            out.push_str(&format!("{}: {}\n", host, count));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StatsConfig;

    fn aggregator() -> StatsAggregator {
        StatsAggregator::new(&StatsConfig::default())
    }

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_record_page_seen_is_idempotent() {
        let mut stats = aggregator();
        let page = url("https://vision.ics.uci.edu/papers");

        stats.record_page_seen(&page);
        stats.record_page_seen(&page);

        assert_eq!(stats.unique_page_count(), 1);
        assert_eq!(stats.subdomains_sorted(), vec![("vision.ics.uci.edu".to_string(), 1)]);
    }

    #[test]
    fn test_subdomain_counting_respects_suffix() {
        let mut stats = aggregator();
        stats.record_page_seen(&url("https://vision.ics.uci.edu/a"));
        stats.record_page_seen(&url("https://vision.ics.uci.edu/b"));
        stats.record_page_seen(&url("https://www.example.com/c"));

        assert_eq!(stats.unique_page_count(), 3);
        assert_eq!(
            stats.subdomains_sorted(),
            vec![("vision.ics.uci.edu".to_string(), 2)]
        );
    }

    #[test]
    fn test_longest_page_updates_monotonically() {
        let mut stats = aggregator();
        stats.record_accepted_content(&url("https://ics.uci.edu/a"), 150, "");
        stats.record_accepted_content(&url("https://ics.uci.edu/b"), 120, "");
        stats.record_accepted_content(&url("https://ics.uci.edu/c"), 400, "");

        let record = stats.longest_page().unwrap();
        assert_eq!(record.url, "https://ics.uci.edu/c");
        assert_eq!(record.word_count, 400);
    }

    #[test]
    fn test_tie_does_not_replace_longest_page() {
        let mut stats = aggregator();
        stats.record_accepted_content(&url("https://ics.uci.edu/a"), 150, "");
        stats.record_accepted_content(&url("https://ics.uci.edu/b"), 150, "");

        assert_eq!(stats.longest_page().unwrap().url, "https://ics.uci.edu/a");
    }

    #[test]
    fn test_word_counting_excludes_stop_words() {
        let mut stats = aggregator();
        stats.record_accepted_content(
            &url("https://ics.uci.edu/a"),
            8,
            "the research group studies the learning research",
        );

        assert_eq!(stats.word_count("research"), 2);
        assert_eq!(stats.word_count("group"), 1);
        assert_eq!(stats.word_count("studies"), 1);
        assert_eq!(stats.word_count("learning"), 1);
        assert_eq!(stats.word_count("the"), 0);
    }

    #[test]
    fn test_word_counting_strips_punctuation_and_skips_mixed() {
        let mut stats = aggregator();
        stats.record_accepted_content(
            &url("https://ics.uci.edu/a"),
            5,
            "Research, research. (research) cs161 2024",
        );

        assert_eq!(stats.word_count("research"), 3);
        assert_eq!(stats.word_count("cs161"), 0);
        assert_eq!(stats.distinct_word_count(), 1);
    }

    #[test]
    fn test_top_words_order_and_tie_break() {
        let mut stats = aggregator();
        stats.record_accepted_content(
            &url("https://ics.uci.edu/a"),
            9,
            "zebra apple zebra apple zebra banana cherry banana cherry",
        );

        let top = stats.top_words(10);
        // zebra: 3, then apple/banana/cherry all at 2, in encounter order
        assert_eq!(top[0], ("zebra".to_string(), 3));
        assert_eq!(top[1], ("apple".to_string(), 2));
        assert_eq!(top[2], ("banana".to_string(), 2));
        assert_eq!(top[3], ("cherry".to_string(), 2));
    }

    #[test]
    fn test_custom_stop_words() {
        let config = StatsConfig {
            domain_suffix: "uci.edu".to_string(),
            stop_words: Some(vec!["research".to_string()]),
        };
        let mut stats = StatsAggregator::new(&config);
        stats.record_accepted_content(&url("https://ics.uci.edu/a"), 3, "the research lab");

        assert_eq!(stats.word_count("research"), 0);
        // "the" is only stopped by the default list, which was replaced
        assert_eq!(stats.word_count("the"), 1);
        assert_eq!(stats.word_count("lab"), 1);
    }

    #[test]
    fn test_render_report_layout() {
        let mut stats = aggregator();
        stats.record_page_seen(&url("https://vision.ics.uci.edu/a"));
        stats.record_page_seen(&url("https://cs.uci.edu/b"));
        stats.record_accepted_content(
            &url("https://vision.ics.uci.edu/a"),
            4,
            "neural networks neural vision",
        );

        let report = stats.render_report();
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "Unique pages: 2");
        assert_eq!(lines[1], "Longest page: https://vision.ics.uci.edu/a (4 words)");
        assert_eq!(lines[2], "neural: 2");
        // networks before vision: equal counts, encountered earlier
        assert_eq!(lines[3], "networks: 1");
        assert_eq!(lines[4], "vision: 1");
        assert_eq!(lines[5], "Subdomains: 2");
        assert_eq!(lines[6], "cs.uci.edu: 1");
        assert_eq!(lines[7], "vision.ics.uci.edu: 1");
    }

    #[test]
    fn test_report_with_no_accepted_pages() {
        let stats = aggregator();
        let report = stats.render_report();
        assert!(report.starts_with("Unique pages: 0\nLongest page: none\n"));
    }
}
