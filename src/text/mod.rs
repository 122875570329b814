//! Tokenization of extracted page text
//!
//! Two different word notions coexist here. The *raw word count* is a plain
//! whitespace split, used by the gate thresholds and the longest-page
//! record. *Tokens* are lowercase alphabetic runs of length >= 2, used for
//! shingling and word statistics.

/// Lazy iterator over the alphabetic tokens of a text
///
/// A fresh iterator can be created from the same text any number of times;
/// nothing is consumed from the underlying string.
pub struct Tokens<'a> {
    rest: &'a str,
}

/// Returns a lazy token iterator over the given text
///
/// # Examples
///
/// ```
/// use page_sieve::text::tokens;
///
/// let words: Vec<String> = tokens("The ICS-46 lab, room 2").collect();
/// assert_eq!(words, ["the", "ics", "lab", "room"]);
/// ```
pub fn tokens(text: &str) -> Tokens<'_> {
    Tokens { rest: text }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            let start = self
                .rest
                .char_indices()
                .find(|(_, c)| c.is_ascii_alphabetic())
                .map(|(i, _)| i)?;
            let after = &self.rest[start..];
            let end = after
                .char_indices()
                .find(|(_, c)| !c.is_ascii_alphabetic())
                .map(|(i, _)| i)
                .unwrap_or(after.len());

            let run = &after[..end];
            self.rest = &after[end..];

            if run.len() >= 2 {
                return Some(run.to_ascii_lowercase());
            }
            // single-letter run: skip and keep scanning
        }
    }
}

/// Counts raw whitespace-separated words
pub fn raw_word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Normalizes a raw word for frequency counting
///
/// Lowercases and strips surrounding punctuation; returns `None` unless the
/// remainder is a purely alphabetic token of length >= 2.
pub fn normalize_word(word: &str) -> Option<String> {
    let trimmed = word.trim_matches(|c: char| !c.is_ascii_alphanumeric());
    if trimmed.len() >= 2 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(trimmed.to_ascii_lowercase())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(text: &str) -> Vec<String> {
        tokens(text).collect()
    }

    #[test]
    fn test_lowercases_tokens() {
        assert_eq!(collect("Hello World"), ["hello", "world"]);
    }

    #[test]
    fn test_splits_on_non_alphabetic() {
        assert_eq!(
            collect("machine-learning, vision/graphics"),
            ["machine", "learning", "vision", "graphics"]
        );
    }

    #[test]
    fn test_drops_single_letter_runs() {
        assert_eq!(collect("a bc d ef"), ["bc", "ef"]);
    }

    #[test]
    fn test_digits_break_tokens() {
        assert_eq!(collect("cs161 covers crypto2025"), ["cs", "covers", "crypto"]);
    }

    #[test]
    fn test_empty_and_symbol_only_input() {
        assert!(collect("").is_empty());
        assert!(collect("123 !@# 4 5").is_empty());
    }

    #[test]
    fn test_non_ascii_is_a_boundary() {
        assert_eq!(collect("naïve café"), ["na", "ve", "caf"]);
    }

    #[test]
    fn test_restartable() {
        let text = "alpha beta gamma";
        let first: Vec<String> = tokens(text).collect();
        let second: Vec<String> = tokens(text).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_raw_word_count() {
        assert_eq!(raw_word_count("one two  three\n four\t"), 4);
        assert_eq!(raw_word_count(""), 0);
        assert_eq!(raw_word_count("   "), 0);
    }

    #[test]
    fn test_normalize_word() {
        assert_eq!(normalize_word("Hello,"), Some("hello".to_string()));
        assert_eq!(normalize_word("\"quoted\""), Some("quoted".to_string()));
        assert_eq!(normalize_word("end."), Some("end".to_string()));
        // Embedded digits or punctuation disqualify the word
        assert_eq!(normalize_word("cs161"), None);
        assert_eq!(normalize_word("don't"), None);
        assert_eq!(normalize_word("x"), None);
        assert_eq!(normalize_word("--"), None);
    }
}
