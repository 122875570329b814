//! HTML text and link extraction
//!
//! The admission gate consumes two views of a fetched body: a flat text
//! rendering with tag structure removed, and the raw anchor hyperlink
//! targets (unresolved, possibly relative). Both come from a single parse.

use ego_tree::NodeRef;
use scraper::{Html, Node, Selector};

/// Flat view of a parsed HTML document
#[derive(Debug, Clone)]
pub struct ExtractedPage {
    /// Page text with tags removed, word boundaries preserved
    pub text: String,

    /// Raw href values of anchor tags, in document order
    pub links: Vec<String>,
}

/// Parses HTML bytes and extracts text plus anchor targets
///
/// The body is decoded lossily; invalid UTF-8 sequences become replacement
/// characters, which the alphabetic tokenizer ignores anyway.
pub fn extract_page(body: &[u8]) -> ExtractedPage {
    let html = String::from_utf8_lossy(body);
    let document = Html::parse_document(&html);

    ExtractedPage {
        text: extract_text(&document),
        links: extract_links(&document),
    }
}

/// Renders the document as flat text
///
/// Walks all text nodes, skipping script/style/noscript subtrees, and joins
/// them with single spaces so words from adjacent elements never fuse.
fn extract_text(document: &Html) -> String {
    let mut text = String::new();

    for node in document.root_element().descendants() {
        if let Some(text_node) = node.value().as_text() {
            if in_skipped_subtree(&node) {
                continue;
            }
            let trimmed = text_node.trim();
            if !trimmed.is_empty() {
                if !text.is_empty() {
                    text.push(' ');
                }
                text.push_str(trimmed);
            }
        }
    }

    text
}

/// Check if a node has a non-content ancestor
fn in_skipped_subtree(node: &NodeRef<Node>) -> bool {
    let mut current = node.parent();
    while let Some(parent) = current {
        if let Some(elem) = parent.value().as_element() {
            match elem.name() {
                "script" | "style" | "noscript" => return true,
                _ => {}
            }
        }
        current = parent.parent();
    }
    false
}

/// Collects raw anchor targets in document order
///
/// Skips hrefs that can never become crawlable pages: javascript:, mailto:,
/// tel:, data: and empty values. Fragment-only anchors are kept; they
/// canonicalize to the page itself and fall out in the frontier's seen-set.
fn extract_links(document: &Html) -> Vec<String> {
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                let href = href.trim();
                if href.is_empty()
                    || href.starts_with("javascript:")
                    || href.starts_with("mailto:")
                    || href.starts_with("tel:")
                    || href.starts_with("data:")
                {
                    continue;
                }
                links.push(href.to_string());
            }
        }
    }

    links
}
