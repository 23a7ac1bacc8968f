//! Source URI extraction from generated text.

use once_cell::sync::Lazy;
use regex::Regex;

static SOURCE_URI: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://[^\s)]+").unwrap());

/// Every `http(s)` URI in `text`, deduplicated, in order of first appearance.
///
/// `None` when the text cites nothing, so turns without sources serialize without the
/// field.
pub fn extract_sources(text: &str) -> Option<Vec<String>> {
    let mut sources: Vec<String> = Vec::new();
    for found in SOURCE_URI.find_iter(text) {
        let uri = found.as_str();
        if !sources.iter().any(|s| s == uri) {
            sources.push(uri.to_string());
        }
    }
    (!sources.is_empty()).then_some(sources)
}
