//! Inline style parsing
//!
//! Bold (`**...**`, non-greedy) is the only inline style recognised in chat prose.
//! Italics, links and nested styles stay literal text.

use crate::ir::nodes::TextRun;
use once_cell::sync::Lazy;
use regex::Regex;

static BOLD_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());

/// Split a line of prose into plain and bold runs, in order.
///
/// Empty plain pieces (between adjacent bold spans, or at the line edges) are dropped.
/// A line without any bold span comes back as a single plain run equal to the input.
pub fn parse_inline(line: &str) -> Vec<TextRun> {
    let mut runs = Vec::new();
    let mut cursor = 0;

    for caps in BOLD_SPAN.captures_iter(line) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if whole.start() > cursor {
            runs.push(TextRun::plain(&line[cursor..whole.start()]));
        }
        let inner = caps.get(1).map_or("", |m| m.as_str());
        runs.push(TextRun::bold(inner));
        cursor = whole.end();
    }

    if cursor < line.len() || runs.is_empty() {
        runs.push(TextRun::plain(&line[cursor..]));
    }

    runs
}

/// Remove the markers this parser understands along with heading and code markers.
///
/// Used for plain-text summaries where no styling survives.
pub fn strip_markers(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '#' | '*' | '`'))
        .collect()
}
