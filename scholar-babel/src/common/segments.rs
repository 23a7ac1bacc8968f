//! Markdown segment parsing
//!
//! Chat turns are semi-structured markdown. This module splits one turn into typed
//! segments without building a full markdown AST: the classification is line based and
//! heuristic on purpose, mirroring how the assistant is prompted to write.
//!
//! Fences
//!
//!     The content is split on triple backticks. Pieces at odd positions are fenced. The
//!     first line of a fenced piece, when it is a single word followed by more lines, is its
//!     tag: `mermaid` marks a diagram, `json-chart` a chart configuration, anything else is
//!     generic code or data.
//!
//! Prose
//!
//!     Every line is trimmed, then, in order:
//!
//!     | Line                                        | Segment                         |
//!     |---------------------------------------------|---------------------------------|
//!     | empty                                       | nothing                         |
//!     | divider row (`|---|:-:|`)                   | nothing, table run continues    |
//!     | other pipe row (`| a | b |`)                | buffered into the current table |
//!     | `### ` prefix                               | sub-heading                     |
//!     | `**...**`, under 100 characters             | sub-heading                     |
//!     | `- ` or `* ` prefix                         | bullet (marker stripped)        |
//!     | anything else                               | paragraph                       |
//!
//!     A buffered table is emitted as soon as a non-pipe line (or the end of the prose
//!     piece) interrupts the run. A prose line that happens to start and end with `|` is
//!     read as a table row; that misclassification is accepted.

use super::table::{build_table, is_divider_row, is_table_row};
use crate::ir::nodes::Table;

const FENCE: &str = "```";
const BOLD_HEADING_MAX_CHARS: usize = 100;

/// Tag marking a diagram specification.
pub const DIAGRAM_TAG: &str = "mermaid";
/// Tag marking a chart configuration.
pub const CHART_TAG: &str = "json-chart";

/// What a fenced block contains, decided by its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Diagram,
    Chart,
    Code,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FencedBlock {
    pub kind: FenceKind,
    pub language: Option<String>,
    pub content: String,
}

/// A typed piece of one chat turn.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Sub-heading text, inline markers still present.
    Heading(String),
    Paragraph(String),
    /// Bullet item text with the list marker removed.
    Bullet(String),
    Table(Table),
    Fenced(FencedBlock),
}

/// Split the content of a chat turn into segments. Total over all inputs.
pub fn parse_segments(content: &str) -> Vec<Segment> {
    let mut segments = Vec::new();

    for (idx, piece) in content.split(FENCE).enumerate() {
        if idx % 2 == 1 {
            if let Some(block) = parse_fenced(piece) {
                segments.push(Segment::Fenced(block));
            }
        } else {
            parse_prose(piece, &mut segments);
        }
    }

    segments
}

fn parse_fenced(piece: &str) -> Option<FencedBlock> {
    let (language, body) = split_fence_tag(piece);
    let content = body.trim();
    if content.is_empty() {
        return None;
    }

    let kind = match language.as_deref() {
        Some(DIAGRAM_TAG) => FenceKind::Diagram,
        Some(CHART_TAG) => FenceKind::Chart,
        _ => FenceKind::Code,
    };

    Some(FencedBlock {
        kind,
        language,
        content: content.to_string(),
    })
}

/// Separate the tag line from the body of a fenced piece.
fn split_fence_tag(piece: &str) -> (Option<String>, &str) {
    if let Some((first, rest)) = piece.split_once('\n') {
        let tag = first.trim();
        if !tag.is_empty() && !tag.contains(char::is_whitespace) {
            return (Some(tag.to_string()), rest);
        }
    }
    (None, piece)
}

fn parse_prose(text: &str, segments: &mut Vec<Segment>) {
    let mut table_buffer: Vec<&str> = Vec::new();

    for raw in text.lines() {
        let line = raw.trim();

        if is_table_row(line) {
            if !is_divider_row(line) {
                table_buffer.push(line);
            }
            continue;
        }

        flush_table(&mut table_buffer, segments);

        if line.is_empty() {
            continue;
        }
        segments.push(classify_line(line));
    }

    flush_table(&mut table_buffer, segments);
}

fn flush_table(buffer: &mut Vec<&str>, segments: &mut Vec<Segment>) {
    if buffer.is_empty() {
        return;
    }
    segments.push(Segment::Table(build_table(buffer)));
    buffer.clear();
}

fn classify_line(line: &str) -> Segment {
    if line.starts_with("### ") {
        return Segment::Heading(line.trim_start_matches('#').trim().to_string());
    }
    if is_bold_heading(line) {
        return Segment::Heading(line.to_string());
    }
    if let Some(item) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return Segment::Bullet(item.to_string());
    }
    Segment::Paragraph(line.to_string())
}

fn is_bold_heading(line: &str) -> bool {
    line.len() >= 4
        && line.starts_with("**")
        && line.ends_with("**")
        && line.chars().count() < BOLD_HEADING_MAX_CHARS
}
