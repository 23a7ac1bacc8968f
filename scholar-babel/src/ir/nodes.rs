//! Core data structures for the Intermediate Representation (IR).

use serde::Serialize;

/// A block-level node of an assembled report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocNode {
    Title(Title),
    Heading(Heading),
    Paragraph(Paragraph),
    Table(Table),
    CodeBlock(CodeBlock),
    Reference(ReferenceEntry),
}

/// The assembled report: an ordered, flat sequence of block nodes.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Document {
    /// Topic the report was generated for, used by running headers and file names.
    pub topic: String,
    pub children: Vec<DocNode>,
}

impl Document {
    pub fn headings(&self) -> impl Iterator<Item = &Heading> {
        self.children.iter().filter_map(|node| match node {
            DocNode::Heading(h) => Some(h),
            _ => None,
        })
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.children.iter().filter_map(|node| match node {
            DocNode::Table(t) => Some(t),
            _ => None,
        })
    }

    pub fn code_blocks(&self) -> impl Iterator<Item = &CodeBlock> {
        self.children.iter().filter_map(|node| match node {
            DocNode::CodeBlock(c) => Some(c),
            _ => None,
        })
    }

    pub fn references(&self) -> impl Iterator<Item = &ReferenceEntry> {
        self.children.iter().filter_map(|node| match node {
            DocNode::Reference(r) => Some(r),
            _ => None,
        })
    }
}

/// The report title line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

/// Heading levels used by the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingLevel {
    /// Report-level headings: executive summary, IMRAD sections, references.
    Section,
    /// Headings found inside chat turn content.
    SubHeading,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heading {
    pub level: HeadingLevel,
    pub content: Vec<TextRun>,
    pub alignment: Alignment,
    /// Rule drawn under the heading (IMRAD section headers).
    pub underline: bool,
}

impl Heading {
    pub fn text(&self) -> String {
        runs_to_text(&self.content)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

/// A paragraph of styled runs, optionally rendered as a bullet item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paragraph {
    pub content: Vec<TextRun>,
    pub bullet: bool,
    pub alignment: Alignment,
}

impl Paragraph {
    pub fn text(&self) -> String {
        runs_to_text(&self.content)
    }
}

/// A span of text with uniform styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextRun {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    /// Starts on a new line within the same paragraph.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub line_break: bool,
}

impl TextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
            line_break: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
            italic: false,
            line_break: false,
        }
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: true,
            line_break: false,
        }
    }

    pub fn on_new_line(mut self) -> Self {
        self.line_break = true;
        self
    }
}

/// Represents a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub rows: Vec<TableRow>,
}

impl Table {
    pub fn header(&self) -> Option<&TableRow> {
        self.rows.first().filter(|row| row.header)
    }
}

/// Represents a table row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub cells: Vec<String>,
    pub header: bool,
}

/// Fenced content carried verbatim into the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeBlock {
    /// Tag found after the opening fence, if any.
    pub language: Option<String>,
    pub content: String,
    /// Diagram specifications get their own label in the document.
    pub diagram: bool,
}

impl CodeBlock {
    /// Whether the block carries a chart configuration.
    pub fn is_chart(&self) -> bool {
        self.language.as_deref() == Some(crate::common::segments::CHART_TAG)
    }
}

/// One numbered entry of the cited references list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceEntry {
    pub index: usize,
    pub uri: String,
}

/// Plain text of a run sequence; line breaks become a single space.
pub fn runs_to_text(runs: &[TextRun]) -> String {
    let mut text = String::new();
    for run in runs {
        if run.line_break && !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&run.text);
    }
    text
}
