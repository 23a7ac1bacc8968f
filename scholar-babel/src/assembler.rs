//! Report assembly
//!
//! Turns an export selection into the flat node sequence every output format consumes:
//!
//!     Title
//!     Topic + subtitle
//!     [EXECUTIVE SUMMARY + abstract]          when the abstract is non-empty
//!     For each used section, in canonical order:
//!         SECTION NAME (underlined)
//!         content of every assigned turn, in selection order
//!     [CITED REFERENCES + numbered entries]   when any selected turn has sources
//!
//! Turn content goes through the segment parser, the table reconstructor and the inline
//! style parser (see ../common). Assembly is pure and never fails once the selection is
//! resolved.

use crate::common::chart::parse_chart_config;
use crate::common::inline::{parse_inline, strip_markers};
use crate::common::sections::{default_section, order_sections, Section};
use crate::common::segments::{parse_segments, FenceKind, Segment};
use crate::error::AssemblyError;
use crate::ir::nodes::{
    Alignment, CodeBlock, DocNode, Document, Heading, HeadingLevel, Paragraph, ReferenceEntry,
    TextRun, Title,
};
use crate::model::{ChatTurn, ResearchMode, SectionAssignment};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

pub const SUMMARY_HEADING: &str = "EXECUTIVE SUMMARY";
pub const REFERENCES_HEADING: &str = "CITED REFERENCES";

const ABSTRACT_LINES: usize = 3;

/// Fixed wording of the report front matter.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    pub title: String,
    pub subtitle: String,
    /// Used when the topic is empty.
    pub default_topic: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: "ScholarSync Academic Analysis Report".to_string(),
            subtitle: "Subject Area: Systemic Review & Academic Synthesis".to_string(),
            default_topic: "Research Analysis".to_string(),
        }
    }
}

impl ReportOptions {
    /// The topic that will actually be printed.
    pub fn effective_topic<'a>(&'a self, topic: &'a str) -> &'a str {
        let trimmed = topic.trim();
        if trimmed.is_empty() {
            &self.default_topic
        } else {
            trimmed
        }
    }
}

/// A chat turn placed into a report section.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'a> {
    pub turn: &'a ChatTurn,
    pub section: Section,
}

/// Resolve section assignments against the conversation, keeping assignment order.
///
/// A turn is selected at most once. When it is assigned again, the last section wins and the
/// turn stays at the position of its first assignment.
pub fn resolve_selections<'a>(
    turns: &'a [ChatTurn],
    assignments: &[SectionAssignment],
) -> Result<Vec<Selection<'a>>, AssemblyError> {
    let by_id: HashMap<&str, &ChatTurn> = turns.iter().map(|t| (t.id.as_str(), t)).collect();
    let mut selections: Vec<Selection<'a>> = Vec::with_capacity(assignments.len());
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for assignment in assignments {
        let turn = by_id
            .get(assignment.turn_id.as_str())
            .copied()
            .ok_or_else(|| AssemblyError::UnknownTurn(assignment.turn_id.clone()))?;
        match positions.get(turn.id.as_str()) {
            Some(&index) => selections[index].section = assignment.section.clone(),
            None => {
                positions.insert(turn.id.as_str(), selections.len());
                selections.push(Selection {
                    turn,
                    section: assignment.section.clone(),
                });
            }
        }
    }
    Ok(selections)
}

/// Every model turn, each in its default section.
pub fn default_selections(turns: &[ChatTurn]) -> Vec<Selection<'_>> {
    turns
        .iter()
        .filter(|turn| turn.is_model())
        .map(|turn| Selection {
            turn,
            section: default_section(turn),
        })
        .collect()
}

/// Build the executive summary from the first retrieval turn.
///
/// Keeps the first three non-empty lines, joined with a space, with heading, emphasis
/// and code markers removed. Empty when no retrieval turn exists.
pub fn derive_abstract(turns: &[ChatTurn]) -> String {
    let Some(turn) = turns
        .iter()
        .find(|t| t.is_model() && t.mode == Some(ResearchMode::Retrieve))
    else {
        return String::new();
    };

    let lines: Vec<&str> = turn
        .content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(ABSTRACT_LINES)
        .collect();
    strip_markers(&lines.join(" "))
}

/// Assemble the report for the given topic, abstract and selection.
pub fn assemble(
    topic: &str,
    abstract_text: &str,
    selections: &[Selection<'_>],
    options: &ReportOptions,
) -> Document {
    let topic = options.effective_topic(topic).to_string();
    let mut children = vec![
        DocNode::Title(Title {
            text: options.title.clone(),
        }),
        DocNode::Paragraph(Paragraph {
            content: vec![
                TextRun::bold(topic.to_uppercase()),
                TextRun::italic(options.subtitle.clone()).on_new_line(),
            ],
            bullet: false,
            alignment: Alignment::Center,
        }),
    ];

    if !abstract_text.is_empty() {
        children.push(section_heading(SUMMARY_HEADING, Alignment::Center, false));
        children.push(DocNode::Paragraph(Paragraph {
            content: vec![TextRun::italic(abstract_text)],
            bullet: false,
            alignment: Alignment::Justify,
        }));
    }

    let ordered = order_sections(selections.iter().map(|s| &s.section));
    for section in &ordered {
        let members: Vec<&ChatTurn> = selections
            .iter()
            .filter(|s| &s.section == section)
            .map(|s| s.turn)
            .collect();
        debug!(section = %section, turns = members.len(), "assembling section");

        children.push(section_heading(
            &section.name().to_uppercase(),
            Alignment::Left,
            true,
        ));
        for turn in members {
            children.extend(render_turn(turn));
        }
    }

    let sources = collect_sources(selections);
    if !sources.is_empty() {
        children.push(section_heading(REFERENCES_HEADING, Alignment::Left, false));
        children.extend(sources.into_iter().enumerate().map(|(idx, uri)| {
            DocNode::Reference(ReferenceEntry {
                index: idx + 1,
                uri: uri.to_string(),
            })
        }));
    }

    info!(
        topic = %topic,
        sections = ordered.len(),
        nodes = children.len(),
        "assembled report"
    );

    Document { topic, children }
}

/// Convert the content of one turn into document nodes.
pub fn render_turn(turn: &ChatTurn) -> Vec<DocNode> {
    parse_segments(&turn.content)
        .into_iter()
        .map(|segment| match segment {
            Segment::Heading(text) => DocNode::Heading(Heading {
                level: HeadingLevel::SubHeading,
                content: parse_inline(&text),
                alignment: Alignment::Left,
                underline: false,
            }),
            Segment::Paragraph(text) => DocNode::Paragraph(Paragraph {
                content: parse_inline(&text),
                bullet: false,
                alignment: Alignment::Left,
            }),
            Segment::Bullet(text) => DocNode::Paragraph(Paragraph {
                content: parse_inline(&text),
                bullet: true,
                alignment: Alignment::Left,
            }),
            Segment::Table(table) => DocNode::Table(table),
            Segment::Fenced(block) => {
                if block.kind == FenceKind::Chart {
                    if let Err(err) = parse_chart_config(&block.content) {
                        warn!(turn = %turn.id, "chart block kept as text: {err}");
                    }
                }
                DocNode::CodeBlock(CodeBlock {
                    language: block.language,
                    content: block.content,
                    diagram: block.kind == FenceKind::Diagram,
                })
            }
        })
        .collect()
}

fn section_heading(text: &str, alignment: Alignment, underline: bool) -> DocNode {
    DocNode::Heading(Heading {
        level: HeadingLevel::Section,
        content: vec![TextRun::plain(text)],
        alignment,
        underline,
    })
}

/// Unique source URIs across the selection, in discovery order.
fn collect_sources<'a>(selections: &[Selection<'a>]) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    selections
        .iter()
        .filter_map(|s| s.turn.sources.as_deref())
        .flatten()
        .map(String::as_str)
        .filter(|uri| seen.insert(*uri))
        .collect()
}
