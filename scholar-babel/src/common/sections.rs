//! Report sections and the mode → section mapping
//!
//! Reports follow the IMRAD layout. Every selected turn lands in exactly one section,
//! either one of the five canonical ones, a user supplied custom heading, or the
//! `Uncategorized` bucket. Sections render in a fixed order:
//!
//!     Introduction, Methods, Results, Discussion, Conclusion,
//!     <custom sections in first-seen order>,
//!     Uncategorized

use crate::model::{ChatTurn, ResearchMode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A report section.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Section {
    Introduction,
    Methods,
    Results,
    Discussion,
    Conclusion,
    Custom(String),
    Uncategorized,
}

impl Section {
    /// The five IMRAD sections, in rendering order.
    pub const CANONICAL: [Section; 5] = [
        Section::Introduction,
        Section::Methods,
        Section::Results,
        Section::Discussion,
        Section::Conclusion,
    ];

    /// Interpret a section name as offered by the export selection.
    ///
    /// Matching is exact; anything that is not a canonical name or `Uncategorized`
    /// becomes a custom section.
    pub fn parse(name: &str) -> Self {
        match name {
            "Introduction" => Section::Introduction,
            "Methods" => Section::Methods,
            "Results" => Section::Results,
            "Discussion" => Section::Discussion,
            "Conclusion" => Section::Conclusion,
            "Uncategorized" => Section::Uncategorized,
            other => Section::Custom(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Section::Introduction => "Introduction",
            Section::Methods => "Methods",
            Section::Results => "Results",
            Section::Discussion => "Discussion",
            Section::Conclusion => "Conclusion",
            Section::Custom(name) => name,
            Section::Uncategorized => "Uncategorized",
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Section::Custom(_))
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for Section {
    fn from(name: String) -> Self {
        Section::parse(&name)
    }
}

impl From<&str> for Section {
    fn from(name: &str) -> Self {
        Section::parse(name)
    }
}

impl From<Section> for String {
    fn from(section: Section) -> Self {
        section.name().to_string()
    }
}

/// Map a turn's category tag to its default report section.
pub fn map_mode_to_section(mode: Option<ResearchMode>) -> Section {
    match mode {
        Some(ResearchMode::Retrieve) => Section::Introduction,
        Some(ResearchMode::Methodology) => Section::Methods,
        Some(ResearchMode::DesignMap) | Some(ResearchMode::Bibliometric) => Section::Results,
        Some(ResearchMode::Framework) | Some(ResearchMode::Gaps) => Section::Discussion,
        None => Section::Uncategorized,
    }
}

/// Default section for a turn in the export selection.
pub fn default_section(turn: &ChatTurn) -> Section {
    map_mode_to_section(turn.mode)
}

/// Order the given (possibly repeated) sections for rendering.
///
/// Each section appears once. Canonical sections come first in IMRAD order, custom
/// sections follow in the order they were first seen, `Uncategorized` closes the list.
pub fn order_sections<'a, I>(sections: I) -> Vec<Section>
where
    I: IntoIterator<Item = &'a Section>,
{
    let mut seen_custom: Vec<Section> = Vec::new();
    let mut present = [false; 5];
    let mut has_uncategorized = false;

    for section in sections {
        match section {
            Section::Custom(_) => {
                if !seen_custom.contains(section) {
                    seen_custom.push(section.clone());
                }
            }
            Section::Uncategorized => has_uncategorized = true,
            canonical => {
                if let Some(idx) = Section::CANONICAL.iter().position(|s| s == canonical) {
                    present[idx] = true;
                }
            }
        }
    }

    let mut ordered: Vec<Section> = Section::CANONICAL
        .iter()
        .zip(present)
        .filter(|(_, used)| *used)
        .map(|(section, _)| section.clone())
        .collect();
    ordered.extend(seen_custom);
    if has_uncategorized {
        ordered.push(Section::Uncategorized);
    }
    ordered
}
