//! Conversation data model
//!
//! Chat turns are produced once per request/response cycle and never mutated afterwards.
//! A [`Transcript`] is the serialized form of a conversation plus an optional export
//! selection; it is what the CLI reads and writes.

use crate::common::sections::Section;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Who produced a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// Category tag attached to model turns, one per kind of analysis request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResearchMode {
    #[serde(alias = "retreive")]
    Retrieve,
    Methodology,
    Framework,
    DesignMap,
    Bibliometric,
    Gaps,
}

impl ResearchMode {
    pub const ALL: [ResearchMode; 6] = [
        ResearchMode::Retrieve,
        ResearchMode::Methodology,
        ResearchMode::Framework,
        ResearchMode::DesignMap,
        ResearchMode::Bibliometric,
        ResearchMode::Gaps,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResearchMode::Retrieve => "retrieve",
            ResearchMode::Methodology => "methodology",
            ResearchMode::Framework => "framework",
            ResearchMode::DesignMap => "design_map",
            ResearchMode::Bibliometric => "bibliometric",
            ResearchMode::Gaps => "gaps",
        }
    }

    /// Parse a tag as written in transcripts or on the command line.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "retreive" => Some(ResearchMode::Retrieve),
            _ => Self::ALL.into_iter().find(|mode| mode.as_str() == tag),
        }
    }
}

impl fmt::Display for ResearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub id: String,
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<ResearchMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            role: Role::User,
            content: content.into(),
            mode: None,
            sources: None,
            created_at: Utc::now(),
        }
    }

    pub fn model(
        content: impl Into<String>,
        mode: Option<ResearchMode>,
        sources: Option<Vec<String>>,
    ) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            role: Role::Model,
            content: content.into(),
            mode,
            sources,
            created_at: Utc::now(),
        }
    }

    pub fn is_model(&self) -> bool {
        self.role == Role::Model
    }
}

/// Places one turn into one report section for a single export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionAssignment {
    pub turn_id: String,
    pub section: Section,
}

impl SectionAssignment {
    pub fn new(turn_id: impl Into<String>, section: Section) -> Self {
        Self {
            turn_id: turn_id.into(),
            section,
        }
    }
}

/// Serialized conversation, optionally carrying an explicit export selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default)]
    pub turns: Vec<ChatTurn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selections: Option<Vec<SectionAssignment>>,
}

impl Transcript {
    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
