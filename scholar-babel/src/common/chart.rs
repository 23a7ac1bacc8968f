//! Chart configurations carried in `json-chart` fenced blocks
//!
//! Charts are a display concern: the report keeps the raw JSON as a data block. Parsing is
//! only used to validate the block and to summarise it when inspecting a transcript.

use crate::ir::nodes::Document;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub title: String,
    pub data: Vec<DataPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_axis_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_axis_label: Option<String>,
}

#[derive(Debug, Error)]
#[error("Error parsing visualization data: {0}")]
pub struct ChartError(#[from] serde_json::Error);

/// Parse and validate a chart configuration.
pub fn parse_chart_config(source: &str) -> Result<ChartConfig, ChartError> {
    Ok(serde_json::from_str(source)?)
}

impl ChartConfig {
    /// One-line description used by text renderers.
    pub fn summary(&self) -> String {
        let kind = match self.kind {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
        };
        format!("{kind} chart \"{}\" ({} points)", self.title, self.data.len())
    }
}

/// Every chart block of the document that fails to parse, in document order.
pub fn chart_errors(doc: &Document) -> Vec<ChartError> {
    doc.code_blocks()
        .filter(|block| block.is_chart())
        .filter_map(|block| parse_chart_config(&block.content).err())
        .collect()
}
