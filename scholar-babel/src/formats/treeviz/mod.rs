//! Treeviz formatter for assembled reports
//!
//! A visual outline of the report, one node per line, used by `scholar inspect` to check
//! what an export will contain before packaging it.
//!
//! The report itself is flat. Treeviz nests every node under the closest preceding
//! section heading so the IMRAD structure is visible:
//!
//!     ⧉ Document "Urban heat" (9 nodes)
//!     ├─ ⊤ ScholarSync Academic Analysis Report
//!     ├─ ¶ URBAN HEAT Subject Area: Systemic Re…
//!     ├─ § METHODS
//!     │ ├─ ≡ Design
//!     │ └─ ▦ 2 rows × 2 columns
//!     │   ├─ ⊟ Year | Count
//!     │   └─ ↵ 2020 | 45
//!     └─ § CITED REFERENCES
//!       └─ † [1] https://doi.org/10.1/x
//!
//! Text labels are truncated to 40 characters. Chart blocks are parsed: a valid one shows
//! its summary, an invalid one the full parse error.

use super::icons::get_icon;
use crate::common::chart::parse_chart_config;
use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::{CodeBlock, DocNode, Document, HeadingLevel, Table};

const LABEL_MAX_CHARS: usize = 40;

struct TreeNode {
    icon: &'static str,
    label: String,
    children: Vec<TreeNode>,
}

impl TreeNode {
    fn leaf(icon: &'static str, label: String) -> Self {
        Self {
            icon,
            label,
            children: Vec::new(),
        }
    }
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= LABEL_MAX_CHARS {
        text.to_string()
    } else {
        let head: String = text.chars().take(LABEL_MAX_CHARS).collect();
        format!("{head}…")
    }
}

fn table_node(table: &Table) -> TreeNode {
    let columns = table.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0);
    let children = table
        .rows
        .iter()
        .map(|row| {
            let icon = get_icon(if row.header { "HeaderRow" } else { "Row" });
            TreeNode::leaf(icon, truncate(&row.cells.join(" | ")))
        })
        .collect();
    TreeNode {
        icon: get_icon("Table"),
        label: format!("{} rows × {} columns", table.rows.len(), columns),
        children,
    }
}

fn code_node(block: &CodeBlock) -> TreeNode {
    let lines = block.content.lines().count();
    if block.diagram {
        return TreeNode::leaf(get_icon("Diagram"), format!("diagram ({lines} lines)"));
    }
    if block.is_chart() {
        let label = match parse_chart_config(&block.content) {
            Ok(config) => config.summary(),
            Err(err) => format!("invalid chart: {err}"),
        };
        return TreeNode::leaf(get_icon("Chart"), label);
    }
    let language = block.language.as_deref().unwrap_or("data");
    TreeNode::leaf(get_icon("Code"), format!("{language} ({lines} lines)"))
}

fn leaf_for(node: &DocNode) -> TreeNode {
    match node {
        DocNode::Title(title) => TreeNode::leaf(get_icon("Title"), truncate(&title.text)),
        DocNode::Heading(heading) => {
            let kind = match heading.level {
                HeadingLevel::Section => "Section",
                HeadingLevel::SubHeading => "SubHeading",
            };
            TreeNode::leaf(get_icon(kind), truncate(&heading.text()))
        }
        DocNode::Paragraph(para) => {
            let kind = if para.bullet { "Bullet" } else { "Paragraph" };
            TreeNode::leaf(get_icon(kind), truncate(&para.text()))
        }
        DocNode::Table(table) => table_node(table),
        DocNode::CodeBlock(block) => code_node(block),
        DocNode::Reference(entry) => TreeNode::leaf(
            get_icon("Reference"),
            format!("[{}] {}", entry.index, entry.uri),
        ),
    }
}

/// Group the flat node sequence under section headings.
fn build_tree(doc: &Document) -> Vec<TreeNode> {
    let mut roots: Vec<TreeNode> = Vec::new();
    let mut in_section = false;

    for node in &doc.children {
        let tree_node = leaf_for(node);
        let opens_section = matches!(
            node,
            DocNode::Heading(h) if h.level == HeadingLevel::Section
        );

        if opens_section {
            roots.push(tree_node);
            in_section = true;
        } else if in_section {
            if let Some(section) = roots.last_mut() {
                section.children.push(tree_node);
            }
        } else {
            roots.push(tree_node);
        }
    }

    roots
}

fn format_nodes(nodes: &[TreeNode], prefix: &str, output: &mut String) {
    for (idx, node) in nodes.iter().enumerate() {
        let is_last = idx == nodes.len() - 1;
        let connector = if is_last { "└─" } else { "├─" };
        output.push_str(&format!("{prefix}{connector} {} {}\n", node.icon, node.label));

        let child_prefix = format!("{prefix}{}", if is_last { "  " } else { "│ " });
        format_nodes(&node.children, &child_prefix, output);
    }
}

pub fn to_treeviz_str(doc: &Document) -> String {
    let mut output = format!(
        "{} Document \"{}\" ({} nodes)\n",
        get_icon("Document"),
        doc.topic,
        doc.children.len()
    );
    format_nodes(&build_tree(doc), "", &mut output);
    output
}

/// Format implementation for treeviz format
pub struct TreevizFormat;

impl Format for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Visual outline of the report with Unicode icons"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tree", "treeviz"]
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_treeviz_str(doc))
    }
}
