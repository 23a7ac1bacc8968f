//! Body serializer: report nodes to WordprocessingML.

use super::parts::{link_rid, xml_escape, FOOTER_RID, HEADER_RID, R_NS, W_NS, XML_DECL};
use super::DocxOptions;
use crate::ir::nodes::{
    Alignment, CodeBlock, DocNode, Document, Heading, HeadingLevel, Paragraph, ReferenceEntry,
    Table, TextRun,
};

const BULLET_NUM_ID: u32 = 1;
const RULE_COLOR: &str = "1E293B";
const GRID_COLOR: &str = "CBD5E1";
const CODE_COLOR: &str = "2D3748";
const LINK_COLOR: &str = "2563EB";
const DIAGRAM_LABEL: &str = "Visual Model Specification:";
const CODE_LABEL: &str = "Source Code/Data:";

#[derive(Debug, Clone, Copy, Default)]
struct RunStyle<'a> {
    bold: bool,
    italic: bool,
    underline: bool,
    size: Option<u32>,
    color: Option<&'a str>,
    font: Option<&'a str>,
}

impl<'a> RunStyle<'a> {
    fn from_text_run(run: &TextRun) -> Self {
        RunStyle {
            bold: run.bold,
            italic: run.italic,
            ..Default::default()
        }
    }

    fn properties(&self) -> String {
        let mut out = String::new();
        if let Some(font) = self.font {
            let font = xml_escape(font);
            out.push_str(&format!(
                r#"<w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:cs="{font}"/>"#
            ));
        }
        if self.bold {
            out.push_str("<w:b/>");
        }
        if self.italic {
            out.push_str("<w:i/>");
        }
        if let Some(color) = self.color {
            out.push_str(&format!(r#"<w:color w:val="{color}"/>"#));
        }
        if let Some(size) = self.size {
            out.push_str(&format!(r#"<w:sz w:val="{size}"/>"#));
        }
        if self.underline {
            out.push_str(r#"<w:u w:val="single"/>"#);
        }
        if out.is_empty() {
            out
        } else {
            format!("<w:rPr>{out}</w:rPr>")
        }
    }
}

fn run_xml(text: &str, style: RunStyle<'_>) -> String {
    format!(
        r#"<w:r>{}<w:t xml:space="preserve">{}</w:t></w:r>"#,
        style.properties(),
        xml_escape(text)
    )
}

fn break_xml(style: RunStyle<'_>) -> String {
    format!("<w:r>{}<w:br/></w:r>", style.properties())
}

fn jc(alignment: Alignment) -> Option<&'static str> {
    match alignment {
        Alignment::Left => None,
        Alignment::Center => Some("center"),
        Alignment::Right => Some("right"),
        Alignment::Justify => Some("both"),
    }
}

/// Paragraph properties, written in schema order.
#[derive(Default)]
struct ParaProps<'a> {
    style: Option<&'a str>,
    keep_next: bool,
    bullet: bool,
    bottom_rule: bool,
    before: u32,
    after: u32,
    hanging_indent: Option<u32>,
    alignment: Option<&'static str>,
}

impl ParaProps<'_> {
    fn xml(&self) -> String {
        let mut out = String::from("<w:pPr>");
        if let Some(style) = self.style {
            out.push_str(&format!(r#"<w:pStyle w:val="{style}"/>"#));
        }
        if self.keep_next {
            out.push_str("<w:keepNext/>");
        }
        if self.bullet {
            out.push_str(&format!(
                r#"<w:numPr><w:ilvl w:val="0"/><w:numId w:val="{BULLET_NUM_ID}"/></w:numPr>"#
            ));
        }
        if self.bottom_rule {
            out.push_str(&format!(
                r#"<w:pBdr><w:bottom w:val="single" w:sz="12" w:space="1" w:color="{RULE_COLOR}"/></w:pBdr>"#
            ));
        }
        out.push_str(&format!(
            r#"<w:spacing w:before="{}" w:after="{}"/>"#,
            self.before, self.after
        ));
        if let Some(hanging) = self.hanging_indent {
            out.push_str(&format!(
                r#"<w:ind w:left="{hanging}" w:hanging="{hanging}"/>"#
            ));
        }
        if let Some(alignment) = self.alignment {
            out.push_str(&format!(r#"<w:jc w:val="{alignment}"/>"#));
        }
        out.push_str("</w:pPr>");
        out
    }
}

fn runs_xml(runs: &[TextRun]) -> String {
    let mut out = String::new();
    for run in runs {
        let style = RunStyle::from_text_run(run);
        if run.line_break {
            out.push_str(&break_xml(style));
        }
        out.push_str(&run_xml(&run.text, style));
    }
    out
}

fn title_xml(text: &str) -> String {
    let props = ParaProps {
        style: Some("Title"),
        after: 200,
        alignment: Some("center"),
        ..Default::default()
    };
    format!(
        "<w:p>{}{}</w:p>",
        props.xml(),
        run_xml(text, RunStyle::default())
    )
}

fn heading_xml(heading: &Heading) -> String {
    let props = match heading.level {
        HeadingLevel::Section => ParaProps {
            style: Some("Heading1"),
            bottom_rule: heading.underline,
            before: if heading.underline { 600 } else { 400 },
            after: 300,
            alignment: jc(heading.alignment),
            ..Default::default()
        },
        HeadingLevel::SubHeading => ParaProps {
            style: Some("Heading2"),
            before: 300,
            after: 120,
            alignment: jc(heading.alignment),
            ..Default::default()
        },
    };
    format!("<w:p>{}{}</w:p>", props.xml(), runs_xml(&heading.content))
}

fn paragraph_xml(para: &Paragraph) -> String {
    let props = ParaProps {
        bullet: para.bullet,
        after: 120,
        alignment: jc(para.alignment),
        ..Default::default()
    };
    format!("<w:p>{}{}</w:p>", props.xml(), runs_xml(&para.content))
}

fn cell_borders(kind: &str, size: u32) -> String {
    let mut out = String::from("<w:tcBorders>");
    for side in ["top", "left", "bottom", "right"] {
        out.push_str(&format!(
            r#"<w:{side} w:val="{kind}" w:sz="{size}" w:space="0" w:color="{GRID_COLOR}"/>"#
        ));
    }
    out.push_str("</w:tcBorders>");
    out
}

fn cell_margins(twips: u32) -> String {
    let mut out = String::from("<w:tcMar>");
    for side in ["top", "left", "bottom", "right"] {
        out.push_str(&format!(r#"<w:{side} w:w="{twips}" w:type="dxa"/>"#));
    }
    out.push_str("</w:tcMar>");
    out
}

const SHADING: &str = r#"<w:shd w:val="clear" w:color="auto" w:fill="F8FAFC"/>"#;

fn grid_xml(columns: usize) -> String {
    format!("<w:tblGrid>{}</w:tblGrid>", "<w:gridCol/>".repeat(columns.max(1)))
}

fn table_xml(table: &Table) -> String {
    let columns = table.rows.iter().map(|r| r.cells.len()).max().unwrap_or(1);
    let mut out = String::from(
        r#"<w:tbl><w:tblPr><w:tblW w:w="5000" w:type="pct"/><w:tblLayout w:type="autofit"/></w:tblPr>"#,
    );
    out.push_str(&grid_xml(columns));

    for row in &table.rows {
        out.push_str("<w:tr>");
        for cell in &row.cells {
            out.push_str("<w:tc><w:tcPr>");
            out.push_str(&cell_borders("single", 4));
            if row.header {
                out.push_str(SHADING);
            }
            out.push_str(&cell_margins(120));
            out.push_str(r#"<w:vAlign w:val="center"/></w:tcPr>"#);

            let props = ParaProps {
                alignment: Some("center"),
                ..Default::default()
            };
            let style = RunStyle {
                bold: row.header,
                size: Some(20),
                ..Default::default()
            };
            out.push_str(&format!(
                "<w:p>{}{}</w:p></w:tc>",
                props.xml(),
                run_xml(cell, style)
            ));
        }
        // A row without cells is invalid OOXML.
        if row.cells.is_empty() {
            out.push_str("<w:tc><w:p/></w:tc>");
        }
        out.push_str("</w:tr>");
    }

    out.push_str("</w:tbl>");
    out.push_str(&spacer());
    out
}

/// Empty paragraph keeping two consecutive tables apart.
fn spacer() -> String {
    r#"<w:p><w:pPr><w:spacing w:before="0" w:after="120"/></w:pPr></w:p>"#.to_string()
}

fn code_block_xml(block: &CodeBlock, options: &DocxOptions) -> String {
    let label = if block.diagram {
        DIAGRAM_LABEL
    } else {
        CODE_LABEL
    };
    let label_props = ParaProps {
        keep_next: true,
        before: 200,
        after: 80,
        ..Default::default()
    };
    let label_style = RunStyle {
        bold: true,
        size: Some(18),
        ..Default::default()
    };

    let code_style = RunStyle {
        italic: true,
        size: Some(18),
        color: Some(CODE_COLOR),
        font: Some(&options.code_font),
        ..Default::default()
    };
    let mut code_runs = String::new();
    for (idx, line) in block.content.lines().enumerate() {
        if idx > 0 {
            code_runs.push_str(&break_xml(code_style));
        }
        code_runs.push_str(&run_xml(line, code_style));
    }

    format!(
        r#"<w:p>{label_props}{label_run}</w:p><w:tbl><w:tblPr><w:tblW w:w="5000" w:type="pct"/></w:tblPr>{grid}<w:tr><w:tc><w:tcPr>{borders}{SHADING}{margins}</w:tcPr><w:p>{code_props}{code_runs}</w:p></w:tc></w:tr></w:tbl>{spacer}"#,
        label_props = label_props.xml(),
        label_run = run_xml(label, label_style),
        borders = cell_borders("dashDotStroked", 2),
        margins = cell_margins(200),
        grid = grid_xml(1),
        code_props = ParaProps::default().xml(),
        spacer = spacer(),
    )
}

fn reference_xml(entry: &ReferenceEntry, rid: &str) -> String {
    let props = ParaProps {
        after: 120,
        hanging_indent: Some(360),
        ..Default::default()
    };
    let marker = RunStyle {
        bold: true,
        size: Some(20),
        ..Default::default()
    };
    let link = RunStyle {
        underline: true,
        size: Some(18),
        color: Some(LINK_COLOR),
        ..Default::default()
    };
    format!(
        r#"<w:p>{}{}<w:hyperlink r:id="{rid}" w:history="1">{}</w:hyperlink></w:p>"#,
        props.xml(),
        run_xml(&format!("[{}] ", entry.index), marker),
        run_xml(&entry.uri, link),
    )
}

/// Hyperlink targets of the document, in the order their relationship ids are assigned.
pub fn link_targets(doc: &Document) -> Vec<&str> {
    doc.references().map(|r| r.uri.as_str()).collect()
}

/// The `word/document.xml` part.
pub fn document_xml(doc: &Document, options: &DocxOptions) -> String {
    let mut body = String::new();
    let mut link_idx = 0;

    for node in &doc.children {
        match node {
            DocNode::Title(title) => body.push_str(&title_xml(&title.text)),
            DocNode::Heading(heading) => body.push_str(&heading_xml(heading)),
            DocNode::Paragraph(para) => body.push_str(&paragraph_xml(para)),
            DocNode::Table(table) => body.push_str(&table_xml(table)),
            DocNode::CodeBlock(block) => body.push_str(&code_block_xml(block, options)),
            DocNode::Reference(entry) => {
                body.push_str(&reference_xml(entry, &link_rid(link_idx)));
                link_idx += 1;
            }
        }
    }

    let margin = options.margin_twips;
    format!(
        r#"{XML_DECL}
<w:document xmlns:w="{W_NS}" xmlns:r="{R_NS}">
<w:body>{body}<w:sectPr><w:headerReference w:type="default" r:id="{HEADER_RID}"/><w:footerReference w:type="default" r:id="{FOOTER_RID}"/><w:pgSz w:w="12240" w:h="15840"/><w:pgMar w:top="{margin}" w:right="{margin}" w:bottom="{margin}" w:left="{margin}" w:header="708" w:footer="708" w:gutter="0"/></w:sectPr></w:body>
</w:document>"#
    )
}
