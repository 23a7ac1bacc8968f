//! Word (docx) packaging
//!
//! Writes the report as an OOXML package. The package is built by hand from a small set
//! of parts, zipped in memory:
//!
//!     [Content_Types].xml
//!     _rels/.rels
//!     word/document.xml            body, see ./serializer.rs
//!     word/styles.xml              Title, Heading1, Heading2 on a Normal base
//!     word/numbering.xml           the bullet list definition
//!     word/header1.xml             "<prefix> | <topic> | <label>", right aligned
//!     word/footer1.xml             generation date and PAGE / NUMPAGES fields
//!     word/_rels/document.xml.rels parts above plus one hyperlink per cited reference
//!
//! Pagination is left to the word processor; page numbers are live fields.
//!
//! Extra parameters accepted by [`Format::serialize_with_options`]:
//!
//!     prefix               brand shown in the running header
//!     confidential-label   last element of the running header
//!     date                 generation date, YYYY-MM-DD (defaults to today)
//!     margin               page margin in twips

mod parts;
mod serializer;

use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};
use crate::ir::nodes::Document;
use chrono::{Local, NaiveDate};
use std::collections::HashMap;
use std::io::{Cursor, Write};
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub use serializer::document_xml;

/// Layout and wording of the generated package.
#[derive(Debug, Clone, PartialEq)]
pub struct DocxOptions {
    pub prefix: String,
    pub confidential_label: String,
    /// Page margin on every side, in twentieths of a point.
    pub margin_twips: u32,
    pub body_font: String,
    pub code_font: String,
    /// Date printed in the footer. `None` means the day of serialization.
    pub generated_on: Option<NaiveDate>,
}

impl Default for DocxOptions {
    fn default() -> Self {
        Self {
            prefix: "ScholarSync".to_string(),
            confidential_label: "Confidential Research Analysis".to_string(),
            margin_twips: 1440,
            body_font: "Calibri".to_string(),
            code_font: "Consolas".to_string(),
            generated_on: None,
        }
    }
}

impl DocxOptions {
    /// Apply per-call parameters on top of these options.
    pub fn with_params(&self, params: &HashMap<String, String>) -> Result<Self, FormatError> {
        let mut options = self.clone();
        for (key, value) in params {
            match key.as_str() {
                "prefix" => options.prefix = value.clone(),
                "confidential-label" => options.confidential_label = value.clone(),
                "date" => {
                    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| {
                        FormatError::SerializationError(format!(
                            "Invalid date '{value}' (expected YYYY-MM-DD): {e}"
                        ))
                    })?;
                    options.generated_on = Some(date);
                }
                "margin" => {
                    options.margin_twips = value.parse().map_err(|_| {
                        FormatError::SerializationError(format!(
                            "Invalid margin '{value}' (expected twips)"
                        ))
                    })?;
                }
                other => {
                    return Err(FormatError::NotSupported(format!(
                        "Format 'docx' does not support parameter '{other}'"
                    )))
                }
            }
        }
        Ok(options)
    }

    fn footer_date(&self) -> String {
        self.generated_on
            .unwrap_or_else(|| Local::now().date_naive())
            .format("%B %-d, %Y")
            .to_string()
    }
}

/// Format implementation producing `.docx` packages.
#[derive(Debug, Default)]
pub struct DocxFormat {
    options: DocxOptions,
}

impl DocxFormat {
    pub fn new(options: DocxOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DocxOptions {
        &self.options
    }
}

impl Format for DocxFormat {
    fn name(&self) -> &str {
        "docx"
    }

    fn description(&self) -> &str {
        "Word document with running header, page-numbered footer and cited references"
    }

    fn file_extensions(&self) -> &[&str] {
        &["docx"]
    }

    fn serialize(&self, _doc: &Document) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(
            "DOCX serialization produces binary output".to_string(),
        ))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        params: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        let options = self.options.with_params(params)?;
        write_package(doc, &options).map(SerializedDocument::Binary)
    }
}

/// Build the complete package in memory.
pub fn write_package(doc: &Document, options: &DocxOptions) -> Result<Vec<u8>, FormatError> {
    let links = serializer::link_targets(doc);
    let entries = [
        ("[Content_Types].xml", parts::content_types_xml()),
        ("_rels/.rels", parts::package_rels_xml()),
        ("word/document.xml", serializer::document_xml(doc, options)),
        ("word/styles.xml", parts::styles_xml(options)),
        ("word/numbering.xml", parts::numbering_xml()),
        ("word/header1.xml", parts::header_xml(options, &doc.topic)),
        ("word/footer1.xml", parts::footer_xml(&options.footer_date())),
        (
            "word/_rels/document.xml.rels",
            parts::document_rels_xml(&links),
        ),
    ];

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let opts = SimpleFileOptions::default();
    for (name, content) in &entries {
        zip.start_file(*name, opts)?;
        zip.write_all(content.as_bytes())?;
    }
    let bytes = zip.finish()?.into_inner();

    debug!(
        bytes = bytes.len(),
        references = links.len(),
        "packaged docx"
    );
    Ok(bytes)
}
