//! Format trait definition
//!
//! Every output format implements [`Format`]. Formats only serialize: the assembled
//! [`Document`] is the single input, produced by the assembler and never parsed back.

use crate::error::FormatError;
use crate::ir::nodes::Document;
use std::collections::HashMap;

/// Serialized output produced by a [`Format`] implementation.
#[derive(Debug)]
pub enum SerializedDocument {
    /// UTF-8 text output (treeviz, json)
    Text(String),
    /// Binary output (docx packages)
    Binary(Vec<u8>),
}

impl SerializedDocument {
    /// Consume the serialized output and return the underlying bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            SerializedDocument::Text(text) => text.into_bytes(),
            SerializedDocument::Binary(bytes) => bytes,
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, SerializedDocument::Binary(_))
    }
}

/// Trait for report output formats
///
/// # Examples
///
/// ```ignore
/// struct Outline;
///
/// impl Format for Outline {
///     fn name(&self) -> &str {
///         "outline"
///     }
///
///     fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
///         Ok(doc.headings().map(|h| h.text()).collect::<Vec<_>>().join("\n"))
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "docx", "treeviz")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format, without the leading dot.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Serialize a Document into text
    ///
    /// Default implementation returns NotSupported error.
    /// Text formats override this method.
    fn serialize(&self, _doc: &Document) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not produce text output",
            self.name()
        )))
    }

    /// Serialize a Document, optionally using extra parameters.
    ///
    /// Text formats can rely on the default implementation, which delegates to
    /// [`Format::serialize`] and rejects any parameter. Binary formats override this
    /// method to return [`SerializedDocument::Binary`].
    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        if options.is_empty() {
            self.serialize(doc).map(SerializedDocument::Text)
        } else {
            Err(FormatError::NotSupported(format!(
                "Format '{}' does not support extra parameters",
                self.name()
            )))
        }
    }
}
