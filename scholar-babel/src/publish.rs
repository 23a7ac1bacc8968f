//! Document publishing pipeline.
//!
//! Bridges the format registry and file I/O: one call selects the format, serializes the
//! report and either returns the text or writes the file.
//!
//! Files are written to a temporary file next to the target and renamed into place, so a
//! failed export never leaves a partial document behind.

use crate::error::FormatError;
use crate::format::SerializedDocument;
use crate::ir::nodes::Document;
use crate::registry::FormatRegistry;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

// Whitespace plus anything that cannot appear inside one path component.
static UNSAFE_FILENAME_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\s/\\:*?"<>|\x00-\x1f]+"#).unwrap());

/// File name for an exported report: `<prefix>_Analysis_<topic>.<ext>`.
///
/// Each run of whitespace or filename-unsafe characters in the topic becomes one `_`, so the
/// result is always a single path component.
pub fn export_file_name(prefix: &str, topic: &str, extension: &str) -> String {
    format!(
        "{prefix}_Analysis_{}.{extension}",
        UNSAFE_FILENAME_RUN.replace_all(topic, "_")
    )
}

/// Specifies how to publish a document.
///
/// ```ignore
/// let spec = PublishSpec::new(&document, "docx")
///     .with_output_path("Report.docx")
///     .with_option("date", "2025-03-07");
/// ```
///
/// Text formats return in-memory content unless an output path is given. Binary formats
/// require an output path.
#[derive(Debug)]
pub struct PublishSpec<'a> {
    pub document: &'a Document,
    /// Target format name (e.g., "docx", "treeviz").
    pub format: &'a str,
    pub output: Option<PathBuf>,
    /// Format-specific parameters.
    pub options: HashMap<String, String>,
}

impl<'a> PublishSpec<'a> {
    pub fn new(document: &'a Document, format: &'a str) -> Self {
        Self {
            document,
            format,
            output: None,
            options: HashMap::new(),
        }
    }

    pub fn with_output_path(mut self, path: impl AsRef<Path>) -> Self {
        self.output = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

/// The output from a successful publish operation.
#[derive(Debug, Clone, PartialEq)]
pub enum PublishArtifact {
    InMemory(String),
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PublishResult {
    pub artifact: PublishArtifact,
}

/// Publishes a document with the default format registry.
pub fn publish(spec: PublishSpec<'_>) -> Result<PublishResult, FormatError> {
    publish_with(&FormatRegistry::with_defaults(), spec)
}

/// Publishes a document with the given registry.
///
/// # Errors
///
/// Returns [`FormatError`] if the format is unknown, serialization fails, writing the file
/// fails, or a binary format is requested without an output path.
pub fn publish_with(
    registry: &FormatRegistry,
    spec: PublishSpec<'_>,
) -> Result<PublishResult, FormatError> {
    let serialized = registry.serialize_with_options(spec.document, spec.format, &spec.options)?;
    let artifact = match (serialized, spec.output) {
        (SerializedDocument::Text(text), None) => PublishArtifact::InMemory(text),
        (SerializedDocument::Binary(_), None) => {
            return Err(FormatError::SerializationError(
                "binary formats require an explicit output path".to_string(),
            ))
        }
        (serialized, Some(path)) => {
            write_atomically(&path, &serialized.into_bytes())?;
            info!(format = spec.format, path = %path.display(), "published report");
            PublishArtifact::File(path)
        }
    };
    Ok(PublishResult { artifact })
}

fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), FormatError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.persist(path).map_err(|err| FormatError::Io(err.error))?;
    Ok(())
}
