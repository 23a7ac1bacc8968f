//! JSON dump of the assembled report
//!
//! Serializes the node sequence as-is, each node tagged with its `kind`. Meant for
//! tooling that wants the report structure without unpacking a docx package.

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::Document;

pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Report nodes as pretty-printed JSON"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serde_json::to_string_pretty(doc)
            .map_err(|err| FormatError::SerializationError(err.to_string()))
    }
}
