//! Error types for assembly and format operations

use thiserror::Error;

/// Errors that can occur during format operations
#[derive(Debug, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Format does not support the requested operation or option
    #[error("Operation not supported: {0}")]
    NotSupported(String),
    /// Writing the packaged document failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<zip::result::ZipError> for FormatError {
    fn from(err: zip::result::ZipError) -> Self {
        FormatError::SerializationError(format!("zip packaging failed: {err}"))
    }
}

/// Errors raised while resolving an export selection into a document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblyError {
    /// A section assignment points at a turn that is not part of the conversation
    #[error("no chat turn with id '{0}'")]
    UnknownTurn(String),
}
