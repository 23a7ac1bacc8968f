//! Report assembly and export for ScholarSync research conversations
//!
//!     This crate turns the chat turns of a research session into a structured report and
//!     writes it out as a Word document (or as a text outline / JSON for inspection).
//!
//!     It is a pure lib: it powers scholar-cli but is shell agnostic. No code here prints,
//!     reads environment variables or talks to the network.
//!
//! Architecture
//!
//!     Chat output is semi-structured markdown. Instead of a full markdown AST the content is
//!     classified line by line (./common/segments.rs), tables are rebuilt from pipe rows
//!     (./common/table.rs) and bold spans become styled runs (./common/inline.rs). The
//!     assembler (./assembler.rs) groups turns into IMRAD sections and emits a flat IR
//!     (./ir/nodes.rs) that every format serializes.
//!
//!     .
//!     ├── model.rs                # Chat turns, research modes, transcripts
//!     ├── assembler.rs            # Selection -> report IR
//!     ├── common                  # Parsers and section mapping
//!     ├── ir                      # Intermediate Representation
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── formats
//!     │   ├── docx                # OOXML package writer
//!     │   ├── treeviz             # Outline used by `scholar inspect`
//!     │   └── json
//!     └── publish.rs              # Serialize + write to disk
//!
//! Testing
//!
//!     tests
//!     ├── lib.rs                  # includes the modules below
//!     ├── assembly.rs             # end to end scenarios over transcripts
//!     ├── docx.rs                 # package layout and part well-formedness
//!     └── properties.rs           # proptest properties of the parsers
//!
//!     Rust does not discover tests in subdirectories by default, so they are included
//!     from tests/lib.rs.

pub mod assembler;
pub mod common;
pub mod error;
pub mod format;
pub mod formats;
pub mod ir;
pub mod model;
pub mod publish;
pub mod registry;

pub use assembler::{
    assemble, default_selections, derive_abstract, resolve_selections, ReportOptions, Selection,
};
pub use common::sections::{map_mode_to_section, Section};
pub use error::{AssemblyError, FormatError};
pub use format::{Format, SerializedDocument};
pub use formats::DocxOptions;
pub use model::{ChatTurn, ResearchMode, Role, SectionAssignment, Transcript};
pub use registry::FormatRegistry;

/// Assemble the report described by a transcript.
///
/// Uses the transcript's selections when present, otherwise every model turn in its
/// default section. `topic` overrides the transcript topic.
pub fn assemble_transcript(
    transcript: &Transcript,
    topic: Option<&str>,
    options: &ReportOptions,
) -> Result<ir::nodes::Document, AssemblyError> {
    let selections = match &transcript.selections {
        Some(assignments) => resolve_selections(&transcript.turns, assignments)?,
        None => default_selections(&transcript.turns),
    };
    let topic = topic.or(transcript.topic.as_deref()).unwrap_or_default();
    let abstract_text = derive_abstract(&transcript.turns);
    Ok(assemble(topic, &abstract_text, &selections, options))
}
