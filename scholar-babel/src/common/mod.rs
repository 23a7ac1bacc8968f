//! Parsing and mapping code shared by the assembler and the output formats.

pub mod chart;
pub mod inline;
pub mod sections;
pub mod segments;
pub mod table;
