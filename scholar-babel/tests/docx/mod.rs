//! Docx package tests
//!
//! Reads generated packages back with `zip` and checks every part parses as XML.

mod package;
