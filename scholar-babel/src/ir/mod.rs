//! Intermediate Representation (IR) for assembled reports.
//!
//! This module defines a format-agnostic representation of a report,
//! designed to facilitate conversion to various output formats like DOCX,
//! tree visualizations or JSON.

pub mod nodes;
