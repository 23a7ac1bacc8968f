//! Pipe table reconstruction
//!
//! Chat output carries markdown-style pipe tables. Consecutive pipe rows are collected by
//! the segment parser (divider rows excluded) and handed here to become a [`Table`].
//! The first row of every run is the header row.

use crate::ir::nodes::{Table, TableRow};
use once_cell::sync::Lazy;
use regex::Regex;

static DIVIDER_ROW: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\|[:\-|\s]*\|$").unwrap());

/// Whether a (trimmed) line looks like a pipe table row.
pub fn is_table_row(line: &str) -> bool {
    let line = line.trim();
    line.starts_with('|') && line.ends_with('|')
}

/// Whether a (trimmed) line is a header/body divider such as `|---|:---:|`.
pub fn is_divider_row(line: &str) -> bool {
    DIVIDER_ROW.is_match(line.trim())
}

/// Build one table from a run of pipe rows. Row 0 is flagged as header.
///
/// Rows keep their own cell count; ragged tables are not padded.
pub fn build_table<S: AsRef<str>>(rows: &[S]) -> Table {
    let rows = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| TableRow {
            cells: parse_table_row(row.as_ref()),
            header: idx == 0,
        })
        .collect();
    Table { rows }
}

/// Split a pipe row into trimmed cells, dropping the pieces outside the outer pipes.
pub fn parse_table_row(line: &str) -> Vec<String> {
    let line = line.trim();
    let line = line.strip_prefix('|').unwrap_or(line);
    let line = line.strip_suffix('|').unwrap_or(line);

    line.split('|').map(|s| s.trim().to_string()).collect()
}
