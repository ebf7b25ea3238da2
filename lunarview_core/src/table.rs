//! Plain comma-separated tables: no header, no quoting, one row per line.
//!
//! Reading is line based so that blank lines survive as empty rows (the
//! sampler's index counts them). Writing goes through `csv::Writer` with
//! `\n` terminators.

use crate::error::Result;
use std::io::{BufRead, Write};

/// One line of a table split into raw text fields. Blank lines are empty rows.
pub type Row = Vec<String>;

/// Splits one line into fields.
pub fn split_row(line: &str) -> Row {
    let line = line.strip_suffix('\r').unwrap_or(line);
    if line.is_empty() {
        return Vec::new();
    }
    line.split(',').map(str::to_string).collect()
}

/// True when the row has no field with visible content.
pub fn is_blank_row<S: AsRef<str>>(row: &[S]) -> bool {
    row.iter().all(|field| field.as_ref().trim().is_empty())
}

/// Iterates over every line of `reader` as a [`Row`], blank lines included.
pub fn read_rows<R: BufRead>(reader: R) -> impl Iterator<Item = Result<Row>> {
    reader
        .lines()
        .map(|line| line.map(|l| split_row(&l)).map_err(Into::into))
}

/// Builds the writer used for every table this workspace produces. Rows may
/// differ in length.
pub fn table_writer<W: Write>(inner: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(inner)
}
