//! Sampler/Rounder: keeps every Nth row of a large table and rounds each
//! numeric field.
//!
//! Rows are indexed over **all** rows read, blank ones included. A row is
//! written when its index is a multiple of the sampling interval and it has
//! at least one non-blank field. Blank fields are dropped, never read as zero.
//!
//! # Rounding
//!
//! Values are rounded to the nearest decimal with `precision` digits, ties
//! resolved half-to-even on the exact binary value (what `{:.N}` formatting
//! does). `2.675` is stored as `2.67499999…`, so it rounds to `2.67`.
//!
//! # Failure
//!
//! A missing input file is reported before the output file is created. A
//! field that does not parse stops the run; rows already written stay in the
//! output file.

use crate::config::SamplerConfig;
use crate::error::{LunarError, Result};
use crate::table::{is_blank_row, read_rows, table_writer, Row};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Renders `value` with exactly `precision` digits after the decimal point.
pub fn format_value(value: f64, precision: usize) -> String {
    format!("{:.*}", precision, value)
}

/// Rounds `value` to `precision` decimal digits.
pub fn round_value(value: f64, precision: usize) -> f64 {
    format_value(value, precision).parse().unwrap_or(value)
}

/// A sampled row: retained fields, parsed and rounded.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundedRow {
    /// Zero-based index of the source row (blank rows counted)
    pub index: usize,

    /// Rounded values in original field order
    pub values: Vec<f64>,

    /// Text written to the output table, one entry per value
    pub fields: Vec<String>,
}

/// Summary of one sampler run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleReport {
    pub input: PathBuf,
    pub output: PathBuf,

    /// Rows read from the input, blank rows included
    pub rows_read: usize,

    /// Rows written to the output
    pub rows_written: usize,
}

/// Row decimation and rounding.
#[derive(Debug, Clone)]
pub struct Sampler {
    config: SamplerConfig,
}

impl Sampler {
    pub fn new(config: SamplerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Whether the row at `index` goes to the output.
    ///
    /// A row whose fields are all whitespace counts as empty: it is never
    /// written, not even as an empty line, but it still takes up its index.
    pub fn is_selected<S: AsRef<str>>(&self, index: usize, row: &[S]) -> bool {
        index % self.config.sampling_interval.max(1) == 0 && !is_blank_row(row)
    }

    /// Drops blank fields and rounds the rest.
    ///
    /// Error positions are 1-based (`row = index + 1`).
    pub fn round_row<S: AsRef<str>>(&self, index: usize, row: &[S]) -> Result<RoundedRow> {
        let precision = self.config.precision;
        let mut values = Vec::with_capacity(row.len());
        let mut fields = Vec::with_capacity(row.len());

        for (column, raw) in row.iter().enumerate() {
            let trimmed = raw.as_ref().trim();
            if trimmed.is_empty() {
                continue;
            }
            let value: f64 = trimmed.parse().map_err(|_| LunarError::ValueParse {
                row: index + 1,
                column: column + 1,
                value: trimmed.to_string(),
            })?;
            let text = format_value(value, precision);
            values.push(text.parse().unwrap_or(value));
            fields.push(text);
        }

        Ok(RoundedRow {
            index,
            values,
            fields,
        })
    }

    /// Samples an in-memory row sequence.
    ///
    /// The iterator ends right after the first error it yields.
    pub fn sample<'a, I>(&'a self, rows: I) -> impl Iterator<Item = Result<RoundedRow>> + 'a
    where
        I: IntoIterator<Item = Row>,
        I::IntoIter: 'a,
    {
        rows.into_iter()
            .enumerate()
            .filter(move |(index, row)| self.is_selected(*index, &row[..]))
            .map(move |(index, row)| self.round_row(index, &row[..]))
            .scan(false, |failed, result| {
                if *failed {
                    return None;
                }
                *failed = result.is_err();
                Some(result)
            })
    }

    /// Runs the sampler on the configured input and output files.
    pub fn run(&self) -> Result<SampleReport> {
        self.run_paths(&self.config.input_file, &self.config.output_file)
    }

    /// Runs the sampler from `input` to `output`.
    pub fn run_paths(&self, input: &Path, output: &Path) -> Result<SampleReport> {
        self.config.validate()?;

        let infile = File::open(input).map_err(|e| LunarError::from_open(input, e))?;
        let outfile = File::create(output)?;
        let mut writer = table_writer(outfile);

        let mut report = SampleReport {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            ..Default::default()
        };

        let outcome = self.copy_rows(BufReader::new(infile), &mut writer, &mut report);
        let flushed = writer.flush();
        outcome?;
        flushed?;

        info!(
            "Sampled {} of {} rows from {} into {}",
            report.rows_written,
            report.rows_read,
            input.display(),
            output.display()
        );
        Ok(report)
    }

    fn copy_rows<R: BufRead, W: Write>(
        &self,
        reader: R,
        writer: &mut csv::Writer<W>,
        report: &mut SampleReport,
    ) -> Result<()> {
        for (index, row) in read_rows(reader).enumerate() {
            let row = row?;
            report.rows_read += 1;

            if !self.is_selected(index, &row[..]) {
                continue;
            }

            let rounded = match self.round_row(index, &row[..]) {
                Ok(rounded) => rounded,
                Err(e) => {
                    debug!(
                        "Stopping after {} written rows at row {}",
                        report.rows_written,
                        index + 1
                    );
                    return Err(e);
                }
            };
            writer.write_record(&rounded.fields)?;
            report.rows_written += 1;
        }
        Ok(())
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new(SamplerConfig::default())
    }
}
