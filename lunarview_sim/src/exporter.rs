//! CSV exporter for generated positions.
//!
//! Writes one `x,y` row per position with a fixed number of decimals, in the
//! table format the sampler reads.

use lunarview_core::sampler::format_value;
use lunarview_core::table::table_writer;
use lunarview_core::Result;
use nalgebra::Vector2;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes `positions` to `inner`, returning the row count.
pub fn write_positions<W, I>(inner: W, positions: I, decimals: usize) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = Vector2<f64>>,
{
    let mut writer = table_writer(inner);
    let mut count = 0;

    for position in positions {
        writer.write_record([
            format_value(position.x, decimals),
            format_value(position.y, decimals),
        ])?;
        count += 1;
    }

    writer.flush()?;
    Ok(count)
}

/// Creates/overwrites `path` with `positions`.
pub fn export_to_file<I>(path: &Path, positions: I, decimals: usize) -> Result<usize>
where
    I: IntoIterator<Item = Vector2<f64>>,
{
    let file = File::create(path)?;
    write_positions(file, positions, decimals)
}
