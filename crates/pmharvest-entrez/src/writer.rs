//! Results CSV writer

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use arrow::csv::WriterBuilder;

use crate::record::Record;
use crate::transform::RecordAccumulator;

/// Write `records` to `<dir>/results_YYYYmmdd_HHMMSS.csv`, creating `dir`.
///
/// Header row, columns in record field order, no index column.
/// Returns the path written.
pub fn save_results(records: &[Record], dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create results directory: {}", dir.display()))?;

    let stamp = pmharvest_core::file_stamp(chrono::Local::now());
    let path = dir.join(format!("results_{stamp}.csv"));
    write_csv(records, &path)?;

    log::info!("Results saved to {}", path.display());
    Ok(path)
}

/// Write `records` as CSV to exactly `path`.
pub fn write_csv(records: &[Record], path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    let batch = records.iter().collect::<RecordAccumulator>().take_batch();

    let mut writer = WriterBuilder::new()
        .with_header(true)
        .build(BufWriter::new(file));
    writer
        .write(&batch)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    writer.into_inner().flush()?;

    Ok(())
}
