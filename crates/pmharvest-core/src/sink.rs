//! Parquet file writer used for binary table caches

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::RecordBatch;
use arrow::datatypes::Schema;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, ZstdLevel};
use parquet::file::properties::WriterProperties;

/// Buffered parquet writer with atomic tmp→rename
///
/// A sink dropped without a successful `finalize` removes its tmp file.
pub struct ParquetSink {
    writer: Option<ArrowWriter<File>>,
    tmp_path: PathBuf,
    final_path: PathBuf,
    row_count: usize,
}

impl std::fmt::Debug for ParquetSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParquetSink")
            .field("final_path", &self.final_path)
            .field("row_count", &self.row_count)
            .finish_non_exhaustive()
    }
}

impl ParquetSink {
    /// Create a new sink for `final_path`, writing to `<final_path>.tmp` until finalized.
    ///
    /// The parent directory is created if missing.
    pub fn create(
        final_path: &Path,
        schema: &Schema,
        zstd_level: i32,
    ) -> Result<Self, std::io::Error> {
        if let Some(parent) = final_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut tmp_name = final_path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        // Clean up stale tmp file
        if tmp_path.exists() {
            fs::remove_file(&tmp_path)?;
        }

        let level = ZstdLevel::try_new(zstd_level)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
        let props = WriterProperties::builder()
            .set_compression(Compression::ZSTD(level))
            .build();

        let file = File::create(&tmp_path)?;
        let writer = match ArrowWriter::try_new(file, Arc::new(schema.clone()), Some(props)) {
            Ok(w) => w,
            Err(e) => {
                let _ = fs::remove_file(&tmp_path);
                return Err(std::io::Error::other(e));
            }
        };

        Ok(Self {
            writer: Some(writer),
            tmp_path,
            final_path: final_path.to_path_buf(),
            row_count: 0,
        })
    }

    /// Write a record batch
    pub fn write_batch(&mut self, batch: &RecordBatch) -> Result<(), std::io::Error> {
        let writer = self.writer.as_mut().ok_or_else(closed)?;
        writer.write(batch).map_err(std::io::Error::other)?;
        self.row_count += batch.num_rows();
        Ok(())
    }

    /// Finalize: flush footer and atomically rename tmp → final
    pub fn finalize(mut self) -> Result<usize, std::io::Error> {
        let writer = self.writer.take().ok_or_else(closed)?;
        writer.close().map_err(std::io::Error::other)?;
        fs::rename(&self.tmp_path, &self.final_path)?;
        Ok(self.row_count)
    }
}

fn closed() -> std::io::Error {
    std::io::Error::other("parquet sink already closed")
}

impl Drop for ParquetSink {
    fn drop(&mut self) {
        // close the file handle before unlinking
        drop(self.writer.take());
        if self.tmp_path.exists() {
            let _ = fs::remove_file(&self.tmp_path);
        }
    }
}

/// Check if a completed parquet file exists and has a valid footer
pub fn is_valid_parquet(path: &Path) -> bool {
    if !path.exists() {
        return false;
    }
    let file = match File::open(path) {
        Ok(f) => f,
        Err(_) => return false,
    };
    parquet::file::reader::SerializedFileReader::new(file).is_ok()
}
