//! In-memory tables loaded from CSV files.
//!
//! The schema is inferred from the whole file; batches keep file order.

use std::fs::File;
use std::io::{self, Seek};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::RecordBatch;
use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::SchemaRef;
use arrow::error::ArrowError;
use arrow::util::display::{ArrayFormatter, FormatOptions};
use comfy_table::{ContentArrangement, Table as TextTable, presets::UTF8_FULL};

use crate::sink::ParquetSink;

/// Error loading or rendering a table
#[derive(Debug)]
pub enum TableError {
    /// Input file does not exist
    NotFound(PathBuf),
    Io(io::Error),
    Arrow(ArrowError),
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(p) => write!(f, "File {} not found.", p.display()),
            Self::Io(e) => write!(f, "IO: {e}"),
            Self::Arrow(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for TableError {}

impl From<io::Error> for TableError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ArrowError> for TableError {
    fn from(e: ArrowError) -> Self {
        Self::Arrow(e)
    }
}

/// A tabular dataset: one schema, many batches.
#[derive(Debug, Clone)]
pub struct Table {
    schema: SchemaRef,
    batches: Vec<RecordBatch>,
}

impl Table {
    /// Load a CSV file with a header row.
    pub fn from_csv(path: &Path) -> Result<Self, TableError> {
        let mut file = match File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(TableError::NotFound(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };

        let format = Format::default().with_header(true);
        let (schema, _) = format.infer_schema(&mut file, None)?;
        file.rewind()?;

        let schema = Arc::new(schema);
        let reader = ReaderBuilder::new(schema.clone())
            .with_format(format)
            .build(file)?;
        let batches = reader.collect::<Result<Vec<_>, _>>()?;

        Ok(Self { schema, batches })
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    pub fn batches(&self) -> &[RecordBatch] {
        &self.batches
    }

    pub fn num_rows(&self) -> usize {
        self.batches.iter().map(|b| b.num_rows()).sum()
    }

    pub fn num_columns(&self) -> usize {
        self.schema.fields().len()
    }

    /// Serialize to a parquet file at `path`. Returns rows written.
    pub fn write_parquet(&self, path: &Path, zstd_level: i32) -> io::Result<usize> {
        let mut sink = ParquetSink::create(path, &self.schema, zstd_level)?;
        for batch in &self.batches {
            sink.write_batch(batch)?;
        }
        sink.finalize()
    }

    /// Render every row, with a leading row-index column, as a text table.
    pub fn render(&self) -> Result<TextTable, TableError> {
        let options = FormatOptions::default().with_null("NaN");

        let mut table = TextTable::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        let mut header = vec![String::new()];
        header.extend(self.schema.fields().iter().map(|f| f.name().clone()));
        table.set_header(header);

        let mut index = 0usize;
        for batch in &self.batches {
            let formatters = batch
                .columns()
                .iter()
                .map(|col| ArrayFormatter::try_new(col.as_ref(), &options))
                .collect::<Result<Vec<_>, _>>()?;

            for row in 0..batch.num_rows() {
                let mut cells = Vec::with_capacity(formatters.len() + 1);
                cells.push(index.to_string());
                cells.extend(formatters.iter().map(|f| f.value(row).to_string()));
                table.add_row(cells);
                index += 1;
            }
        }

        Ok(table)
    }
}
