//! Arrow schema of the results table

use std::sync::{Arc, LazyLock};

use arrow::datatypes::{DataType, Field, Schema};

/// Column order of the results CSV.
pub static RECORDS: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Arc::new(Schema::new(vec![
        Field::new("PMID", DataType::Utf8, false),
        Field::new("Title", DataType::Utf8, false),
        Field::new("Abstract", DataType::Utf8, false),
    ]))
});

pub fn records() -> &'static Arc<Schema> {
    &RECORDS
}
