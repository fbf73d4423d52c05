use std::path::Path;

use anyhow::Result;
use pmharvest_core::{Table, TableError};

pub mod convert;
pub mod fetch;
pub mod view;

/// Load a CSV table, or report a missing file on stdout and return `None`.
fn load_table(path: &Path) -> Result<Option<Table>> {
    match Table::from_csv(path) {
        Ok(table) => Ok(Some(table)),
        Err(e @ TableError::NotFound(_)) => {
            println!("{e}");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
