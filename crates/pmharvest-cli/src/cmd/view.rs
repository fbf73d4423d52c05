//! View subcommand - print a CSV file as a table

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// CSV file to display
    pub filepath: PathBuf,
}

pub fn run(args: ViewArgs) -> Result<()> {
    if let Some(text) = render(&args.filepath)? {
        println!("{text}");
    }
    Ok(())
}

/// The rendered table plus a shape line, or `None` after reporting a
/// missing file.
fn render(path: &Path) -> Result<Option<String>> {
    let Some(table) = super::load_table(path)? else {
        return Ok(None);
    };

    let text = table.render()?;
    Ok(Some(format!(
        "{text}\n\n[{} rows x {} columns]",
        table.num_rows(),
        table.num_columns()
    )))
}
