//! Convert subcommand - CSV to parquet cache

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use pmharvest_core::Table;

use crate::config::Config;

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// CSV file to convert
    pub filepath: PathBuf,

    /// Directory for the cache file (default: output.cache_dir)
    pub output_dir: Option<PathBuf>,
}

/// `load_config` is only called once the input has been read, so a missing
/// input is reported even when the config file is broken.
pub fn run(args: ConvertArgs, load_config: impl FnOnce() -> Result<Config>) -> Result<()> {
    convert(&args.filepath, args.output_dir.as_deref(), load_config)?;
    Ok(())
}

/// `<output_dir>/<input stem>.parquet`
fn cache_path(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or(input.as_os_str());
    let mut name = stem.to_os_string();
    name.push(".parquet");
    output_dir.join(name)
}

/// Returns the written cache path, or `None` when the input is missing or
/// the cache could not be written. Both cases are reported on stdout.
fn convert(
    input: &Path,
    output_dir: Option<&Path>,
    load_config: impl FnOnce() -> Result<Config>,
) -> Result<Option<PathBuf>> {
    let Some(table) = super::load_table(input)? else {
        return Ok(None);
    };

    let config = load_config()?;
    let output_dir = output_dir.unwrap_or(config.output.cache_dir.as_path());
    let output = cache_path(input, output_dir);
    Ok(save(&table, &output, config.output.compression_level).then_some(output))
}

fn save(table: &Table, output: &Path, zstd_level: i32) -> bool {
    match table.write_parquet(output, zstd_level) {
        Ok(rows) => {
            log::debug!("Wrote {rows} rows");
            println!("Data saved to {}.", output.display());
            true
        }
        Err(e) => {
            println!("Error saving data to {}. Error: {e}", output.display());
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn defaults() -> Result<Config> {
        Ok(Config::default())
    }

    fn write_results_csv(dir: &Path) -> PathBuf {
        let input = dir.join("results.csv");
        std::fs::write(
            &input,
            "PMID,Title,Abstract\n1,First,No abstract available\n2,Second,\"a, b\"\n",
        )
        .unwrap();
        input
    }

    fn file_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<_> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn cache_path_uses_stem() {
        assert_eq!(
            cache_path(Path::new("data/results_20240101_120000.csv"), Path::new("../data_pkl")),
            PathBuf::from("../data_pkl/results_20240101_120000.parquet")
        );
    }

    #[test]
    fn converts_csv() {
        let dir = TempDir::new().unwrap();
        let input = write_results_csv(dir.path());

        let out_dir = dir.path().join("cache");
        let written = convert(&input, Some(&out_dir), defaults).unwrap();

        let expected = out_dir.join("results.parquet");
        assert_eq!(written.as_deref(), Some(expected.as_path()));
        assert!(pmharvest_core::is_valid_parquet(&expected));
    }

    #[test]
    fn output_dir_defaults_to_cache_dir() {
        let dir = TempDir::new().unwrap();
        let input = write_results_csv(dir.path());
        let cache = dir.path().join("configured");

        let written = convert(&input, None, || {
            let mut config = Config::default();
            config.output.cache_dir = cache.clone();
            Ok(config)
        })
        .unwrap();
        assert_eq!(written, Some(cache.join("results.parquet")));
    }

    #[test]
    fn missing_input_skips_config_and_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let out_dir = dir.path().join("cache");
        let written = convert(&dir.path().join("absent.csv"), Some(&out_dir), || {
            anyhow::bail!("Failed to parse config file: pmharvest.toml")
        })
        .unwrap();
        assert!(written.is_none());
        assert!(!out_dir.exists());
    }

    #[test]
    fn unwritable_output_is_reported_not_raised() {
        let dir = TempDir::new().unwrap();
        let input = write_results_csv(dir.path());

        // a regular file where the output directory should be
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let written = convert(&input, Some(&blocker), defaults).unwrap();
        assert!(written.is_none());
    }

    #[test]
    fn failed_save_leaves_no_partial_file() {
        let dir = TempDir::new().unwrap();
        let input = write_results_csv(dir.path());

        // a directory already occupies the cache file name
        let out_dir = dir.path().join("cache");
        std::fs::create_dir_all(out_dir.join("results.parquet")).unwrap();
        std::fs::write(out_dir.join("results.parquet").join("keep"), "").unwrap();

        let written = convert(&input, Some(&out_dir), defaults).unwrap();
        assert!(written.is_none());
        assert_eq!(file_names(&out_dir), ["results.parquet"]);
    }
}
