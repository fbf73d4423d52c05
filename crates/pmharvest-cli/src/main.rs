//! pmharvest - PubMed harvesting CLI
//!
//! Searches PubMed through NCBI E-utilities, flattens the matching
//! articles into a PMID/Title/Abstract CSV, and converts or views
//! previously harvested tables.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

mod cmd;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "pmharvest")]
#[command(about = "Harvest PubMed search results into tabular files")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file path (default: ./pmharvest.toml or ~/.config/pmharvest/config.toml)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Search PubMed and save PMID/Title/Abstract as CSV
    Fetch(cmd::fetch::FetchArgs),
    /// Convert a CSV file to the binary cache format
    Convert(cmd::convert::ConvertArgs),
    /// Print a CSV file as a table
    View(cmd::view::ViewArgs),
    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Progress context (TTY auto-detect)
    let progress = Arc::new(pmharvest_core::ProgressContext::new());
    let multi = progress.is_tty().then(|| progress.multi());

    // Loaded per command; `view` never reads it.
    let config_path = cli.config;
    let load_config = || -> Result<Config> {
        let config = match &config_path {
            Some(path) => Config::from_file(path)?,
            None => Config::load()?,
        };
        match &config.source {
            Some(path) => log::debug!("Loaded config from {}", path.display()),
            None => log::debug!("Using default config"),
        }
        Ok(config)
    };

    match cli.command {
        Command::Fetch(args) => {
            let config = load_config()?;
            // Only harvests keep a log file; the utilities log to the console.
            let log_path =
                pmharvest_core::init_logging(cli.debug, Some(&config.output.logs_dir), multi)
                    .context("Failed to initialize logging")?;
            if let Some(path) = &log_path {
                log::debug!("Logging to {}", path.display());
            }
            cmd::fetch::run(args, &config, &progress)
        }
        Command::Convert(args) => {
            init_console_logging(cli.debug, multi)?;
            cmd::convert::run(args, load_config)
        }
        Command::View(args) => {
            init_console_logging(cli.debug, multi)?;
            cmd::view::run(args)
        }
        Command::Config => {
            init_console_logging(cli.debug, multi)?;
            let config = load_config()?;
            eprintln!("\n{}", config_table(&config));
            Ok(())
        }
    }
}

fn init_console_logging(debug: bool, multi: Option<&indicatif::MultiProgress>) -> Result<()> {
    pmharvest_core::init_logging(debug, None, multi).context("Failed to initialize logging")?;
    Ok(())
}

/// Effective settings as a two-column table.
fn config_table(config: &Config) -> comfy_table::Table {
    use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Setting").fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);

    table.add_row(vec![
        "Config file",
        &config
            .source
            .as_ref()
            .map_or_else(|| "(defaults)".to_string(), |p| p.display().to_string()),
    ]);
    table.add_row(vec!["E-utilities URL", &config.entrez.base_url]);
    table.add_row(vec!["Tool", &config.entrez.tool]);
    table.add_row(vec![
        "Credentials file",
        &config.entrez.credentials_file.display().to_string(),
    ]);
    table.add_row(vec!["Page size", &config.entrez.page_size.to_string()]);
    table.add_row(vec![
        "Fetch chunk",
        &config
            .entrez
            .fetch_chunk_size
            .map_or_else(|| "single request".to_string(), |n| n.to_string()),
    ]);
    table.add_row(vec![
        "Results directory",
        &config.output.results_dir.display().to_string(),
    ]);
    table.add_row(vec![
        "Logs directory",
        &config.output.logs_dir.display().to_string(),
    ]);
    table.add_row(vec![
        "Cache directory",
        &config.output.cache_dir.display().to_string(),
    ]);
    table.add_row(vec![
        "Compression level",
        &config.output.compression_level.to_string(),
    ]);
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["pmharvest", "--debug", "convert", "a.csv", "out"]).unwrap();
        assert!(cli.debug);
        match cli.command {
            Command::Convert(args) => {
                assert_eq!(args.filepath, std::path::PathBuf::from("a.csv"));
                assert_eq!(args.output_dir, Some(std::path::PathBuf::from("out")));
            }
            _ => panic!("expected convert"),
        }

        let cli = Cli::try_parse_from(["pmharvest", "view", "a.csv", "--config", "x.toml"]).unwrap();
        assert_eq!(cli.config, Some(std::path::PathBuf::from("x.toml")));
        assert!(matches!(cli.command, Command::View(_)));
    }

    #[test]
    fn config_table_lists_effective_settings() {
        let mut config = Config::default();
        config.entrez.fetch_chunk_size = Some(500);
        let text = config_table(&config).to_string();

        for needle in [
            "(defaults)",
            "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/",
            "credentials.txt",
            "2000",
            "500",
            "../data_pkl",
        ] {
            assert!(text.contains(needle), "missing {needle}");
        }
    }

    #[test]
    fn config_table_default_fetch_is_single_request() {
        let text = config_table(&Config::default()).to_string();
        assert!(text.contains("single request"));
    }
}
