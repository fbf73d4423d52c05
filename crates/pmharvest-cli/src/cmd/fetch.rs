//! Fetch subcommand - search PubMed and save the results

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

use pmharvest_core::SharedProgress;
use pmharvest_entrez::{Credentials, DEFAULT_QUERY, EntrezClient};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Entrez search query
    #[arg(short, long, default_value = DEFAULT_QUERY)]
    pub query: String,

    /// Two-line credentials file (email, api key)
    #[arg(long)]
    pub credentials: Option<PathBuf>,

    /// Output directory for the results CSV
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Identifiers requested per search page
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Split detail fetches into requests of this many identifiers
    #[arg(long)]
    pub fetch_chunk: Option<usize>,
}

pub fn run(args: FetchArgs, config: &Config, progress: &SharedProgress) -> Result<()> {
    let credentials = Credentials::from_file(&credentials_path(&args, config))?;
    let entrez_config = merge_config(&args, config);

    log::info!("Harvesting PubMed");
    log::info!("  Query: {}", args.query);
    log::info!("  Output: {}", entrez_config.results_dir.display());
    log::debug!("  Page size: {}", entrez_config.page_size);

    let client = EntrezClient::new(&entrez_config, credentials);
    let summary = pmharvest_entrez::run(&client, &args.query, &entrez_config, progress)?;

    print_summary(
        "PubMed",
        &[
            ("Query", summary.query),
            (
                "Identifiers",
                pmharvest_core::fmt_num(summary.ids_collected),
            ),
            (
                "Records",
                pmharvest_core::fmt_num(summary.records_written),
            ),
            ("Output", summary.output_path.display().to_string()),
            ("Time", format!("{:.1}s", summary.elapsed.as_secs_f64())),
        ],
    );
    Ok(())
}

/// Credentials file: `--credentials`, else `entrez.credentials_file`.
fn credentials_path(args: &FetchArgs, config: &Config) -> PathBuf {
    args.credentials
        .clone()
        .unwrap_or_else(|| config.entrez.credentials_file.clone())
}

/// Merge flags over the loaded config; a flag always wins.
fn merge_config(args: &FetchArgs, config: &Config) -> pmharvest_entrez::Config {
    pmharvest_entrez::Config {
        base_url: config.entrez.base_url.clone(),
        tool: config.entrez.tool.clone(),
        page_size: args.page_size.unwrap_or(config.entrez.page_size),
        fetch_chunk_size: args.fetch_chunk.or(config.entrez.fetch_chunk_size),
        results_dir: args
            .output
            .clone()
            .unwrap_or_else(|| config.output.results_dir.clone()),
    }
}

fn print_summary(title: &str, rows: &[(&str, String)]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new(title).fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    eprintln!("\n{table}");
}
