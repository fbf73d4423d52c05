//! Harvest pipeline configuration

use std::path::PathBuf;

/// Identifiers requested per esearch window.
pub const CHUNK_SIZE: usize = 2000;

/// Query used when the caller gives none.
pub const DEFAULT_QUERY: &str = "female infertility AND systematic [sb]";

/// Runtime configuration for a harvest run
#[derive(Debug, Clone)]
pub struct Config {
    /// E-utilities base URL (trailing slash optional)
    pub base_url: String,
    /// Value of the `tool` parameter sent with every request
    pub tool: String,
    /// esearch window size
    pub page_size: usize,
    /// Split efetch into batches of this many ids; `None` sends one batch
    pub fetch_chunk_size: Option<usize>,
    /// Directory receiving `results_*.csv`
    pub results_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/".to_string(),
            tool: "pmharvest".to_string(),
            page_size: CHUNK_SIZE,
            fetch_chunk_size: None,
            results_dir: PathBuf::from("data"),
        }
    }
}

impl Config {
    /// Full URL of an E-utility endpoint, e.g. `esearch.fcgi`.
    pub fn endpoint(&self, name: &str) -> String {
        format!("{}/{name}", self.base_url.trim_end_matches('/'))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.page_size == 0 {
            anyhow::bail!("page_size must be greater than zero");
        }
        if self.fetch_chunk_size == Some(0) {
            anyhow::bail!("fetch_chunk_size must be greater than zero");
        }
        Ok(())
    }
}
