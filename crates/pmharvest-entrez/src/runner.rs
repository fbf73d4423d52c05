//! Main runner for a harvest: search → fetch → write

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use pmharvest_core::ProgressContext;

use crate::client::Eutils;
use crate::config::Config;
use crate::fetch::fetch_details;
use crate::search::search_all;
use crate::writer::save_results;

/// Harvest execution summary
#[derive(Debug)]
pub struct Summary {
    pub query: String,
    pub ids_collected: usize,
    pub records_written: usize,
    pub output_path: PathBuf,
    pub elapsed: Duration,
}

/// Run one harvest for `query`.
///
/// Everything stays in memory until the final write; an interrupted run
/// leaves no output.
pub fn run<E: Eutils>(
    client: &E,
    query: &str,
    config: &Config,
    progress: &ProgressContext,
) -> Result<Summary> {
    config.validate()?;
    let start = Instant::now();

    let pb = progress.stage_line("search");
    let ids = search_all(client, query, config.page_size, &pb)?;
    pb.finish_and_clear();

    let pb = progress.stage_line("fetch");
    let records = fetch_details(client, &ids, config.fetch_chunk_size, &pb)?;
    pb.finish_and_clear();

    let output_path = save_results(&records, &config.results_dir)?;

    let elapsed = start.elapsed();
    log::info!("Run time: {:.1}s", elapsed.as_secs_f64());

    Ok(Summary {
        query: query.to_string(),
        ids_collected: ids.len(),
        records_written: records.len(),
        output_path,
        elapsed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::SearchPage;

    /// Three-article index with no abstracts.
    struct TinyIndex;

    impl Eutils for TinyIndex {
        fn esearch(&self, _query: &str, retmax: usize, retstart: usize) -> Result<SearchPage> {
            let all = ["10", "20", "30"];
            let end = (retstart + retmax).min(all.len());
            Ok(SearchPage {
                count: all.len(),
                ids: all[retstart..end].iter().map(|s| s.to_string()).collect(),
            })
        }

        fn efetch(&self, ids: &[String]) -> Result<String> {
            let body: String = ids
                .iter()
                .map(|id| {
                    format!(
                        "<PubmedArticle><MedlineCitation><PMID>{id}</PMID>\
                         <Article><ArticleTitle>T{id}</ArticleTitle></Article>\
                         </MedlineCitation></PubmedArticle>"
                    )
                })
                .collect();
            Ok(format!("<PubmedArticleSet>{body}</PubmedArticleSet>"))
        }
    }

    #[test]
    fn end_to_end_with_fake_service() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config {
            page_size: 2,
            results_dir: dir.path().join("data"),
            ..Default::default()
        };

        let summary = run(&TinyIndex, "q", &config, &ProgressContext::hidden()).unwrap();
        assert_eq!(summary.ids_collected, 3);
        assert_eq!(summary.records_written, 3);

        let content = std::fs::read_to_string(&summary.output_path).unwrap();
        assert_eq!(
            content.lines().collect::<Vec<_>>(),
            [
                "PMID,Title,Abstract",
                "10,T10,No abstract available",
                "20,T20,No abstract available",
                "30,T30,No abstract available",
            ]
        );
    }

    #[test]
    fn invalid_config_writes_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config {
            page_size: 0,
            results_dir: dir.path().join("data"),
            ..Default::default()
        };
        assert!(run(&TinyIndex, "q", &config, &ProgressContext::hidden()).is_err());
        assert!(!config.results_dir.exists());
    }
}
