//! Paginated esearch

use anyhow::Result;
use indicatif::ProgressBar;

use crate::client::Eutils;
use crate::parser::SearchPage;

/// One logged esearch call.
pub fn search<E: Eutils>(client: &E, query: &str, retmax: usize, retstart: usize) -> Result<SearchPage> {
    log::info!("Sending search query: {query}, retmax: {retmax}, starting at {retstart}");
    let page = client.esearch(query, retmax, retstart)?;
    log::info!("Received {} results", page.ids.len());
    Ok(page)
}

/// Collect every identifier matching `query`.
///
/// A single-result search learns the total count, then windows of
/// `page_size` are requested at offsets `0, page_size, ...` below the count.
/// Identifiers are concatenated in the order returned; duplicates caused by
/// the index shifting between pages are kept.
pub fn search_all<E: Eutils>(
    client: &E,
    query: &str,
    page_size: usize,
    pb: &ProgressBar,
) -> Result<Vec<String>> {
    let total_count = search(client, query, 1, 0)?.count;
    pb.set_length(total_count as u64);

    let mut all_ids = Vec::new();
    for start in (0..total_count).step_by(page_size) {
        let page = search(client, query, page_size, start)?;
        all_ids.extend(page.ids);
        log::info!(
            "Fetched {} papers, range {} to {}",
            all_ids.len(),
            start,
            start + page_size
        );
        pb.set_message(format!(
            "{}/{} ids",
            pmharvest_core::fmt_num(all_ids.len()),
            pmharvest_core::fmt_num(total_count)
        ));
    }

    Ok(all_ids)
}
