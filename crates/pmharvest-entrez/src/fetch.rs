//! efetch and flattening into Records

use anyhow::Result;
use indicatif::ProgressBar;

use crate::client::Eutils;
use crate::parser::parse_efetch;
use crate::record::Record;

/// Fetch full records for `ids` and flatten them.
///
/// With `chunk_size` unset the whole list goes out as one request.
/// Records follow response order; an article missing its PMID or title
/// aborts the call.
pub fn fetch_details<E: Eutils>(
    client: &E,
    ids: &[String],
    chunk_size: Option<usize>,
    pb: &ProgressBar,
) -> Result<Vec<Record>> {
    log::info!("Fetching details for {} papers", ids.len());
    if ids.is_empty() {
        log::warn!("No identifiers to fetch");
        return Ok(Vec::new());
    }

    let chunk_size = chunk_size.unwrap_or(ids.len());
    let mut records = Vec::with_capacity(ids.len());

    for chunk in ids.chunks(chunk_size) {
        let xml = client.efetch(chunk)?;
        for article in parse_efetch(&xml)? {
            records.push(Record::try_from(article)?);
        }
        pb.set_message(format!(
            "{}/{} records",
            pmharvest_core::fmt_num(records.len()),
            pmharvest_core::fmt_num(ids.len())
        ));
    }

    log::info!("Received paper details");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::error::EntrezError;
    use crate::parser::SearchPage;
    use crate::record::NO_ABSTRACT;

    /// Serves one article per requested id; ids starting with `x` have no abstract.
    #[derive(Default)]
    struct FakeFetch {
        batches: RefCell<Vec<Vec<String>>>,
    }

    impl Eutils for FakeFetch {
        fn esearch(&self, _query: &str, _retmax: usize, _retstart: usize) -> Result<SearchPage> {
            unreachable!("fetch never searches")
        }

        fn efetch(&self, ids: &[String]) -> Result<String> {
            self.batches.borrow_mut().push(ids.to_vec());
            let mut xml = String::from("<PubmedArticleSet>");
            for id in ids {
                let abstract_xml = if id.starts_with('x') {
                    String::new()
                } else {
                    format!("<Abstract><AbstractText>Abstract of {id}</AbstractText></Abstract>")
                };
                xml.push_str(&format!(
                    "<PubmedArticle><MedlineCitation><PMID>{id}</PMID><Article>\
                     <ArticleTitle>Title of {id}</ArticleTitle>{abstract_xml}\
                     </Article></MedlineCitation></PubmedArticle>"
                ));
            }
            xml.push_str("</PubmedArticleSet>");
            Ok(xml)
        }
    }

    fn ids(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn single_batch_by_default() {
        let fake = FakeFetch::default();
        let records = fetch_details(&fake, &ids(&["1", "2", "3"]), None, &ProgressBar::hidden())
            .unwrap();

        assert_eq!(fake.batches.borrow().len(), 1);
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].title, "Title of 3");
        assert_eq!(records[0].abstract_text, "Abstract of 1");
    }

    #[test]
    fn placeholder_for_missing_abstract() {
        let fake = FakeFetch::default();
        let records =
            fetch_details(&fake, &ids(&["1", "x2"]), None, &ProgressBar::hidden()).unwrap();
        assert_eq!(records[1].pmid, "x2");
        assert_eq!(records[1].abstract_text, NO_ABSTRACT);
    }

    #[test]
    fn chunking_preserves_order() {
        let fake = FakeFetch::default();
        let all = ids(&["1", "2", "3", "4", "5"]);
        let records = fetch_details(&fake, &all, Some(2), &ProgressBar::hidden()).unwrap();

        let sizes: Vec<_> = fake.batches.borrow().iter().map(Vec::len).collect();
        assert_eq!(sizes, [2, 2, 1]);
        let pmids: Vec<_> = records.iter().map(|r| r.pmid.as_str()).collect();
        assert_eq!(pmids, ["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn empty_ids_make_no_request() {
        let fake = FakeFetch::default();
        let records = fetch_details(&fake, &[], None, &ProgressBar::hidden()).unwrap();
        assert!(records.is_empty());
        assert!(fake.batches.borrow().is_empty());
    }

    struct TitleLess;

    impl Eutils for TitleLess {
        fn esearch(&self, _query: &str, _retmax: usize, _retstart: usize) -> Result<SearchPage> {
            unreachable!()
        }

        fn efetch(&self, _ids: &[String]) -> Result<String> {
            Ok("<PubmedArticleSet><PubmedArticle><MedlineCitation><PMID>9</PMID>\
                <Article></Article></MedlineCitation></PubmedArticle></PubmedArticleSet>"
                .to_string())
        }
    }

    #[test]
    fn missing_title_aborts() {
        let err = fetch_details(&TitleLess, &ids(&["9"]), None, &ProgressBar::hidden()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EntrezError>(),
            Some(EntrezError::MissingField { field: "ArticleTitle", .. })
        ));
    }
}
