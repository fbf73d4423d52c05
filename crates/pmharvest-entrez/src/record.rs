//! Flat article records

use crate::error::EntrezError;
use crate::parser::FetchedArticle;

/// Abstract value for articles that have none.
pub const NO_ABSTRACT: &str = "No abstract available";

/// One flattened article, as written to the results CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub pmid: String,
    pub title: String,
    pub abstract_text: String,
}

impl TryFrom<FetchedArticle> for Record {
    type Error = EntrezError;

    /// Keeps only the first abstract segment.
    fn try_from(article: FetchedArticle) -> Result<Self, Self::Error> {
        let pmid = article.pmid.ok_or(EntrezError::MissingField {
            pmid: String::new(),
            field: "PMID",
        })?;
        let title = article.title.ok_or_else(|| EntrezError::MissingField {
            pmid: pmid.clone(),
            field: "ArticleTitle",
        })?;
        let abstract_text = article
            .abstract_segments
            .into_iter()
            .next()
            .unwrap_or_else(|| NO_ABSTRACT.to_string());

        Ok(Self {
            pmid,
            title,
            abstract_text,
        })
    }
}
