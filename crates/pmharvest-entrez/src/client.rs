//! E-utilities client
//!
//! Credentials are an explicit value owned by the client and attached to
//! every request; nothing is stored process-wide.

use anyhow::{Context, Result};

use crate::config::Config;
use crate::credentials::Credentials;
use crate::parser::{SearchPage, parse_esearch};

/// The two E-utilities calls the pipeline needs.
pub trait Eutils {
    /// esearch over PubMed, relevance-sorted, returning one window.
    fn esearch(&self, query: &str, retmax: usize, retstart: usize) -> Result<SearchPage>;

    /// efetch full records for `ids`, returning the raw XML document.
    fn efetch(&self, ids: &[String]) -> Result<String>;
}

/// HTTP client for the NCBI E-utilities
#[derive(Debug, Clone)]
pub struct EntrezClient {
    esearch_url: String,
    efetch_url: String,
    tool: String,
    credentials: Credentials,
}

impl EntrezClient {
    pub fn new(config: &Config, credentials: Credentials) -> Self {
        Self {
            esearch_url: config.endpoint("esearch.fcgi"),
            efetch_url: config.endpoint("efetch.fcgi"),
            tool: config.tool.clone(),
            credentials,
        }
    }

    /// `tool`, `email` and `api_key` parameters; empty values are not sent.
    fn identity_params(&self) -> Vec<(&'static str, String)> {
        [
            ("tool", &self.tool),
            ("email", &self.credentials.email),
            ("api_key", &self.credentials.api_key),
        ]
        .into_iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| (k, v.clone()))
        .collect()
    }
}

impl Eutils for EntrezClient {
    fn esearch(&self, query: &str, retmax: usize, retstart: usize) -> Result<SearchPage> {
        let mut params = vec![
            ("db", "pubmed".to_string()),
            ("sort", "relevance".to_string()),
            ("retmode", "xml".to_string()),
            ("retmax", retmax.to_string()),
            ("retstart", retstart.to_string()),
            ("term", query.to_string()),
        ];
        params.extend(self.identity_params());

        let body = pmharvest_core::get_text(&self.esearch_url, &params)
            .with_context(|| format!("esearch failed at retstart {retstart}"))?;
        parse_esearch(&body)
    }

    fn efetch(&self, ids: &[String]) -> Result<String> {
        // POST: the id list has no upper bound and would overflow a query string.
        let mut form = vec![
            ("db", "pubmed".to_string()),
            ("retmode", "xml".to_string()),
            ("id", ids.join(",")),
        ];
        form.extend(self.identity_params());

        pmharvest_core::post_form_text(&self.efetch_url, &form)
            .with_context(|| format!("efetch failed for {} ids", ids.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(email: &str, api_key: &str) -> EntrezClient {
        EntrezClient::new(
            &Config::default(),
            Credentials {
                email: email.to_string(),
                api_key: api_key.to_string(),
            },
        )
    }

    #[test]
    fn endpoints_from_config() {
        let c = client("me@example.org", "k");
        assert!(c.esearch_url.ends_with("/eutils/esearch.fcgi"));
        assert!(c.efetch_url.ends_with("/eutils/efetch.fcgi"));
    }

    #[test]
    fn identity_params_all_present() {
        let params = client("me@example.org", "k").identity_params();
        assert_eq!(
            params,
            [
                ("tool", "pmharvest".to_string()),
                ("email", "me@example.org".to_string()),
                ("api_key", "k".to_string()),
            ]
        );
    }

    #[test]
    fn identity_params_skip_empty_key() {
        let params = client("me@example.org", "").identity_params();
        assert!(params.iter().all(|(k, _)| *k != "api_key"));
    }
}
