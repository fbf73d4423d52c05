//! pmharvest entrez - PubMed harvesting over the NCBI E-utilities
//!
//! Pages through `esearch` results for one query, fetches the full
//! records with `efetch`, flattens each article to PMID, title and first
//! abstract segment, and writes a timestamped CSV.
//!
//! # Example
//!
//! ```ignore
//! use pmharvest_core::ProgressContext;
//! use pmharvest_entrez::{Config, Credentials, EntrezClient, run};
//!
//! let config = Config::default();
//! let credentials = Credentials::from_file("credentials.txt".as_ref())?;
//! let client = EntrezClient::new(&config, credentials);
//!
//! let summary = run(&client, "female infertility AND systematic [sb]", &config, &ProgressContext::new())?;
//! println!("Wrote {} records to {}", summary.records_written, summary.output_path.display());
//! ```

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod fetch;
pub mod parser;
pub mod record;
pub mod runner;
pub mod schema;
pub mod search;
pub mod transform;
pub mod writer;

// Re-exports
pub use client::{EntrezClient, Eutils};
pub use config::{CHUNK_SIZE, Config, DEFAULT_QUERY};
pub use credentials::Credentials;
pub use error::EntrezError;
pub use fetch::fetch_details;
pub use parser::SearchPage;
pub use record::{NO_ABSTRACT, Record};
pub use runner::{Summary, run};
pub use search::{search, search_all};
pub use writer::save_results;
