//! pmharvest core - shared infrastructure for the PubMed harvester
//!
//! Console/file logging, a blocking HTTP facade, progress spinners,
//! a parquet sink and CSV-backed tables.

pub mod http;
pub mod logging;
pub mod progress;
pub mod sink;
pub mod table;
pub mod timestamp;

// Re-exports for convenience
pub use http::{HttpError, get_text, post_form_text};
pub use logging::{TeeLogger, init_logging};
pub use progress::{ProgressContext, SharedProgress, fmt_num};
pub use sink::{ParquetSink, is_valid_parquet};
pub use table::{Table, TableError};
pub use timestamp::{file_stamp, line_stamp};
