//! Errors reported by the E-utilities service or found in its responses

/// Service-level failure, as opposed to transport or I/O errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntrezError {
    /// Response carried an `<ERROR>` element
    Api(String),
    /// esearch `<Count>` missing or not a number
    InvalidCount(String),
    /// Article lacks a field every record needs
    MissingField { pmid: String, field: &'static str },
}

impl std::fmt::Display for EntrezError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Api(msg) => write!(f, "E-utilities error: {msg}"),
            Self::InvalidCount(raw) => write!(f, "invalid result count: {raw:?}"),
            Self::MissingField { pmid, field } if pmid.is_empty() => {
                write!(f, "article without PMID is missing {field}")
            }
            Self::MissingField { pmid, field } => write!(f, "article {pmid} is missing {field}"),
        }
    }
}

impl std::error::Error for EntrezError {}
