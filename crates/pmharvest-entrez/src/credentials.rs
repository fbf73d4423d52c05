//! NCBI account credentials read from a two-line `label:value` file

use std::path::Path;

use anyhow::{Context, Result, bail};

/// Identity (email) and API key sent with every E-utilities request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub api_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Read credentials from `path`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read credentials file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Malformed credentials file: {}", path.display()))
    }

    /// Parse `label:email` on the first line and `label:key` on the second.
    ///
    /// The value is the text between the first and second colon, trimmed.
    /// Trailing blank lines are ignored.
    pub fn parse(content: &str) -> Result<Self> {
        let mut lines: Vec<&str> = content.lines().collect();
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }

        if lines.len() != 2 {
            bail!("expected 2 lines (email, api key), found {}", lines.len());
        }

        let email = field_value(lines[0], 1)?;
        let api_key = field_value(lines[1], 2)?;
        Ok(Self { email, api_key })
    }
}

fn field_value(line: &str, lineno: usize) -> Result<String> {
    match line.split(':').nth(1) {
        Some(value) => Ok(value.trim().to_string()),
        None => bail!("line {lineno} has no ':' separator"),
    }
}
