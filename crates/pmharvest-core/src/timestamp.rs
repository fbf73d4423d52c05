//! Timestamp formats shared by log lines and output file names.

use chrono::{DateTime, TimeZone};

/// Second-granularity stamp for file names: `20260131_091502`.
///
/// Two runs started within the same second produce the same name.
pub fn file_stamp<Tz: TimeZone>(now: DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%Y%m%d_%H%M%S").to_string()
}

/// Millisecond stamp for log lines: `2026-01-31 09:15:02,431`.
pub fn line_stamp<Tz: TimeZone>(now: DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%Y-%m-%d %H:%M:%S,%3f").to_string()
}
