//! Logging to the console and, optionally, a timestamped log file.
//!
//! Console output goes through indicatif's `MultiProgress` on a TTY so log
//! lines do not tear the spinners.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use indicatif::MultiProgress;

use crate::timestamp::{file_stamp, line_stamp};

/// ANSI color code and label for a log level (`WARNING`, not `WARN`).
fn level_style(level: log::Level, color: bool) -> (&'static str, &'static str, &'static str) {
    let label = match level {
        log::Level::Error => "ERROR",
        log::Level::Warn => "WARNING",
        log::Level::Info => "INFO",
        log::Level::Debug => "DEBUG",
        log::Level::Trace => "TRACE",
    };
    if !color {
        return ("", label, "");
    }
    let ansi = match level {
        log::Level::Error => "\x1b[31m",
        log::Level::Warn => "\x1b[33m",
        log::Level::Info => "\x1b[32m",
        log::Level::Debug => "\x1b[36m",
        log::Level::Trace => "\x1b[35m",
    };
    (ansi, label, "\x1b[0m")
}

/// `2026-01-31 09:15:02,431 - INFO - message`
fn format_line(stamp: &str, level: log::Level, color: bool, msg: &std::fmt::Arguments) -> String {
    let (pre, label, post) = level_style(level, color);
    format!("{stamp} - {pre}{label}{post} - {msg}")
}

/// Logger that writes every enabled record to the console and a log file.
///
/// Filtering is delegated to an `env_logger::Logger`, so `RUST_LOG` works as usual.
pub struct TeeLogger {
    inner: env_logger::Logger,
    multi: Option<MultiProgress>,
    file: Option<Mutex<File>>,
}

impl TeeLogger {
    pub fn new(inner: env_logger::Logger, multi: Option<MultiProgress>, file: Option<File>) -> Self {
        Self {
            inner,
            multi,
            file: file.map(Mutex::new),
        }
    }
}

impl log::Log for TeeLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.inner.enabled(metadata)
    }

    fn log(&self, record: &log::Record) {
        if !self.inner.enabled(record.metadata()) {
            return;
        }
        let stamp = line_stamp(chrono::Local::now());

        if let Some(file) = &self.file {
            let line = format_line(&stamp, record.level(), false, record.args());
            if let Ok(mut f) = file.lock() {
                let _ = writeln!(f, "{line}");
            }
        }

        match &self.multi {
            // TTY: colored, printed above the spinners
            Some(multi) => {
                let line = format_line(&stamp, record.level(), true, record.args());
                multi.suspend(|| eprintln!("{line}"));
            }
            None => {
                let line = format_line(&stamp, record.level(), false, record.args());
                eprintln!("{line}");
            }
        }
    }

    fn flush(&self) {
        if let Some(file) = &self.file {
            if let Ok(mut f) = file.lock() {
                let _ = f.flush();
            }
        }
    }
}

/// Create `<dir>/log_YYYYmmdd_HHMMSS.log`, creating `dir` if needed.
pub fn create_log_file(dir: &Path) -> io::Result<(File, PathBuf)> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("log_{}.log", file_stamp(chrono::Local::now())));
    let file = File::create(&path)?;
    Ok((file, path))
}

/// Initialize the process-wide logger.
///
/// With `log_dir`, records are mirrored into a fresh timestamped file whose
/// path is returned. `multi` is given only in TTY mode.
pub fn init_logging(
    debug: bool,
    log_dir: Option<&Path>,
    multi: Option<&MultiProgress>,
) -> io::Result<Option<PathBuf>> {
    let default_level = if debug { "debug" } else { "info" };

    let inner =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .build();
    let max_level = inner.filter();

    let (file, path) = match log_dir {
        Some(dir) => {
            let (file, path) = create_log_file(dir)?;
            (Some(file), Some(path))
        }
        None => (None, None),
    };

    log::set_boxed_logger(Box::new(TeeLogger::new(inner, multi.cloned(), file)))
        .map_err(io::Error::other)?;
    log::set_max_level(max_level);

    Ok(path)
}
