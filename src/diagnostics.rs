//! Failure logging to durable storage.
//!
//! Recording a failure is fire-and-forget: a log that cannot be written is
//! reported through `tracing` and otherwise ignored.

use chrono::Local;
use std::error::Error;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Default directory for failure logs.
pub const DEFAULT_LOG_DIR: &str = "logs";

const SEPARATOR: &str = "_______________________________________";

/// Sink for failures that should outlive the process.
pub trait FailureLog: Send + Sync {
    /// Record `error` with a short description of what was being attempted.
    fn record(&self, context: &str, error: &(dyn Error + 'static));
}

/// Appends failures to `<dir>/error_log_<MM-DD-YYYY>.txt`, one file per day.
#[derive(Debug, Clone)]
pub struct FileFailureLog {
    dir: PathBuf,
}

impl FileFailureLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of today's log file.
    pub fn current_path(&self) -> PathBuf {
        let date = Local::now().format("%m-%d-%Y");
        self.dir.join(format!("error_log_{}.txt", date))
    }

    fn try_record(&self, context: &str, error: &(dyn Error + 'static)) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.current_path())?;

        writeln!(file, "{}", SEPARATOR)?;
        writeln!(file, "Current time {}", Local::now().format("%H:%M:%S"))?;
        writeln!(file, "{}", context)?;
        writeln!(file, "Error: {}", error)?;
        let mut source = error.source();
        while let Some(cause) = source {
            writeln!(file, "Caused by: {}", cause)?;
            source = cause.source();
        }
        writeln!(file, "{}", SEPARATOR)?;
        Ok(())
    }
}

impl Default for FileFailureLog {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_DIR)
    }
}

impl FailureLog for FileFailureLog {
    fn record(&self, context: &str, error: &(dyn Error + 'static)) {
        if let Err(e) = self.try_record(context, error) {
            tracing::warn!(
                dir = %self.dir.display(),
                "Could not write failure log: {}",
                e
            );
        }
    }
}

/// Emits failures through `tracing` only.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingFailureLog;

impl FailureLog for TracingFailureLog {
    fn record(&self, context: &str, error: &(dyn Error + 'static)) {
        tracing::error!(context, "{}", error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{HttpError, SourceError};

    #[test]
    fn test_file_log_appends_error_chain() {
        let dir = tempfile::tempdir().unwrap();
        let log = FileFailureLog::new(dir.path().join("logs"));

        let err = SourceError::Http(HttpError::BadRequest("Invalid symbol.".to_string()));
        log.record("fetching BTCUSDT", &err);
        log.record("fetching ETHUSDT", &SourceError::Other("boom".to_string()));

        let contents = fs::read_to_string(log.current_path()).unwrap();
        assert!(contents.contains("fetching BTCUSDT"));
        assert!(contents.contains("Error: HTTP error: Bad request: Invalid symbol."));
        assert!(contents.contains("fetching ETHUSDT"));
        assert_eq!(contents.matches(SEPARATOR).count(), 4);
    }

    #[test]
    fn test_file_log_swallows_write_failures() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        fs::write(&blocker, b"file").unwrap();

        // The log directory path is a regular file, so creating it fails.
        let log = FileFailureLog::new(&blocker);
        log.record("fetching BTCUSDT", &SourceError::Other("boom".to_string()));
    }

    #[test]
    fn test_log_file_name_uses_date() {
        let log = FileFailureLog::new("logs");
        let name = log.current_path();
        let name = name.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("error_log_"));
        assert!(name.ends_with(".txt"));
        assert_eq!(name.len(), "error_log_01-31-2024.txt".len());
    }
}
