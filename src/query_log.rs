//! Append-only log of answered questions.
//!
//! The pipeline only sees the [`QueryLog`] capability; [`CsvQueryLog`] is the
//! flat-file implementation used by the binary.

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};

use time::OffsetDateTime;
use time::macros::format_description;

/// One answered question, as written to the log.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    timestamp: OffsetDateTime,
    question: String,
    raw_answer: String,
}

impl LogEntry {
    /// Creates an entry stamped with the given time.
    pub fn new(
        timestamp: OffsetDateTime,
        question: impl Into<String>,
        raw_answer: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            question: question.into(),
            raw_answer: raw_answer.into(),
        }
    }

    /// Creates an entry stamped with the current local time.
    ///
    /// Falls back to UTC when the local offset cannot be determined.
    pub fn now(question: impl Into<String>, raw_answer: impl Into<String>) -> Self {
        let timestamp = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        Self::new(timestamp, question, raw_answer)
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn raw_answer(&self) -> &str {
        &self.raw_answer
    }

    /// Formats the timestamp as `YYYY-MM-DD HH:MM:SS.ffffff`.
    pub fn formatted_timestamp(&self) -> String {
        let format = format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:6]"
        );
        self.timestamp
            .format(&format)
            .unwrap_or_else(|_| self.timestamp.unix_timestamp().to_string())
    }
}

/// Append-only sink for log entries.
pub trait QueryLog: Send + Sync {
    /// Appends one entry. Existing entries are never touched.
    fn append(&self, entry: &LogEntry) -> io::Result<()>;
}

/// Comma-separated flat file log: one `(timestamp, question, raw_answer)` row per entry.
///
/// The file is opened in append mode for every entry and closed again before
/// `append` returns. Concurrent writers are not coordinated.
#[derive(Debug, Clone)]
pub struct CsvQueryLog {
    path: PathBuf,
}

impl CsvQueryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl QueryLog for CsvQueryLog {
    fn append(&self, entry: &LogEntry) -> io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::CRLF)
            .from_writer(file);

        writer.write_record([
            entry.formatted_timestamp().as_str(),
            entry.question(),
            entry.raw_answer(),
        ])?;
        writer.flush()?;

        Ok(())
    }
}
