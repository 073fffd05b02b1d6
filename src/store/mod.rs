//! Durable CSV history of scored headlines.
//!
//! The file is a flat table with the header
//! `Ticker,Date,Time,Title,Sentiment,Sentiment_Label`. Dates are written as
//! `YYYY-MM-DD`; a headline whose date could not be parsed has an empty Date.
//! Every write goes to a temporary file in the same directory which is then
//! renamed over the target, so readers see either the old or the new table.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

use crate::core::{HeadlineRecord, NsError, Ticker, client::DEFAULT_STORE_PATH};

/// Column names, in file order.
pub const COLUMNS: [&str; 6] = ["Ticker", "Date", "Time", "Title", "Sentiment", "Sentiment_Label"];

/// The history file and its merge policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryStore {
    path: PathBuf,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_PATH)
    }
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Reads every stored record in file order. A missing file is an empty history.
    ///
    /// Rows that do not match the schema (an unknown label, a non-numeric
    /// sentiment, missing columns) are skipped, so they are also dropped by the
    /// next rewrite. Unreadable dates are kept as `None`.
    ///
    /// # Errors
    ///
    /// Returns `NsError::Io` if the file cannot be opened or read.
    pub fn load(&self) -> Result<Vec<HeadlineRecord>, NsError> {
        match File::open(&self.path) {
            Ok(file) => read_records(file),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Merges `incoming` into `existing` with [`merge`] and atomically rewrites
    /// the file with the result. Creates the file (and its directory) if needed.
    ///
    /// Returns the merged table and the number of incoming records admitted.
    ///
    /// # Errors
    ///
    /// Returns `NsError::Io` or `NsError::Csv` if the table cannot be written.
    /// The previous file is left untouched in that case.
    pub fn merge_and_persist(
        &self,
        existing: Vec<HeadlineRecord>,
        incoming: Vec<HeadlineRecord>,
    ) -> Result<(Vec<HeadlineRecord>, usize), NsError> {
        let (merged, added) = merge(existing, incoming);
        write_records(&self.path, &merged)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(path = %self.path.display(), total = merged.len(), added, "history written");

        Ok((merged, added))
    }
}

/// Concatenates `existing` then `incoming` and keeps the first record seen for
/// each `(Ticker, Title)`.
///
/// Stored records always win: a headline seen again keeps the sentiment it was
/// first stored with, even if it would score differently now.
///
/// Returns the merged records and how many of them came from `incoming`.
#[must_use]
pub fn merge(
    existing: Vec<HeadlineRecord>,
    incoming: Vec<HeadlineRecord>,
) -> (Vec<HeadlineRecord>, usize) {
    let mut seen: HashSet<(Ticker, String)> = HashSet::with_capacity(existing.len() + incoming.len());
    let mut merged = Vec::with_capacity(existing.len() + incoming.len());

    for rec in existing {
        if seen.insert((rec.ticker.clone(), rec.title.clone())) {
            merged.push(rec);
        }
    }

    let mut added = 0;
    for rec in incoming {
        if seen.insert((rec.ticker.clone(), rec.title.clone())) {
            merged.push(rec);
            added += 1;
        }
    }
    (merged, added)
}

/// Writes `records` to `destination` in the history format, atomically.
/// The header is written even when there are no records.
///
/// # Errors
///
/// Returns `NsError::Io` or `NsError::Csv` on failure; `destination` is then unchanged.
pub fn write_records(destination: &Path, records: &[HeadlineRecord]) -> Result<(), NsError> {
    let dir = match destination.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
    {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(tmp.as_file_mut());
        wtr.write_record(COLUMNS)?;
        for rec in records {
            wtr.serialize(rec)?;
        }
        wtr.flush()?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(destination)?;
    Ok(())
}

fn read_records(file: File) -> Result<Vec<HeadlineRecord>, NsError> {
    let mut rdr = csv::Reader::from_reader(file);
    let mut records = Vec::new();
    for row in rdr.deserialize::<HeadlineRecord>() {
        match row {
            Ok(rec) => records.push(rec),
            Err(e) if e.is_io_error() => return Err(csv_io(e)),
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %_e, "skipping unreadable history row");
            }
        }
    }
    Ok(records)
}

/// Unwraps the I/O error inside a csv error so it surfaces as `NsError::Io`.
fn csv_io(e: csv::Error) -> NsError {
    match e.into_kind() {
        csv::ErrorKind::Io(io) => NsError::Io(io),
        other => NsError::Data(format!("{other:?}")),
    }
}

/// Reads the Date column: `YYYY-MM-DD`, optionally followed by a midnight
/// time as older files wrote it. Empty or unreadable values become `None`.
pub(crate) fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(parse_stored_date))
}

fn parse_stored_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().or_else(|| {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
            .ok()
            .map(|dt| dt.date())
    })
}
