use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::NsError;

/* ----- TICKER (shared by fetch/, news_table/, store/) ----- */

/// A normalized ticker symbol: trimmed, uppercase, with `.` replaced by `-`.
///
/// This is the form finviz expects in its `t=` query parameter (`BRK.A` is
/// served as `BRK-A`) and the partition key of every stored record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Normalizes a raw user-supplied symbol.
    ///
    /// # Errors
    ///
    /// Returns `NsError::InvalidParams` if the symbol is empty after trimming.
    pub fn parse(raw: &str) -> Result<Self, NsError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(NsError::InvalidParams("empty ticker symbol".into()));
        }
        Ok(Self(trimmed.to_uppercase().replace('.', "-")))
    }

    /// The normalized symbol.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Ticker {
    type Error = NsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Ticker> for String {
    fn from(t: Ticker) -> Self {
        t.0
    }
}

impl std::str::FromStr for Ticker {
    type Err = NsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/* ----- FETCH (shared by fetch/ and pipeline/) ----- */

/// The body of one ticker's quote page, stamped with the day it was fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    /// The HTML text as served.
    pub body: String,
    /// The local calendar day at fetch time. Rows that only carry a time of day
    /// are dated with this.
    pub fetched_on: NaiveDate,
}

impl RawDocument {
    pub fn new(body: impl Into<String>, fetched_on: NaiveDate) -> Self {
        Self {
            body: body.into(),
            fetched_on,
        }
    }
}

/// Result of fetching a single ticker within a batch.
#[derive(Debug)]
pub struct FetchOutcome {
    pub ticker: Ticker,
    pub document: Result<RawDocument, NsError>,
}

/* ----- HEADLINES (shared by news_table/, sentiment/, store/) ----- */

/// Discretized polarity of a compound sentiment score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Negative,
    Neutral,
    Positive,
}

impl SentimentLabel {
    /// Scores strictly above this are positive.
    pub const POSITIVE_THRESHOLD: f64 = 0.05;
    /// Scores strictly below this are negative.
    pub const NEGATIVE_THRESHOLD: f64 = -0.05;

    /// Labels a compound score. Both thresholds are exclusive, so `0.05` and
    /// `-0.05` are neutral.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score > Self::POSITIVE_THRESHOLD {
            Self::Positive
        } else if score < Self::NEGATIVE_THRESHOLD {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Negative => "negative",
            Self::Neutral => "neutral",
            Self::Positive => "positive",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a ticker's news table, before scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlineRow {
    pub ticker: Ticker,
    /// `None` when the page carried a date token that could not be parsed.
    pub date: Option<NaiveDate>,
    pub time: String,
    pub title: String,
}

/// A scored headline as persisted in the history file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadlineRecord {
    #[serde(rename = "Ticker")]
    pub ticker: Ticker,
    #[serde(
        rename = "Date",
        default,
        deserialize_with = "crate::store::lenient_date"
    )]
    pub date: Option<NaiveDate>,
    #[serde(rename = "Time", default)]
    pub time: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Sentiment")]
    pub sentiment: f64,
    #[serde(rename = "Sentiment_Label")]
    pub sentiment_label: SentimentLabel,
}

impl HeadlineRecord {
    /// Attaches a compound score to a parsed row. The label is derived from
    /// the score.
    #[must_use]
    pub fn from_row(row: HeadlineRow, sentiment: f64) -> Self {
        Self {
            ticker: row.ticker,
            date: row.date,
            time: row.time,
            title: row.title,
            sentiment,
            sentiment_label: SentimentLabel::from_score(sentiment),
        }
    }

    /// The dedup key of the history store.
    #[must_use]
    pub fn key(&self) -> (&Ticker, &str) {
        (&self.ticker, self.title.as_str())
    }
}
