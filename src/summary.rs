//! Aggregations behind the dashboard views: ticker selection options, the
//! daily sentiment trend and the label distribution per ticker.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::core::{HeadlineRecord, SentimentLabel, Ticker};

/// Mean sentiment of one ticker's headlines on one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySentiment {
    pub date: NaiveDate,
    pub ticker: Ticker,
    pub mean: f64,
    /// Headlines averaged.
    pub count: usize,
}

/// Number of headlines with a given label for one ticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub ticker: Ticker,
    pub label: SentimentLabel,
    pub count: usize,
}

/// Distinct tickers, sorted.
#[must_use]
pub fn tickers(records: &[HeadlineRecord]) -> Vec<Ticker> {
    records
        .iter()
        .map(|r| r.ticker.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Mean sentiment per `(date, ticker)`, sorted by date then ticker.
///
/// Records without a date are left out.
#[must_use]
pub fn daily_sentiment(records: &[HeadlineRecord]) -> Vec<DailySentiment> {
    let mut groups: BTreeMap<(NaiveDate, &Ticker), (f64, usize)> = BTreeMap::new();
    for rec in records {
        let Some(date) = rec.date else { continue };
        let entry = groups.entry((date, &rec.ticker)).or_insert((0.0, 0));
        entry.0 += rec.sentiment;
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|((date, ticker), (sum, count))| DailySentiment {
            date,
            ticker: ticker.clone(),
            mean: sum / count as f64,
            count,
        })
        .collect()
}

/// Headline count per `(ticker, label)`, sorted by ticker then label.
/// Labels a ticker has no headlines for are omitted.
#[must_use]
pub fn label_counts(records: &[HeadlineRecord]) -> Vec<LabelCount> {
    let mut groups: BTreeMap<(&Ticker, SentimentLabel), usize> = BTreeMap::new();
    for rec in records {
        *groups.entry((&rec.ticker, rec.sentiment_label)).or_insert(0) += 1;
    }

    groups
        .into_iter()
        .map(|((ticker, label), count)| LabelCount {
            ticker: ticker.clone(),
            label,
            count,
        })
        .collect()
}
