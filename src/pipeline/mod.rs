//! Orchestration of a refresh (fetch → parse → score → merge) and the read side
//! the dashboard queries.

mod builder;

pub use builder::PipelineBuilder;

use std::collections::{BTreeMap, HashSet};
use std::future::Future;
use std::path::Path;

use tokio::sync::Mutex;

use crate::{
    core::{DocumentFetcher, HeadlineRecord, NewsClient, NsError, RowExtractor, Ticker},
    fetch::Fetcher,
    news_table::NewsTableParser,
    sentiment::SentimentScorer,
    store::{self, HistoryStore},
};

/// Outcome of one refresh.
#[derive(Debug, Default)]
pub struct RefreshReport {
    /// Records admitted into the history.
    pub added: usize,
    /// Tickers whose page could not be fetched, with the reason.
    pub errors: BTreeMap<Ticker, NsError>,
    /// Rows extracted across all fetched pages, before dedup.
    pub rows_parsed: usize,
    /// Table rows dropped because they had no title or date/time cell.
    pub rows_skipped: usize,
}

#[derive(Default)]
struct Batch {
    records: Vec<HeadlineRecord>,
    errors: BTreeMap<Ticker, NsError>,
    rows_skipped: usize,
}

/// The headline pipeline over a page source `F`, a row extractor `X` and a history file.
///
/// Refreshes may run concurrently; their store updates are serialized.
pub struct Pipeline<F = NewsClient, X = NewsTableParser> {
    fetcher: Fetcher<F>,
    extractor: X,
    scorer: SentimentScorer,
    store: HistoryStore,
    write_lock: Mutex<()>,
}

impl Pipeline {
    /// Create a new builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }
}

impl<F: DocumentFetcher, X: RowExtractor> Pipeline<F, X> {
    /// Assembles a pipeline from explicit parts.
    pub fn from_parts(fetcher: Fetcher<F>, extractor: X, store: HistoryStore) -> Self {
        Self {
            fetcher,
            extractor,
            scorer: SentimentScorer::new(),
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    /// Fetches, parses and scores the headlines of `tickers` and merges them
    /// into the history.
    ///
    /// Tickers are normalized and deduplicated first. A ticker whose fetch
    /// fails is reported in [`RefreshReport::errors`] and contributes no rows.
    /// If no ticker yields a row the history file is not touched.
    ///
    /// # Errors
    ///
    /// Returns `NsError::InvalidParams` if no ticker remains after
    /// normalization, and `NsError::Io`/`NsError::Csv` if the history cannot
    /// be read or rewritten.
    pub async fn refresh<I, S>(&self, tickers: I) -> Result<RefreshReport, NsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.refresh_until(tickers, std::future::pending()).await
    }

    /// Like [`refresh`](Self::refresh), but gives up with `NsError::Cancelled`
    /// if `cancel` completes while pages are still being fetched or parsed.
    ///
    /// Cancellation is only observed before the history is loaded for merging;
    /// once the merge starts it runs to completion.
    ///
    /// # Errors
    ///
    /// As for `refresh`, plus `NsError::Cancelled`.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, err))]
    pub async fn refresh_until<I, S, C>(&self, tickers: I, cancel: C) -> Result<RefreshReport, NsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        C: Future<Output = ()>,
    {
        let tickers = normalize_tickers(tickers)?;

        let batch = tokio::select! {
            biased;
            () = cancel => return Err(NsError::Cancelled),
            batch = self.collect_batch(&tickers) => batch,
        };

        let mut report = RefreshReport {
            added: 0,
            errors: batch.errors,
            rows_parsed: batch.records.len(),
            rows_skipped: batch.rows_skipped,
        };

        if batch.records.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::info!(failed = report.errors.len(), "no headlines found, history untouched");
            return Ok(report);
        }

        let _guard = self.write_lock.lock().await;
        let existing = self.store.load()?;
        let (_, added) = self.store.merge_and_persist(existing, batch.records)?;
        report.added = added;

        #[cfg(feature = "tracing")]
        tracing::info!(
            added,
            parsed = report.rows_parsed,
            skipped = report.rows_skipped,
            failed = report.errors.len(),
            "history refreshed"
        );

        Ok(report)
    }

    /// Stored records for the selected tickers, in store order. An empty
    /// selection returns the whole history.
    ///
    /// # Errors
    ///
    /// Returns `NsError::Io` if the history cannot be read.
    pub fn query(&self, selected: &[Ticker]) -> Result<Vec<HeadlineRecord>, NsError> {
        let records = self.store.load()?;
        Ok(filter_records(records, selected))
    }

    /// Writes the [`query`](Self::query) result for `selected` to `destination`
    /// in the history format and returns the number of records written.
    ///
    /// # Errors
    ///
    /// Returns `NsError::Io`/`NsError::Csv` if reading the history or writing
    /// `destination` fails.
    pub fn export(&self, selected: &[Ticker], destination: impl AsRef<Path>) -> Result<usize, NsError> {
        let records = self.query(selected)?;
        store::write_records(destination.as_ref(), &records)?;
        Ok(records.len())
    }

    /// Fetches every ticker, then parses and scores the successes in input
    /// order, so the batch order never depends on which fetch finished first.
    async fn collect_batch(&self, tickers: &[Ticker]) -> Batch {
        let mut outcomes = self.fetcher.fetch(tickers).await;
        let mut batch = Batch::default();

        for ticker in tickers {
            let Some(outcome) = outcomes.remove(ticker) else {
                continue;
            };
            match outcome.document {
                Ok(doc) => {
                    let extracted = self.extractor.extract(ticker, &doc);
                    batch.rows_skipped += extracted.skipped;
                    batch.records.extend(extracted.rows.into_iter().map(|row| {
                        let sentiment = self.scorer.compound(&row.title);
                        HeadlineRecord::from_row(row, sentiment)
                    }));
                }
                Err(e) => {
                    batch.errors.insert(ticker.clone(), e);
                }
            }
        }
        batch
    }
}

/// Normalizes raw symbols, dropping blanks and repeats while keeping first-seen order.
///
/// # Errors
///
/// Returns `NsError::InvalidParams` if nothing is left.
pub fn normalize_tickers<I, S>(raw: I) -> Result<Vec<Ticker>, NsError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let tickers: Vec<Ticker> = raw
        .into_iter()
        .filter_map(|s| Ticker::parse(s.as_ref()).ok())
        .filter(|t| seen.insert(t.clone()))
        .collect();

    if tickers.is_empty() {
        return Err(NsError::InvalidParams("no tickers specified".into()));
    }
    Ok(tickers)
}

/// Keeps the records whose ticker is selected; an empty selection keeps everything.
#[must_use]
pub fn filter_records(records: Vec<HeadlineRecord>, selected: &[Ticker]) -> Vec<HeadlineRecord> {
    if selected.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|r| selected.contains(&r.ticker))
        .collect()
}
