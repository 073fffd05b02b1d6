//! Batch fetching of quote pages with per-ticker failure isolation.

mod api;

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use futures::stream::{self, StreamExt};

use crate::core::{
    DocumentFetcher, FetchOutcome, NsError, Ticker,
    client::{DEFAULT_CONCURRENCY, DEFAULT_TICKER_DEADLINE},
};

/// Fetches one page per ticker through a [`DocumentFetcher`], a bounded number at a time.
///
/// A failing or hung ticker only ever produces an error outcome for itself.
#[derive(Debug, Clone)]
pub struct Fetcher<F> {
    source: F,
    concurrency: usize,
    deadline: Duration,
}

impl<F: DocumentFetcher> Fetcher<F> {
    /// Creates a fetcher with default concurrency (4) and per-ticker deadline (30s).
    pub fn new(source: F) -> Self {
        Self {
            source,
            concurrency: DEFAULT_CONCURRENCY,
            deadline: DEFAULT_TICKER_DEADLINE,
        }
    }

    /// Sets how many tickers are fetched at once. Values below 1 are treated as 1.
    #[must_use]
    pub fn concurrency(mut self, n: usize) -> Self {
        self.concurrency = n.max(1);
        self
    }

    /// Sets the wall-clock budget for a single ticker, retries included.
    #[must_use]
    pub const fn deadline(mut self, dur: Duration) -> Self {
        self.deadline = dur;
        self
    }

    pub fn source(&self) -> &F {
        &self.source
    }

    /// Fetches every ticker and returns one outcome per distinct ticker.
    ///
    /// Never fails as a whole: network errors, non-2xx statuses and deadline
    /// overruns are recorded in the ticker's outcome.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, tickers), fields(count = tickers.len())))]
    pub async fn fetch(&self, tickers: &[Ticker]) -> BTreeMap<Ticker, FetchOutcome> {
        let unique: BTreeSet<&Ticker> = tickers.iter().collect();
        let deadline = self.deadline;

        stream::iter(unique)
            .map(|ticker| async move {
                let document =
                    match tokio::time::timeout(deadline, self.source.fetch_document(ticker)).await {
                        Ok(res) => res,
                        Err(_) => Err(NsError::Timeout {
                            ticker: ticker.clone(),
                            after: deadline,
                        }),
                    };

                #[cfg(feature = "tracing")]
                if let Err(e) = &document {
                    tracing::warn!(%ticker, error = %e, "fetch failed");
                }

                FetchOutcome {
                    ticker: ticker.clone(),
                    document,
                }
            })
            .buffer_unordered(self.concurrency)
            .map(|outcome| (outcome.ticker.clone(), outcome))
            .collect()
            .await
    }
}
