use std::path::PathBuf;
use std::time::Duration;

use crate::{
    core::{DocumentFetcher, NewsClient, NsError, RowExtractor},
    fetch::Fetcher,
    news_table::NewsTableParser,
    store::HistoryStore,
};

use super::Pipeline;

/// Configures a [`Pipeline`]. Unset options fall back to the defaults of the
/// HTTP client, the fetcher and the history store.
#[derive(Default)]
pub struct PipelineBuilder {
    client: Option<NewsClient>,
    store_path: Option<PathBuf>,
    concurrency: Option<usize>,
    ticker_deadline: Option<Duration>,
}

impl PipelineBuilder {
    /// Use a preconfigured HTTP client.
    #[must_use]
    pub fn client(mut self, client: NewsClient) -> Self {
        self.client = Some(client);
        self
    }

    /// Location of the history file. Default: `headlines_history.csv`.
    #[must_use]
    pub fn store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = Some(path.into());
        self
    }

    /// Number of tickers fetched at once. Default: 4.
    #[must_use]
    pub const fn concurrency(mut self, n: usize) -> Self {
        self.concurrency = Some(n);
        self
    }

    /// Wall-clock budget per ticker, retries included. Default: 30s.
    #[must_use]
    pub const fn ticker_deadline(mut self, dur: Duration) -> Self {
        self.ticker_deadline = Some(dur);
        self
    }

    /// Builds a pipeline over finviz with the default news table parser.
    ///
    /// # Errors
    ///
    /// Returns an error if the default HTTP client cannot be constructed.
    pub fn build(mut self) -> Result<Pipeline, NsError> {
        let client = match self.client.take() {
            Some(c) => c,
            None => NewsClient::builder().build()?,
        };
        Ok(self.build_with(client, NewsTableParser::default()))
    }

    /// Builds a pipeline over any page source and row extractor, e.g. canned
    /// documents in tests. A client set with [`client`](Self::client) is ignored.
    pub fn build_with<F: DocumentFetcher, X: RowExtractor>(self, source: F, extractor: X) -> Pipeline<F, X> {
        let mut fetcher = Fetcher::new(source);
        if let Some(n) = self.concurrency {
            fetcher = fetcher.concurrency(n);
        }
        if let Some(d) = self.ticker_deadline {
            fetcher = fetcher.deadline(d);
        }
        let store = self
            .store_path
            .map_or_else(HistoryStore::default, HistoryStore::new);

        Pipeline::from_parts(fetcher, extractor, store)
    }
}
