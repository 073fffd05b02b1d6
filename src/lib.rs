//! headline-sentiment: finviz headline collection with lexicon sentiment scoring.
//!
//! A refresh fetches each ticker's quote page, pulls the rows of its news
//! table, scores every headline and merges the results into a CSV history in
//! which each `(ticker, title)` appears once. The dashboard reads that history
//! through [`Pipeline::query`], [`Pipeline::export`] and the [`summary`] helpers.
//!
//! ```no_run
//! # async fn run() -> Result<(), headline_sentiment::NsError> {
//! use headline_sentiment::Pipeline;
//!
//! headline_sentiment::sentiment::init();
//! let pipeline = Pipeline::builder().store_path("headlines_history.csv").build()?;
//! let report = pipeline.refresh(["aapl", "brk.a"]).await?;
//! println!("added {} headlines, {} tickers failed", report.added, report.errors.len());
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod fetch;
pub mod news_table;
pub mod pipeline;
pub mod sentiment;
pub mod store;
pub mod summary;

pub use crate::core::{
    Backoff, DocumentFetcher, ExtractedRows, FetchOutcome, HeadlineRecord, HeadlineRow,
    NewsClient, NewsClientBuilder, NsError, RawDocument, RetryConfig, RowExtractor,
    SentimentLabel, Ticker,
};
pub use fetch::Fetcher;
pub use news_table::NewsTableParser;
pub use pipeline::{Pipeline, PipelineBuilder, RefreshReport};
pub use sentiment::{Lexicon, Score, SentimentScorer};
pub use store::HistoryStore;
