use crate::core::{HeadlineRow, NsError, RawDocument, Ticker};

/// Rows extracted from one document, plus how many rows had to be dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedRows {
    pub rows: Vec<HeadlineRow>,
    /// Table rows that could not yield a title or a date/time cell.
    pub skipped: usize,
}

/// A trait for services that can fetch a ticker's quote page.
///
/// This decouples the batch fetcher and the pipeline from HTTP, so they can be
/// driven with canned documents. It is implemented by [`NewsClient`](crate::NewsClient).
pub trait DocumentFetcher: Send + Sync {
    /// Asynchronously fetches the raw page for a single, already-normalized ticker.
    ///
    /// # Returns
    /// A `Future` that resolves to the page body stamped with the fetch day, or
    /// the error that stopped this ticker.
    fn fetch_document<'a>(
        &'a self,
        ticker: &'a Ticker,
    ) -> core::pin::Pin<
        Box<dyn core::future::Future<Output = Result<RawDocument, NsError>> + Send + 'a>,
    >;
}

/// A trait for turning one document into headline rows.
///
/// Implementations must not fail: malformed input degrades to fewer rows.
/// It is implemented by [`NewsTableParser`](crate::NewsTableParser).
pub trait RowExtractor: Send + Sync {
    fn extract(&self, ticker: &Ticker, doc: &RawDocument) -> ExtractedRows;
}

impl<T: DocumentFetcher + ?Sized> DocumentFetcher for std::sync::Arc<T> {
    fn fetch_document<'a>(
        &'a self,
        ticker: &'a Ticker,
    ) -> core::pin::Pin<
        Box<dyn core::future::Future<Output = Result<RawDocument, NsError>> + Send + 'a>,
    > {
        (**self).fetch_document(ticker)
    }
}
