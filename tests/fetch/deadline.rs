use std::time::Duration;

use headline_sentiment::{Fetcher, NsError};

use crate::common::{CannedFetcher, day, news_page, ticker};

#[tokio::test]
async fn hung_ticker_times_out_without_blocking_the_rest() {
    let source = CannedFetcher::new(day(2024, 3, 1))
        .hang("SLOW")
        .page("FAST", news_page(&[("09:30AM", "Quick headline")]));
    let fetcher = Fetcher::new(source)
        .concurrency(1)
        .deadline(Duration::from_millis(50));

    let out = fetcher.fetch(&[ticker("SLOW"), ticker("FAST")]).await;

    assert!(out[&ticker("FAST")].document.is_ok());
    match &out[&ticker("SLOW")].document {
        Err(NsError::Timeout { ticker: t, after }) => {
            assert_eq!(t.as_str(), "SLOW");
            assert_eq!(*after, Duration::from_millis(50));
        }
        other => panic!("expected Timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn duplicate_tickers_are_fetched_once() {
    let source = CannedFetcher::new(day(2024, 3, 1)).page("DUP", news_page(&[]));
    let fetcher = Fetcher::new(source).concurrency(0);

    let out = fetcher.fetch(&[ticker("dup"), ticker("DUP")]).await;

    assert_eq!(out.len(), 1);
    assert_eq!(fetcher.source().calls(), 1);
}
