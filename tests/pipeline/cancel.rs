use std::time::Duration;

use headline_sentiment::{NewsTableParser, NsError, Pipeline};

use crate::common::{CannedFetcher, day, news_page};

#[tokio::test]
async fn cancellation_during_fetch_leaves_the_store_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("h.csv");
    let source = CannedFetcher::new(day(2024, 3, 1))
        .hang("SLOW")
        .page("FAST", news_page(&[("09:30AM", "Fast headline")]));
    let p = Pipeline::builder()
        .store_path(&path)
        .build_with(source, NewsTableParser::new());

    let err = p
        .refresh_until(["FAST", "SLOW"], tokio::time::sleep(Duration::from_millis(50)))
        .await
        .unwrap_err();

    assert!(matches!(err, NsError::Cancelled));
    assert!(!path.exists());
}

#[tokio::test]
async fn ticker_deadline_turns_a_hang_into_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = CannedFetcher::new(day(2024, 3, 1))
        .hang("SLOW")
        .page("FAST", news_page(&[("09:30AM", "Fast headline")]));
    let p = Pipeline::builder()
        .store_path(dir.path().join("h.csv"))
        .ticker_deadline(Duration::from_millis(50))
        .build_with(source, NewsTableParser::new());

    let report = p.refresh(["SLOW", "FAST"]).await.unwrap();

    assert_eq!(report.added, 1);
    assert_eq!(report.errors.len(), 1);
    assert!(
        report
            .errors
            .values()
            .all(|e| matches!(e, NsError::Timeout { .. }))
    );
}
