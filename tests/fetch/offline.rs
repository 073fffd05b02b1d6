use httpmock::Method::GET;
use httpmock::MockServer;
use url::Url;

use headline_sentiment::{DocumentFetcher, Fetcher, NewsClient, NsError, RetryConfig};

use crate::common::{news_page, ticker};

fn client_for(server: &MockServer) -> NewsClient {
    NewsClient::builder()
        .base_quote(Url::parse(&server.url("/quote.ashx")).unwrap())
        .retry_policy(RetryConfig::disabled())
        .build()
        .unwrap()
}

#[tokio::test]
async fn normalized_symbol_is_sent_as_query_parameter() {
    let server = MockServer::start();
    let body = news_page(&[("09:30AM", "Berkshire headline")]);

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/quote.ashx")
            .query_param("t", "BRK-A")
            .header(
                "user-agent",
                concat!("headline-sentiment/", env!("CARGO_PKG_VERSION")),
            );
        then.status(200)
            .header("content-type", "text/html")
            .body(body.clone());
    });

    let client = client_for(&server);
    let doc = client.fetch_document(&ticker("brk.a")).await.unwrap();
    mock.assert();

    assert_eq!(doc.body, body);
}

#[tokio::test]
async fn non_2xx_maps_to_status_error() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET).path("/quote.ashx").query_param("t", "NOPE");
        then.status(404).body("not found");
    });

    let client = client_for(&server);
    let err = client.fetch_document(&ticker("nope")).await.unwrap_err();
    mock.assert();

    match err {
        NsError::Status { status, url } => {
            assert_eq!(status, 404);
            assert!(url.contains("t=NOPE"), "{url}");
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn every_requested_ticker_gets_an_outcome() {
    let server = MockServer::start();

    let ok = server.mock(|when, then| {
        when.method(GET).path("/quote.ashx").query_param("t", "AAPL");
        then.status(200).body(news_page(&[("09:30AM", "Apple headline")]));
    });
    let bad = server.mock(|when, then| {
        when.method(GET).path("/quote.ashx").query_param("t", "BAD");
        then.status(500).body("oops");
    });

    let fetcher = Fetcher::new(client_for(&server));
    let tickers = [ticker("AAPL"), ticker("BAD"), ticker("aapl")];
    let out = fetcher.fetch(&tickers).await;

    ok.assert_hits(1);
    bad.assert_hits(1);
    assert_eq!(out.len(), 2);
    assert!(out[&ticker("AAPL")].document.is_ok());
    assert!(matches!(
        out[&ticker("BAD")].document,
        Err(NsError::Status { status: 500, .. })
    ));
}
