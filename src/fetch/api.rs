use chrono::Local;

use crate::core::{
    DocumentFetcher, NewsClient, NsError, RawDocument, Ticker, client::TICKER_QUERY_PARAM, net,
};

pub(super) async fn fetch_quote_page(
    client: &NewsClient,
    ticker: &Ticker,
) -> Result<RawDocument, NsError> {
    let mut url = client.base_quote().clone();
    url.query_pairs_mut()
        .append_pair(TICKER_QUERY_PARAM, ticker.as_str());

    let fetched_on = Local::now().date_naive();

    let req = client.http().get(url);
    let resp = client.send_with_retry(req, None).await?;

    if !resp.status().is_success() {
        return Err(NsError::Status {
            status: resp.status().as_u16(),
            url: resp.url().to_string(),
        });
    }

    let body = net::get_text(resp, ticker.as_str()).await?;
    Ok(RawDocument::new(body, fetched_on))
}

impl DocumentFetcher for NewsClient {
    fn fetch_document<'a>(
        &'a self,
        ticker: &'a Ticker,
    ) -> core::pin::Pin<
        Box<dyn core::future::Future<Output = Result<RawDocument, NsError>> + Send + 'a>,
    > {
        Box::pin(fetch_quote_page(self, ticker))
    }
}
