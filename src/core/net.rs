/// Read the response body as text.
/// In debug builds, `NS_DEBUG=1` reports the body size for the ticker on stderr.
pub(crate) async fn get_text(resp: reqwest::Response, _ticker: &str) -> Result<String, reqwest::Error> {
    let text = resp.text().await?;

    #[cfg(debug_assertions)]
    {
        if std::env::var("NS_DEBUG").ok().as_deref() == Some("1") {
            eprintln!("NS_DEBUG [get_text]: {_ticker}: {} bytes", text.len());
        }
    }

    Ok(text)
}
