//! Public client surface + builder.
//! Internals are split into `retry` (backoff policy) and `constants` (UA + defaults).

mod constants;
mod retry;

pub(crate) use constants::{
    DEFAULT_CONCURRENCY, DEFAULT_STORE_PATH, DEFAULT_TICKER_DEADLINE, TICKER_QUERY_PARAM,
};
pub use retry::{Backoff, RetryConfig};

use crate::core::NsError;
use constants::{DEFAULT_BASE_QUOTE, DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT, USER_AGENT};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// HTTP client for finviz quote pages.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct NewsClient {
    http: Client,
    base_quote: Url,
    retry: RetryConfig,
}

impl Default for NewsClient {
    fn default() -> Self {
        Self::builder().build().expect("default client")
    }
}

impl NewsClient {
    /// Create a new builder.
    pub fn builder() -> NewsClientBuilder {
        NewsClientBuilder::default()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }
    pub(crate) fn base_quote(&self) -> &Url {
        &self.base_quote
    }

    /// The retry policy applied to every page request.
    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct NewsClientBuilder {
    user_agent: Option<String>,
    base_quote: Option<Url>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    retry: Option<RetryConfig>,
}

impl NewsClientBuilder {
    /// Override the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the quote page URL (e.g., `https://finviz.com/quote.ashx`).
    pub fn base_quote(mut self, url: Url) -> Self {
        self.base_quote = Some(url);
        self
    }

    /// Set the per-attempt request timeout. Default: 10s.
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: 5s.
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Replace the default retry policy.
    pub fn retry_policy(mut self, cfg: RetryConfig) -> Self {
        self.retry = Some(cfg);
        self
    }

    pub fn build(self) -> Result<NewsClient, NsError> {
        let base_quote = match self.base_quote {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_QUOTE)?,
        };

        let http = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT))
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .connect_timeout(self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT))
            .build()?;

        Ok(NewsClient {
            http,
            base_quote,
            retry: self.retry.unwrap_or_default(),
        })
    }
}
