//! Centralized constants for default endpoints, UA and limits.

use std::time::Duration;

/// Fixed identifying UA sent with every quote page request.
pub(crate) const USER_AGENT: &str = concat!("headline-sentiment/", env!("CARGO_PKG_VERSION"));

/// finviz quote page (the ticker is passed as the `t` query parameter).
pub(crate) const DEFAULT_BASE_QUOTE: &str = "https://finviz.com/quote.ashx";

/// Query parameter carrying the normalized ticker.
pub(crate) const TICKER_QUERY_PARAM: &str = "t";

/// Overall HTTP timeout for a single request attempt.
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connect timeout for a single request attempt.
pub(crate) const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Wall-clock budget for one ticker, retries included.
pub(crate) const DEFAULT_TICKER_DEADLINE: Duration = Duration::from_secs(30);

/// Number of tickers fetched at once.
pub(crate) const DEFAULT_CONCURRENCY: usize = 4;

/// Default history file, relative to the working directory.
pub(crate) const DEFAULT_STORE_PATH: &str = "headlines_history.csv";
