//! Extraction of headline rows from a finviz quote page.
//!
//! The page carries a single table with id `news-table`. Each row holds a
//! date/time cell and a link whose text is the headline. The date/time cell is
//! either `"<date> <time>"` for the first headline of a day or just `"<time>"`
//! for the rest; a lone time is dated with the fetch day.

mod scan;

use chrono::NaiveDate;

use crate::core::{ExtractedRows, HeadlineRow, RawDocument, RowExtractor, Ticker};
use scan::Scanner;

/// Id of the element holding the news rows.
pub const NEWS_TABLE_ID: &str = "news-table";

/// Formats tried, in order, for the date token of a date/time cell.
/// Two-digit years are tried before four-digit ones, since `%Y` also accepts `24`.
const DATE_FORMATS: &[&str] = &[
    "%b-%d-%y",
    "%b-%d-%Y",
    "%Y-%m-%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%d-%b-%y",
    "%d-%b-%Y",
];

/// Default [`RowExtractor`]: scans the page for the news table by element id.
#[derive(Debug, Clone)]
pub struct NewsTableParser {
    table_id: String,
}

impl Default for NewsTableParser {
    fn default() -> Self {
        Self {
            table_id: NEWS_TABLE_ID.to_string(),
        }
    }
}

impl NewsTableParser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks for a different element id than `news-table`.
    #[must_use]
    pub fn with_table_id(id: impl Into<String>) -> Self {
        Self {
            table_id: id.into(),
        }
    }

    /// Parses every row of the news table.
    ///
    /// A missing table yields no rows. Rows without a title or without a
    /// date/time cell are dropped and counted in `skipped`.
    #[must_use]
    pub fn parse(&self, ticker: &Ticker, doc: &RawDocument) -> ExtractedRows {
        let scanner = Scanner::new(&doc.body);
        let Some(table) = scanner.element_by_id(&self.table_id) else {
            #[cfg(feature = "tracing")]
            tracing::debug!(%ticker, table_id = %self.table_id, "news table not found");
            return ExtractedRows::default();
        };

        let mut out = ExtractedRows::default();
        for row in scanner.flat_blocks(table, "tr") {
            let title = scanner
                .first_block(row.clone(), "a")
                .map(|a| scanner.text(a).trim().to_string())
                .filter(|t| !t.is_empty());
            let cell = scanner
                .first_block(row, "td")
                .map(|td| scanner.text(td));

            let decoded = cell.and_then(|c| decode_date_time(&c, doc.fetched_on));
            match (title, decoded) {
                (Some(title), Some((date, time))) => out.rows.push(HeadlineRow {
                    ticker: ticker.clone(),
                    date,
                    time,
                    title,
                }),
                _ => out.skipped += 1,
            }
        }

        #[cfg(feature = "tracing")]
        if out.skipped > 0 {
            tracing::debug!(%ticker, skipped = out.skipped, "rows without title or date/time cell");
        }

        #[cfg(debug_assertions)]
        {
            if std::env::var("NS_DEBUG").ok().as_deref() == Some("1") {
                eprintln!(
                    "NS_DEBUG [news_table]: {ticker}: {} rows, {} skipped",
                    out.rows.len(),
                    out.skipped
                );
            }
        }
        out
    }
}

impl RowExtractor for NewsTableParser {
    fn extract(&self, ticker: &Ticker, doc: &RawDocument) -> ExtractedRows {
        self.parse(ticker, doc)
    }
}

/// Splits a date/time cell into `(date, time)`.
///
/// - one token: it is the time, dated `fetched_on`;
/// - two or more: the first is the date (`None` if unparsable), the second the time;
/// - none: `None`, the row has no usable cell.
#[must_use]
pub fn decode_date_time(cell: &str, fetched_on: NaiveDate) -> Option<(Option<NaiveDate>, String)> {
    let tokens: Vec<&str> = cell.split_whitespace().collect();
    match tokens.as_slice() {
        [] => None,
        [time] => Some((Some(fetched_on), (*time).to_string())),
        [date, time, ..] => Some((parse_date_token(date, fetched_on), (*time).to_string())),
    }
}

/// Best-effort parse of a date token. `Today` and `Yesterday` are resolved
/// against `fetched_on`.
#[must_use]
pub fn parse_date_token(token: &str, fetched_on: NaiveDate) -> Option<NaiveDate> {
    if token.eq_ignore_ascii_case("today") {
        return Some(fetched_on);
    }
    if token.eq_ignore_ascii_case("yesterday") {
        return fetched_on.pred_opt();
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(token, fmt).ok())
}
