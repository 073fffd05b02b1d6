use headline_sentiment::{NewsTableParser, RawDocument, RowExtractor};

use crate::common::{day, news_page, page_without_news, ticker};

#[test]
fn parses_every_row_of_the_news_table_only() {
    let html = news_page(&[
        ("Mar-01-24 09:30AM", "Apple beats estimates"),
        ("08:15AM", "Apple opens new store"),
        ("Feb-29-24 05:00PM", "Apple faces lawsuit"),
    ]);
    let doc = RawDocument::new(html, day(2024, 3, 2));

    let out = NewsTableParser::new().parse(&ticker("AAPL"), &doc);

    assert_eq!(out.skipped, 0);
    let titles: Vec<&str> = out.rows.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(
        titles,
        ["Apple beats estimates", "Apple opens new store", "Apple faces lawsuit"],
        "ratings and footer tables must not leak into the result"
    );
    assert!(out.rows.iter().all(|r| r.ticker.as_str() == "AAPL"));
}

#[test]
fn lone_time_token_is_dated_with_the_fetch_day() {
    let html = news_page(&[("09:30AM", "Quiet morning for markets")]);
    let doc = RawDocument::new(html, day(2024, 3, 1));

    let out = NewsTableParser::new().parse(&ticker("SPY"), &doc);

    assert_eq!(out.rows.len(), 1);
    assert_eq!(out.rows[0].date, Some(day(2024, 3, 1)));
    assert_eq!(out.rows[0].time, "09:30AM");
}

#[test]
fn date_and_time_tokens_are_split() {
    let html = news_page(&[("Feb-28-24 04:05PM", "Late session rally")]);
    let doc = RawDocument::new(html, day(2024, 3, 1));

    let out = NewsTableParser::new().parse(&ticker("QQQ"), &doc);

    assert_eq!(out.rows[0].date, Some(day(2024, 2, 28)));
    assert_eq!(out.rows[0].time, "04:05PM");
}

#[test]
fn unparsable_date_keeps_the_row_without_a_date() {
    let html = news_page(&[("Someday 11:00AM", "Mystery headline")]);
    let doc = RawDocument::new(html, day(2024, 3, 1));

    let out = NewsTableParser::new().parse(&ticker("XYZ"), &doc);

    assert_eq!(out.rows.len(), 1);
    assert_eq!(out.rows[0].date, None);
    assert_eq!(out.rows[0].time, "11:00AM");
    assert_eq!(out.rows[0].title, "Mystery headline");
}

#[test]
fn missing_table_means_no_news() {
    let doc = RawDocument::new(page_without_news(), day(2024, 3, 1));

    let out = NewsTableParser::new().parse(&ticker("NONE"), &doc);

    assert!(out.rows.is_empty());
    assert_eq!(out.skipped, 0);
}

#[test]
fn titles_are_trimmed_and_entities_decoded() {
    let html = news_page(&[("10:00AM", "  AT&amp;T &#8217;s outlook &quot;stable&quot;  ")]);
    let doc = RawDocument::new(html, day(2024, 3, 1));

    let out = NewsTableParser::new().parse(&ticker("T"), &doc);

    assert_eq!(out.rows[0].title, "AT&T \u{2019}s outlook \"stable\"");
}

#[test]
fn custom_table_id_is_honored_through_the_extractor_trait() {
    let html = r#"<div><table id="headlines"><tr><td>01:00PM</td><td><a href="/a">Custom id row</a></td></tr></table></div>"#;
    let doc = RawDocument::new(html, day(2024, 3, 1));
    let parser = NewsTableParser::with_table_id("headlines");

    let out = parser.extract(&ticker("ABC"), &doc);

    assert_eq!(out.rows.len(), 1);
    assert_eq!(out.rows[0].title, "Custom id row");
    assert_eq!(out.rows[0].date, Some(day(2024, 3, 1)));
}
