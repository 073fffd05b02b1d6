use headline_sentiment::{NewsTableParser, RawDocument};

use crate::common::{day, ticker};

fn parse(html: &str) -> headline_sentiment::ExtractedRows {
    let doc = RawDocument::new(html, day(2024, 3, 1));
    NewsTableParser::new().parse(&ticker("MAL"), &doc)
}

#[test]
fn bad_rows_are_skipped_individually() {
    let html = r#"<table id="news-table">
<tr><td>Mar-01-24 09:00AM</td><td><a href="/1">First good row</a></td></tr>
<tr><td>09:10AM</td><td>no link in this row</td></tr>
<tr><td>09:20AM</td><td><a href="/2">   </a></td></tr>
<tr><td></td><td><a href="/3">Row without a time</a></td></tr>
<tr><td>09:40AM</td><td><a href="/4">Second good row</a></td></tr>
</table>"#;

    let out = parse(html);

    let titles: Vec<&str> = out.rows.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, ["First good row", "Second good row"]);
    assert_eq!(out.skipped, 3);
}

#[test]
fn tag_and_attribute_case_does_not_matter() {
    let html = "<HTML><BODY><TABLE ID='news-table'><TR><TD>10:00AM</TD><TD><A HREF=x>Upper &amp; case</A></TD></TR></TABLE></BODY></HTML>";

    let out = parse(html);

    assert_eq!(out.rows.len(), 1);
    assert_eq!(out.rows[0].title, "Upper & case");
    assert_eq!(out.rows[0].time, "10:00AM");
}

#[test]
fn unquoted_id_and_omitted_row_end_tags_are_tolerated() {
    let html = "<table id=news-table>\
        <tr><td>Mar-01-24 08:00AM<td><a href=/a>One</a>\
        <tr><td>08:30AM<td><a href=/b>Two</a>\
        </table>";

    let out = parse(html);

    let titles: Vec<&str> = out.rows.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, ["One", "Two"]);
    assert_eq!(out.rows[1].date, Some(day(2024, 3, 1)));
}

#[test]
fn nested_markup_inside_the_link_is_flattened() {
    let html = r#"<table id="news-table"><tr><td>11:00AM</td><td><a href="/n"><span class="hl">Nested</span> <b>markup</b><!-- ad --> here</a></td></tr></table>"#;

    let out = parse(html);

    assert_eq!(out.rows[0].title, "Nested markup here");
}

#[test]
fn id_mentioned_elsewhere_does_not_confuse_the_lookup() {
    let html = r#"<p>See the news-table below</p>
<div class="news-table-wrapper"><table class="x" id="news-table"><tr><td>12:00PM</td><td><a href="/z">Real row</a></td></tr></table></div>"#;

    let out = parse(html);

    assert_eq!(out.rows.len(), 1);
    assert_eq!(out.rows[0].title, "Real row");
}

#[test]
fn unterminated_table_runs_to_end_of_document() {
    let html = r#"<table id="news-table"><tr><td>01:00PM</td><td><a href="/u">Cut off page"#;

    let out = parse(html);

    assert_eq!(out.rows.len(), 1);
    assert_eq!(out.rows[0].title, "Cut off page");
}
