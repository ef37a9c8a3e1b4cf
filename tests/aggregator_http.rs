//! Aggregation over real HTTP against mock servers.

use chrono::{TimeZone, Utc};
use feedwatch::cli::run_once;
use feedwatch::feed::{fetch_all, FeedSource, HttpFetcher};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn rss(items: &[(&str, &str)]) -> String {
    let items: String = items
        .iter()
        .map(|(link, date)| {
            format!(
                "<item><title>{link}</title><link>{link}</link><pubDate>{date}</pubDate></item>"
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0"?><rss version="2.0"><channel><title>T</title>{items}</channel></rss>"#
    )
}

async fn serve(server: &MockServer, route: &str, status: u16, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn failing_source_contributes_nothing() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/a",
        200,
        rss(&[
            ("https://a/old", "Mon, 01 Jan 2024 08:00:00 GMT"),
            ("https://a/new", "Mon, 01 Jan 2024 12:00:00 +0000"),
        ]),
    )
    .await;
    serve(&server, "/b", 500, String::new()).await;

    let sources = vec![
        FeedSource::new("A", format!("{}/a", server.uri())),
        FeedSource::new("B", format!("{}/b", server.uri())),
    ];
    let fetcher = HttpFetcher::new().unwrap();
    let articles = fetch_all(&fetcher, &sources).await;

    let links: Vec<&str> = articles.iter().map(|a| a.link.as_str()).collect();
    assert_eq!(links, vec!["https://a/new", "https://a/old"]);
    assert!(articles.iter().all(|a| a.source_name == "A"));
    assert_eq!(
        articles[0].published_at,
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    );
}

#[tokio::test]
async fn sources_interleave_by_date() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/a",
        200,
        rss(&[
            ("https://a/1", "Tue, 02 Jan 2024 10:00:00 GMT"),
            ("https://a/2", "Mon, 01 Jan 2024 10:00:00 GMT"),
        ]),
    )
    .await;
    let atom = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
    <title>Atom</title>
    <id>urn:feed</id>
    <updated>2024-01-01T18:00:00Z</updated>
    <entry>
        <title>Atom entry</title>
        <link href="https://b/1"/>
        <id>urn:entry</id>
        <updated>2024-01-01T18:00:00Z</updated>
    </entry>
</feed>"#;
    serve(&server, "/b", 200, atom.to_string()).await;

    let sources = vec![
        FeedSource::new("A", format!("{}/a", server.uri())),
        FeedSource::new("B", format!("{}/b", server.uri())),
    ];
    let articles = fetch_all(&HttpFetcher::new().unwrap(), &sources).await;

    let links: Vec<&str> = articles.iter().map(|a| a.link.as_str()).collect();
    assert_eq!(links, vec!["https://a/1", "https://b/1", "https://a/2"]);
    assert_eq!(articles[1].source_name, "B");
}

#[tokio::test]
async fn every_source_failing_yields_empty_batch() {
    let server = MockServer::start().await;
    serve(&server, "/a", 404, String::new()).await;
    serve(&server, "/b", 200, "not a feed".to_string()).await;

    let sources = vec![
        FeedSource::new("A", format!("{}/a", server.uri())),
        FeedSource::new("B", format!("{}/b", server.uri())),
    ];
    assert!(fetch_all(&HttpFetcher::new().unwrap(), &sources)
        .await
        .is_empty());
}

#[tokio::test]
async fn one_shot_prints_channel() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/feed",
        200,
        rss(&[("https://a/1", "Mon, 01 Jan 2024 08:00:00 GMT")]),
    )
    .await;

    let url = format!("{}/feed", server.uri());
    let mut out = Vec::new();
    run_once(&HttpFetcher::new().unwrap(), &url, &mut out)
        .await
        .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Feed: T\n"));
    assert!(text.contains("Title: https://a/1\nLink: https://a/1\nDate: Mon, 01 Jan 2024 08:00:00 GMT\n"));
}

const NAMESPACED_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:atom="http://www.w3.org/2005/Atom" version="2.0">
    <channel>
        <title><![CDATA[BBC News]]></title>
        <description><![CDATA[BBC News - News Front Page]]></description>
        <link>https://www.bbc.co.uk/news</link>
        <atom:link href="https://feeds.bbci.co.uk/news/rss.xml" rel="self" type="application/rss+xml"/>
        <item>
            <title><![CDATA[Storm warning issued]]></title>
            <description><![CDATA[Heavy rain expected.]]></description>
            <link>https://www.bbc.co.uk/news/articles/1</link>
            <pubDate>Mon, 01 Jan 2024 12:00:00 GMT</pubDate>
            <dc:creator>Weather desk</dc:creator>
        </item>
    </channel>
</rss>"#;

#[tokio::test]
async fn one_shot_prints_raw_date_of_namespaced_feed() {
    let server = MockServer::start().await;
    serve(&server, "/news", 200, NAMESPACED_RSS.to_string()).await;

    let url = format!("{}/news", server.uri());
    let mut out = Vec::new();
    run_once(&HttpFetcher::new().unwrap(), &url, &mut out)
        .await
        .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Feed: BBC News\nDescription: BBC News - News Front Page\nLink: https://www.bbc.co.uk/news\n"));
    assert!(text.contains(
        "Title: Storm warning issued\nLink: https://www.bbc.co.uk/news/articles/1\nDate: Mon, 01 Jan 2024 12:00:00 GMT\n"
    ));
}

#[tokio::test]
async fn namespaced_feed_aggregates_with_its_own_dates() {
    let server = MockServer::start().await;
    serve(&server, "/news", 200, NAMESPACED_RSS.to_string()).await;

    let sources = vec![FeedSource::new("BBC", format!("{}/news", server.uri()))];
    let articles = fetch_all(&HttpFetcher::new().unwrap(), &sources).await;

    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].title, "Storm warning issued");
    assert_eq!(
        articles[0].published_at,
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    );
}

#[tokio::test]
async fn one_shot_reports_http_errors() {
    let server = MockServer::start().await;
    serve(&server, "/feed", 503, String::new()).await;

    let url = format!("{}/feed", server.uri());
    let mut out = Vec::new();
    let err = run_once(&HttpFetcher::new().unwrap(), &url, &mut out)
        .await
        .unwrap_err();
    assert!(format!("{:#}", err).contains("503"));
}
