use chrono::{DateTime, NaiveDateTime, Utc};
use futures::stream::{self, StreamExt};

use super::fetcher::FeedFetcher;
use super::types::{Article, ChannelData, FeedSource};

/// Upper bound on simultaneous source downloads.
const MAX_CONCURRENT_FETCHES: usize = 10;

/// Zone-less layouts tried after the RFC parsers; interpreted as UTC.
const NAIVE_LAYOUTS: &[&str] = &[
    "%a, %d %b %Y %H:%M:%S",
    "%d %b %Y %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

/// Fetches every source concurrently and merges the results newest-first.
///
/// A failing source contributes zero articles; the batch itself never
/// fails. Dates that cannot be parsed are stamped with the time the batch
/// started, so they sort to the top.
pub async fn fetch_all(fetcher: &dyn FeedFetcher, sources: &[FeedSource]) -> Vec<Article> {
    if sources.is_empty() {
        return Vec::new();
    }

    let now = Utc::now();

    // `buffered` (not `buffer_unordered`) keeps results in source order,
    // which the stable sort below relies on for tie-breaking.
    let batches: Vec<(FeedSource, ChannelData)> = stream::iter(sources.iter().cloned())
        .map(move |source| async move {
            match fetcher.fetch(&source.url).await {
                Ok(channel) => Some((source, channel)),
                Err(e) => {
                    tracing::warn!(
                        source = %source.name,
                        url = %source.url,
                        error = %e,
                        "Skipping source that failed to fetch"
                    );
                    None
                }
            }
        })
        .buffered(MAX_CONCURRENT_FETCHES)
        .filter_map(|batch| async move { batch })
        .collect()
        .await;

    tracing::debug!(
        sources = sources.len(),
        succeeded = batches.len(),
        "Fetch batch complete"
    );

    merge(batches, now)
}

/// Flatten per-source channels into one list sorted by date, newest first.
///
/// Input order is the arrival order: articles with equal timestamps keep
/// their relative position (`sort_by` is stable).
pub fn merge(
    batches: impl IntoIterator<Item = (FeedSource, ChannelData)>,
    now: DateTime<Utc>,
) -> Vec<Article> {
    let mut articles: Vec<Article> = batches
        .into_iter()
        .flat_map(|(source, channel)| {
            let source_name = source.name;
            channel.items.into_iter().map(move |item| Article {
                published_at: parse_published(&item.published).unwrap_or(now),
                title: item.title,
                link: item.link,
                description: item.description,
                source_name: source_name.clone(),
            })
        })
        .collect();

    articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    articles
}

/// Parse a feed date in any of the formats seen in the wild.
///
/// Accepts RFC 1123/2822 (numeric or named zone, one- or two-digit day),
/// RFC 3339 (`Z` or offset), and a handful of zone-less layouts read as UTC.
/// Returns `None` when nothing matches; callers pick the fallback.
pub fn parse_published(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(raw, layout).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{ChannelItem, FetchError};
    use chrono::TimeZone;
    use futures::future::BoxFuture;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::sync::Arc;

    struct StaticFetcher {
        channels: HashMap<String, ChannelData>,
    }

    impl FeedFetcher for StaticFetcher {
        fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<ChannelData, FetchError>> {
            Box::pin(async move {
                self.channels
                    .get(url)
                    .cloned()
                    .ok_or(FetchError::HttpStatus(503))
            })
        }
    }

    fn item(link: &str, published: &str) -> ChannelItem {
        ChannelItem {
            title: format!("Title {}", link),
            link: link.to_string(),
            description: String::new(),
            published: published.to_string(),
        }
    }

    fn channel(items: Vec<ChannelItem>) -> ChannelData {
        ChannelData {
            items,
            ..ChannelData::default()
        }
    }

    #[test]
    fn test_parse_rfc1123_named_zone() {
        let dt = parse_published("Mon, 01 Jan 2024 12:00:00 GMT").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rfc1123_numeric_zone() {
        let dt = parse_published("Mon, 01 Jan 2024 12:00:00 -0700").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 1, 19, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_single_digit_day() {
        let dt = parse_published("Tue, 2 Jan 2024 08:30:00 +0000").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 2, 8, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_rfc1123_without_zone_is_utc() {
        let dt = parse_published("Mon, 01 Jan 2024 12:00:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_variants() {
        let z = parse_published("2024-01-01T12:00:00Z").unwrap();
        assert_eq!(z, Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());

        let offset = parse_published("2024-01-01T12:00:00+02:00").unwrap();
        assert_eq!(offset, Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_invalid_returns_none() {
        assert!(parse_published("invalid date").is_none());
        assert!(parse_published("").is_none());
        assert!(parse_published("   ").is_none());
    }

    #[test]
    fn test_merge_sorts_newest_first() {
        let source = FeedSource::new("A", "urlA");
        let now = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let articles = merge(
            vec![(
                source,
                channel(vec![
                    item("old", "Mon, 01 Jan 2024 12:00:00 GMT"),
                    item("new", "Tue, 02 Jan 2024 12:00:00 GMT"),
                ]),
            )],
            now,
        );

        let links: Vec<&str> = articles.iter().map(|a| a.link.as_str()).collect();
        assert_eq!(links, vec!["new", "old"]);
        assert!(articles.iter().all(|a| a.source_name == "A"));
    }

    #[test]
    fn test_merge_malformed_date_sorts_to_top() {
        let source = FeedSource::new("A", "urlA");
        let now = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let articles = merge(
            vec![(
                source,
                channel(vec![
                    item("dated", "Mon, 01 Jan 2024 12:00:00 GMT"),
                    item("garbled", "yesterday-ish"),
                ]),
            )],
            now,
        );

        assert_eq!(articles[0].link, "garbled");
        assert_eq!(articles[0].published_at, now);
    }

    #[test]
    fn test_merge_ties_keep_arrival_order() {
        let a = FeedSource::new("A", "urlA");
        let b = FeedSource::new("B", "urlB");
        let same = "Mon, 01 Jan 2024 12:00:00 GMT";
        let articles = merge(
            vec![
                (a, channel(vec![item("a1", same), item("a2", same)])),
                (b, channel(vec![item("b1", same)])),
            ],
            Utc::now(),
        );

        let links: Vec<&str> = articles.iter().map(|a| a.link.as_str()).collect();
        assert_eq!(links, vec!["a1", "a2", "b1"]);
    }

    #[tokio::test]
    async fn test_fetch_all_skips_failing_source() {
        let fetcher = StaticFetcher {
            channels: HashMap::from([(
                "urlA".to_string(),
                channel(vec![item("linkA", "Mon, 01 Jan 2024 12:00:00 GMT")]),
            )]),
        };
        let sources = vec![FeedSource::new("A", "urlA"), FeedSource::new("B", "urlB")];

        let articles = fetch_all(&fetcher, &sources).await;

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].link, "linkA");
        assert_eq!(articles[0].source_name, "A");
    }

    #[tokio::test]
    async fn test_fetch_all_every_source_failing_is_empty() {
        let fetcher = StaticFetcher {
            channels: HashMap::new(),
        };
        let sources = vec![FeedSource::new("A", "urlA"), FeedSource::new("B", "urlB")];
        assert!(fetch_all(&fetcher, &sources).await.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_all_no_sources() {
        let fetcher = StaticFetcher {
            channels: HashMap::new(),
        };
        assert!(fetch_all(&fetcher, &[]).await.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_all_runs_on_spawned_task() {
        let fetcher: Arc<dyn FeedFetcher> = Arc::new(StaticFetcher {
            channels: HashMap::from([(
                "urlA".to_string(),
                channel(vec![item("linkA", "Mon, 01 Jan 2024 12:00:00 GMT")]),
            )]),
        });
        let sources = vec![FeedSource::new("A", "urlA")];

        let handle = tokio::spawn(async move { fetch_all(fetcher.as_ref(), &sources).await });

        let articles = handle.await.unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].source_name, "A");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn merged_output_is_union_of_successes_sorted(
                plan in prop::collection::vec(
                    (any::<bool>(), prop::collection::vec(0i64..5, 0..6)),
                    0..6,
                )
            ) {
                let sources: Vec<FeedSource> = (0..plan.len())
                    .map(|i| FeedSource::new(format!("S{}", i), format!("url{}", i)))
                    .collect();
                let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

                let mut expected_links = Vec::new();
                let mut batches = Vec::new();
                for (i, (ok, days)) in plan.iter().enumerate() {
                    if !*ok {
                        continue;
                    }
                    let items: Vec<ChannelItem> = days
                        .iter()
                        .enumerate()
                        .map(|(j, d)| {
                            let ts = base + chrono::Duration::days(*d);
                            item(&format!("s{}-{}", i, j), &ts.to_rfc3339())
                        })
                        .collect();
                    expected_links.extend(items.iter().map(|it| it.link.clone()));
                    batches.push((sources[i].clone(), channel(items)));
                }

                let merged = merge(batches, Utc::now());

                let mut got: Vec<String> = merged.iter().map(|a| a.link.clone()).collect();
                got.sort();
                expected_links.sort();
                prop_assert_eq!(got, expected_links);
                prop_assert!(merged
                    .windows(2)
                    .all(|w| w[0].published_at >= w[1].published_at));
            }
        }
    }
}
