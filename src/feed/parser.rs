use anyhow::{Context, Result};
use feed_rs::parser;
use serde::Deserialize;

use super::types::{ChannelData, ChannelItem};

// RSS 2.0 document shape for quick-xml's serde deserializer. Every field
// defaults so sparse feeds still deserialize; unknown elements are skipped.
//
// quick-xml matches on local names, so `<atom:link>` and `<media:title>`
// land on `link` and `title`. Those fields collect every occurrence and the
// first one with text wins.
#[derive(Debug, Deserialize)]
struct RssDocument {
    channel: RssChannel,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RssChannel {
    title: Vec<RssText>,
    link: Vec<RssText>,
    description: Vec<RssText>,
    #[serde(rename = "item")]
    items: Vec<RssItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RssItem {
    title: Vec<RssText>,
    link: Vec<RssText>,
    description: Vec<RssText>,
    #[serde(rename = "pubDate")]
    pub_date: String,
}

/// Text content of an element; attributes such as `href` are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RssText {
    #[serde(rename = "$text")]
    text: String,
}

fn first_text(values: Vec<RssText>) -> String {
    values
        .into_iter()
        .map(|v| v.text.trim().to_string())
        .find(|t| !t.is_empty())
        .unwrap_or_default()
}

/// Parse a feed body into [`ChannelData`].
///
/// RSS 2.0 is read directly so the raw `pubDate` text reaches the
/// aggregator untouched. Atom, RSS 1.0 and anything the RSS path cannot
/// read (or reads as an empty channel) go through `feed-rs`.
pub fn parse_channel(bytes: &[u8]) -> Result<ChannelData> {
    let text = String::from_utf8_lossy(bytes);

    match quick_xml::de::from_str::<RssDocument>(&text) {
        Ok(doc) if !doc.channel.items.is_empty() => return Ok(channel_from_rss(doc.channel)),
        Ok(doc) => {
            // RSS 1.0 keeps items outside <channel>; give feed-rs a chance
            // before settling for an empty channel.
            if let Ok(channel) = parse_with_feed_rs(bytes) {
                if !channel.items.is_empty() {
                    return Ok(channel);
                }
            }
            return Ok(channel_from_rss(doc.channel));
        }
        Err(e) => {
            tracing::debug!(error = %e, "RSS 2.0 parse failed, trying feed-rs");
        }
    }

    parse_with_feed_rs(bytes)
}

fn channel_from_rss(channel: RssChannel) -> ChannelData {
    ChannelData {
        title: first_text(channel.title),
        link: first_text(channel.link),
        description: first_text(channel.description),
        items: channel
            .items
            .into_iter()
            .map(|item| ChannelItem {
                title: first_text(item.title),
                link: first_text(item.link),
                description: first_text(item.description),
                published: item.pub_date.trim().to_string(),
            })
            .collect(),
    }
}

fn parse_with_feed_rs(bytes: &[u8]) -> Result<ChannelData> {
    let feed = parser::parse(bytes).context("Unrecognized feed format")?;

    let items = feed
        .entries
        .into_iter()
        .map(|entry| {
            let link = entry
                .links
                .first()
                .map(|l| l.href.clone())
                .unwrap_or_default();
            let description = entry
                .summary
                .map(|s| s.content)
                .or_else(|| entry.content.and_then(|c| c.body))
                .unwrap_or_default();
            let published = entry
                .published
                .or(entry.updated)
                .map(|dt| dt.to_rfc3339())
                .unwrap_or_default();

            ChannelItem {
                title: entry.title.map(|t| t.content).unwrap_or_default(),
                link,
                description,
                published,
            }
        })
        .collect();

    Ok(ChannelData {
        title: feed.title.map(|t| t.content).unwrap_or_default(),
        link: feed
            .links
            .first()
            .map(|l| l.href.clone())
            .unwrap_or_default(),
        description: feed.description.map(|d| d.content).unwrap_or_default(),
        items,
    })
}
