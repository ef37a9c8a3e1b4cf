use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A configured feed endpoint.
///
/// Identity is the `url`; the `name` is display-only and may be edited
/// without affecting which articles belong to the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSource {
    pub name: String,
    pub url: String,
}

impl FeedSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// A parsed channel as returned by the transport, before aggregation.
///
/// Item dates are kept as the raw strings from the document so the
/// aggregator owns the (lossy) date interpretation in one place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelData {
    pub title: String,
    pub link: String,
    pub description: String,
    pub items: Vec<ChannelItem>,
}

/// One entry of a [`ChannelData`], in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelItem {
    pub title: String,
    pub link: String,
    pub description: String,
    pub published: String,
}

/// An article held in session state. Identity is `link`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub link: String,
    pub description: String,
    pub published_at: DateTime<Utc>,
    pub source_name: String,
}
