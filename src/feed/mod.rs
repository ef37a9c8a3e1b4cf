//! Feed retrieval and aggregation.
//!
//! - `fetcher` - HTTP transport behind the [`FeedFetcher`] capability
//! - `parser` - RSS 2.0 via quick-xml, everything else via `feed-rs`
//! - `aggregator` - concurrent fan-out, date normalization, newest-first merge
//!
//! ```ignore
//! let fetcher = HttpFetcher::new()?;
//! let articles = fetch_all(&fetcher, &sources).await;
//! ```

mod aggregator;
mod fetcher;
mod parser;
mod types;

pub use aggregator::{fetch_all, merge, parse_published};
pub use fetcher::{FeedFetcher, FetchError, HttpFetcher, FETCH_TIMEOUT};
pub use parser::parse_channel;
pub use types::{Article, ChannelData, ChannelItem, FeedSource};
