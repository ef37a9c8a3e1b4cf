//! Command-line surface: argument parsing and the one-shot print mode.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;

use crate::feed::{ChannelData, FeedFetcher};
use crate::util::strip_control_chars;

/// Items printed by the one-shot mode.
pub const ONE_SHOT_ITEMS: usize = 10;

#[derive(Parser, Debug, Default, PartialEq, Eq)]
#[command(
    name = "feedwatch",
    version,
    about = "Terminal feed reader with new-article notifications",
    after_help = "Examples:\n  feedwatch https://feeds.feedburner.com/oreilly/radar\n  feedwatch --tui https://feeds.bbci.co.uk/news/rss.xml\n  feedwatch --menu"
)]
pub struct Args {
    /// Feed URL to fetch once and print
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    /// Start the interactive reader, optionally pinned to a single feed URL
    #[arg(long, visible_alias = "menu", value_name = "URL", num_args = 0..=1)]
    pub tui: Option<Option<String>>,
}

/// What the binary should do, resolved from [`Args`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Nothing requested: print usage and exit 1.
    Usage,
    OneShot(String),
    Interactive { pinned: Option<String> },
}

impl Args {
    pub fn mode(self) -> Mode {
        match (self.tui, self.url) {
            (Some(flag_url), positional) => Mode::Interactive {
                pinned: flag_url.or(positional).filter(|u| !u.trim().is_empty()),
            },
            (None, Some(url)) => Mode::OneShot(url),
            (None, None) => Mode::Usage,
        }
    }
}

/// Fetch `url` once and print the channel header and its first items.
pub async fn run_once(fetcher: &dyn FeedFetcher, url: &str, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Fetching RSS feed from: {}\n", url)?;
    let channel = fetcher
        .fetch(url)
        .await
        .with_context(|| format!("Failed to fetch {}", url))?;
    write_channel(&channel, out)?;
    Ok(())
}

/// Plain-text listing of a channel: header, then up to [`ONE_SHOT_ITEMS`] items.
pub fn write_channel(channel: &ChannelData, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "Feed: {}", strip_control_chars(&channel.title))?;
    writeln!(out, "Description: {}", strip_control_chars(&channel.description))?;
    writeln!(out, "Link: {}\n", strip_control_chars(&channel.link))?;

    for item in channel.items.iter().take(ONE_SHOT_ITEMS) {
        writeln!(out, "Title: {}", strip_control_chars(&item.title))?;
        writeln!(out, "Link: {}", strip_control_chars(&item.link))?;
        writeln!(out, "Date: {}", strip_control_chars(&item.published))?;
        writeln!(out, "Description: {}\n", strip_control_chars(&item.description))?;
    }
    Ok(())
}
