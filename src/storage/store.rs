use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::json::{load_json, save_json};
use super::PersistError;
use crate::config::Config;
use crate::feed::FeedSource;
use crate::novelty::SeenSet;

/// On-disk shape of the source list (`{"feeds": [...]}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedList {
    #[serde(default)]
    pub feeds: Vec<FeedSource>,
}

/// Sources seeded on first run, when no feeds file exists yet.
pub fn default_sources() -> Vec<FeedSource> {
    vec![
        FeedSource::new("BBC News", "https://feeds.bbci.co.uk/news/rss.xml"),
        FeedSource::new("TechCrunch", "https://techcrunch.com/feed/"),
    ]
}

/// Durable storage for the three session documents.
///
/// Every method is synchronous whole-file I/O; callers on the async side run
/// them through `spawn_blocking`. A missing document loads as `None`.
pub trait Persister: Send + Sync {
    fn load_feeds(&self) -> Result<Option<Vec<FeedSource>>, PersistError>;
    fn save_feeds(&self, feeds: &[FeedSource]) -> Result<(), PersistError>;
    fn load_seen(&self) -> Result<Option<SeenSet>, PersistError>;
    fn save_seen(&self, seen: &SeenSet) -> Result<(), PersistError>;
    fn save_config(&self, config: &Config) -> Result<(), PersistError>;
}

/// JSON files, one per document.
#[derive(Debug, Clone)]
pub struct JsonStore {
    config_path: PathBuf,
    feeds_path: PathBuf,
    seen_path: PathBuf,
}

impl JsonStore {
    pub fn new(
        config_path: impl Into<PathBuf>,
        feeds_path: impl Into<PathBuf>,
        seen_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            config_path: config_path.into(),
            feeds_path: feeds_path.into(),
            seen_path: seen_path.into(),
        }
    }

    /// Resolve the document paths named by `config`.
    ///
    /// Relative `feeds_file` / `seen_articles_file` values are taken relative
    /// to the directory holding the config file.
    pub fn from_config(config: &Config) -> Self {
        let base = config
            .config_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let resolve = |p: &Path| {
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                base.join(p)
            }
        };
        Self::new(
            config.config_file.clone(),
            resolve(&config.feeds_file),
            resolve(&config.seen_articles_file),
        )
    }

    pub fn feeds_path(&self) -> &Path {
        &self.feeds_path
    }

    pub fn seen_path(&self) -> &Path {
        &self.seen_path
    }

    /// Load the source list, seeding and saving the defaults when none exists.
    pub fn load_or_seed_feeds(&self) -> Result<Vec<FeedSource>, PersistError> {
        if let Some(feeds) = self.load_feeds()? {
            return Ok(feeds);
        }
        let feeds = default_sources();
        self.save_feeds(&feeds)?;
        tracing::info!(
            path = %self.feeds_path.display(),
            count = feeds.len(),
            "Seeded default feed list"
        );
        Ok(feeds)
    }
}

impl Persister for JsonStore {
    fn load_feeds(&self) -> Result<Option<Vec<FeedSource>>, PersistError> {
        Ok(load_json::<FeedList>(&self.feeds_path)?.map(|list| list.feeds))
    }

    fn save_feeds(&self, feeds: &[FeedSource]) -> Result<(), PersistError> {
        let list = FeedList {
            feeds: feeds.to_vec(),
        };
        save_json(&self.feeds_path, &list)?;
        tracing::info!(count = feeds.len(), "Saved feed list");
        Ok(())
    }

    fn load_seen(&self) -> Result<Option<SeenSet>, PersistError> {
        load_json(&self.seen_path)
    }

    fn save_seen(&self, seen: &SeenSet) -> Result<(), PersistError> {
        save_json(&self.seen_path, seen)
    }

    fn save_config(&self, config: &Config) -> Result<(), PersistError> {
        save_json(&self.config_path, config)?;
        tracing::info!(path = %self.config_path.display(), "Saved configuration");
        Ok(())
    }
}
