//! Whole-document JSON persistence for the source list, seen set and config.

mod json;
mod store;

use std::path::PathBuf;
use thiserror::Error;

pub use json::{load_json, save_json};
pub use store::{default_sources, FeedList, JsonStore, Persister};

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
