//! "New since last check" tracking.
//!
//! The seen set is the only durable record of which articles the user has
//! been shown. It grows monotonically: links are never evicted, so an
//! article that drops out of a feed and comes back is not new again.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::feed::Article;

/// Persisted set of article links (`{"articles": [...]}` on disk).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeenSet {
    #[serde(default)]
    articles: BTreeSet<String>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, link: &str) -> bool {
        self.articles.contains(link)
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Returns true if the link was not already present.
    pub fn insert(&mut self, link: impl Into<String>) -> bool {
        self.articles.insert(link.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.articles.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for SeenSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            articles: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Outcome of folding one fetched batch into the seen set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// Links not previously seen, each once, in batch order.
    pub new_links: Vec<String>,
    /// The updated set (superset of the input).
    pub seen: SeenSet,
    /// Whether `seen` differs from the input and should be persisted.
    pub changed: bool,
}

impl Reconciliation {
    pub fn new_count(&self) -> usize {
        self.new_links.len()
    }
}

/// Compare a freshly fetched batch against the seen set.
///
/// On the very first batch (empty seen set) everything is silently absorbed:
/// nothing is reported as new, so a fresh install does not announce the whole
/// backlog. After that, any link missing from the set is new.
pub fn reconcile(current: &SeenSet, incoming: &[Article]) -> Reconciliation {
    let first_run = current.is_empty();
    let mut seen = current.clone();
    let mut new_links = Vec::new();

    for article in incoming {
        // insert() is false for repeats, so each link is reported once
        if seen.insert(article.link.as_str()) && !first_run {
            new_links.push(article.link.clone());
        }
    }

    let changed = seen.len() != current.len();
    if !new_links.is_empty() {
        tracing::debug!(
            new = new_links.len(),
            seen = seen.len(),
            "New articles since last check"
        );
    }

    Reconciliation {
        new_links,
        seen,
        changed,
    }
}
