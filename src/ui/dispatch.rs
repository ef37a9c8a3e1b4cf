//! Executes reducer commands off the event loop.
//!
//! Every command becomes a detached task. Tasks that have a result post it
//! back on the event channel, so completions are observed in the order they
//! finish, not the order they were issued.

use chrono::Utc;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::app::{AppEvent, Command, FetchOrigin, SaveTarget};
use crate::browser::BrowserOpener;
use crate::feed::{fetch_all, FeedFetcher, FeedSource};
use crate::notify::Notifier;
use crate::storage::{PersistError, Persister};

use super::helpers::catch_task_panic;

/// Capabilities and the event sender shared by every spawned task.
#[derive(Clone)]
pub struct Dispatcher {
    fetcher: Arc<dyn FeedFetcher>,
    persister: Arc<dyn Persister>,
    notifier: Arc<dyn Notifier>,
    browser: Arc<dyn BrowserOpener>,
    tx: mpsc::Sender<AppEvent>,
}

impl Dispatcher {
    pub fn new(
        fetcher: Arc<dyn FeedFetcher>,
        persister: Arc<dyn Persister>,
        notifier: Arc<dyn Notifier>,
        browser: Arc<dyn BrowserOpener>,
        tx: mpsc::Sender<AppEvent>,
    ) -> Self {
        Self {
            fetcher,
            persister,
            notifier,
            browser,
            tx,
        }
    }

    /// Start `command` in the background. Never blocks.
    pub fn dispatch(&self, command: Command) {
        match command {
            Command::Fetch { sources, origin } => self.spawn_fetch(sources, origin),
            Command::Tick(delay) => {
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    send(&tx, AppEvent::TickFired { at: Utc::now() }).await;
                });
            }
            Command::OpenUrl(url) => self.spawn_open(url),
            Command::SaveConfig(config) => {
                self.spawn_save(SaveTarget::Config, move |p| p.save_config(&config))
            }
            Command::SaveFeeds(feeds) => {
                self.spawn_save(SaveTarget::Feeds, move |p| p.save_feeds(&feeds))
            }
            Command::SaveSeen(seen) => {
                self.spawn_save(SaveTarget::Seen, move |p| p.save_seen(&seen))
            }
            Command::Notify { title, message } => {
                let notifier = Arc::clone(&self.notifier);
                // Fire and forget: a missing notification daemon is not a session error.
                tokio::task::spawn_blocking(move || {
                    if let Err(e) = notifier.send(&title, &message) {
                        tracing::warn!(error = %e, "Desktop notification not shown");
                    }
                });
            }
        }
    }

    fn spawn_fetch(&self, sources: Vec<FeedSource>, origin: FetchOrigin) {
        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.tx.clone();
        tracing::debug!(sources = sources.len(), origin = ?origin, "Starting fetch");

        tokio::spawn(async move {
            let outcome = catch_task_panic(fetch_all(fetcher.as_ref(), &sources)).await;
            let (articles, error) = match outcome {
                Ok(articles) => (articles, None),
                Err(panic_msg) => {
                    tracing::error!(error = %panic_msg, "Fetch task panicked");
                    (Vec::new(), Some(format!("Fetch failed: {}", panic_msg)))
                }
            };
            send(
                &tx,
                AppEvent::FetchCompleted {
                    articles,
                    error,
                    origin,
                    at: Utc::now(),
                },
            )
            .await;
        });
    }

    fn spawn_save<F>(&self, target: SaveTarget, job: F)
    where
        F: FnOnce(&dyn Persister) -> Result<(), PersistError> + Send + 'static,
    {
        let persister = Arc::clone(&self.persister);
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let result = match tokio::task::spawn_blocking(move || job(persister.as_ref())).await
            {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(e.to_string()),
                Err(join) => Err(format!("Save task failed: {}", join)),
            };
            send(&tx, AppEvent::SaveCompleted { target, result }).await;
        });
    }

    fn spawn_open(&self, url: String) {
        let browser = Arc::clone(&self.browser);
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let target = url.clone();
            let error = match tokio::task::spawn_blocking(move || browser.open(&target)).await {
                Ok(Ok(())) => None,
                Ok(Err(e)) => Some(e.to_string()),
                Err(join) => Some(format!("Browser task failed: {}", join)),
            };
            send(&tx, AppEvent::UrlOpened { url, error }).await;
        });
    }
}

async fn send(tx: &mpsc::Sender<AppEvent>, event: AppEvent) {
    if let Err(e) = tx.send(event).await {
        tracing::debug!(error = %e, "Dropping event, event loop has exited");
    }
}
