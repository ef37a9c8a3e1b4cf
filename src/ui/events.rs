//! The session reducer.
//!
//! `update` is the only place session state changes. It never blocks and
//! never fails: slow work goes out as `Command`s and comes back later as
//! another `AppEvent`, in completion order.

use chrono::{DateTime, Utc};

use crate::app::{App, AppEvent, Banner, Command, FetchOrigin, SaveTarget, Screen, Update};
use crate::feed::Article;
use crate::notify::{new_articles_message, NOTIFICATION_TITLE};
use crate::novelty::reconcile;

use super::input::handle_key;

/// Fold one event into the session, returning follow-up work.
pub fn update(app: &mut App, event: AppEvent) -> Update {
    app.needs_redraw = true;
    match event {
        AppEvent::Resized { width, height } => {
            app.width = width;
            app.height = height;
            app.follow_selection();
            Update::none()
        }
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::FetchCompleted {
            articles,
            error,
            origin,
            at,
        } => handle_fetch_completed(app, articles, error, origin, at),
        AppEvent::TickFired { at } => handle_tick(app, at),
        AppEvent::SaveCompleted { target, result } => {
            handle_save_completed(app, target, result);
            Update::none()
        }
        AppEvent::UrlOpened { url, error } => {
            app.screen = Screen::FeedList;
            match error {
                Some(e) => {
                    tracing::warn!(url = %url, error = %e, "Failed to open link");
                    app.last_error = Some(e);
                }
                None => app.last_error = None,
            }
            Update::none()
        }
    }
}

fn handle_fetch_completed(
    app: &mut App,
    articles: Vec<Article>,
    error: Option<String>,
    origin: FetchOrigin,
    at: DateTime<Utc>,
) -> Update {
    app.loading = false;
    let mut commands = Vec::new();

    if error.is_none() && !articles.is_empty() {
        let outcome = reconcile(&app.seen, &articles);
        if outcome.changed {
            app.seen = outcome.seen.clone();
            commands.push(Command::SaveSeen(outcome.seen));
        }

        let count = outcome.new_links.len();
        if count > 0 && app.config.enable_notifications {
            let message = new_articles_message(count);
            tracing::info!(count, "New articles available");
            commands.push(Command::Notify {
                title: NOTIFICATION_TITLE.to_string(),
                message: message.clone(),
            });
            app.banner = Some(Banner { message, count });
        }
    }

    tracing::debug!(
        articles = articles.len(),
        origin = ?origin,
        error = ?error,
        "Fetch completed"
    );

    app.replace_articles(articles);
    app.last_error = error;
    app.last_refresh = Some(at);

    // Only the automatic chain re-arms the ticker, so at most one is pending.
    if origin == FetchOrigin::Auto {
        commands.push(Command::Tick(app.config.refresh_interval()));
    }

    Update::with(commands)
}

fn handle_tick(app: &mut App, at: DateTime<Utc>) -> Update {
    let interval = app.config.refresh_interval();
    let due = match app.last_refresh {
        None => true,
        Some(last) => (at - last)
            .to_std()
            .map(|elapsed| elapsed >= interval)
            .unwrap_or(false),
    };

    if due {
        tracing::debug!("Refresh interval elapsed, fetching");
        Update::one(app.fetch_command(FetchOrigin::Auto))
    } else {
        Update::one(Command::Tick(interval))
    }
}

fn handle_save_completed(app: &mut App, target: SaveTarget, result: Result<(), String>) {
    match result {
        Ok(()) => {
            tracing::debug!(target = ?target, "Save completed");
            app.last_error = None;
        }
        Err(e) => {
            tracing::warn!(target = ?target, error = %e, "Save failed");
            app.last_error = Some(e);
        }
    }
}
