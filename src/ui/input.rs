//! Keyboard input handling.
//!
//! Global keys are checked first; everything else is routed to the handler
//! for the active screen. Handlers only mutate `App` and return the commands
//! the dispatcher should run.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Command, FetchOrigin, Screen, Update, CONFIGURE_ROWS};
use crate::feed::FeedSource;
use crate::theme::next_theme_name;

/// Route one key press.
pub(super) fn handle_key(app: &mut App, key: KeyEvent) -> Update {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        tracing::info!("Ctrl+C pressed, quitting");
        return Update::quit();
    }

    if app.banner.is_some()
        && matches!(
            key.code,
            KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('n')
        )
    {
        app.banner = None;
        return Update::none();
    }

    match app.screen {
        Screen::Menu => handle_menu_input(app, key.code),
        Screen::FeedList => handle_feed_list_input(app, key.code),
        Screen::ArticleDetail => handle_article_detail_input(app, key.code),
        Screen::ManageFeeds => handle_manage_feeds_input(app, key.code),
        Screen::Configure { row } => handle_configure_input(app, row, key.code),
        Screen::AddFeed { .. } => handle_add_feed_input(app, key),
        Screen::RemoveFeed => handle_remove_feed_input(app, key.code),
    }
}

fn handle_menu_input(app: &mut App, code: KeyCode) -> Update {
    match code {
        KeyCode::Char('q') => return Update::quit(),
        KeyCode::Char('k') | KeyCode::Up => app.menu_up(),
        KeyCode::Char('j') | KeyCode::Down => app.menu_down(),
        KeyCode::Enter => match app.menu_selected {
            0 => {
                app.screen = Screen::FeedList;
                app.selected_article = 0;
                app.scroll_offset = 0;
            }
            1 => {
                app.screen = Screen::ManageFeeds;
                app.selected_feed = 0;
            }
            _ => app.screen = Screen::Configure { row: 0 },
        },
        _ => {}
    }
    Update::none()
}

fn handle_feed_list_input(app: &mut App, code: KeyCode) -> Update {
    match code {
        KeyCode::Esc | KeyCode::Char('q') => app.screen = Screen::Menu,
        KeyCode::Char('k') | KeyCode::Up => app.article_up(),
        KeyCode::Char('j') | KeyCode::Down => app.article_down(),
        KeyCode::Enter => {
            if app.selected_article().is_some() {
                app.screen = Screen::ArticleDetail;
            }
        }
        KeyCode::Char('r') => {
            tracing::info!(sources = app.feeds.len(), "Manual refresh");
            return Update::one(app.fetch_command(FetchOrigin::Manual));
        }
        _ => {}
    }
    Update::none()
}

fn handle_article_detail_input(app: &mut App, code: KeyCode) -> Update {
    match code {
        KeyCode::Esc | KeyCode::Char('q') => app.screen = Screen::FeedList,
        KeyCode::Char('o') => {
            if let Some(article) = app.selected_article() {
                return Update::one(Command::OpenUrl(article.link.clone()));
            }
        }
        _ => {}
    }
    Update::none()
}

fn handle_manage_feeds_input(app: &mut App, code: KeyCode) -> Update {
    match code {
        KeyCode::Esc | KeyCode::Char('q') => app.screen = Screen::Menu,
        KeyCode::Char('k') | KeyCode::Up => app.feed_up(),
        KeyCode::Char('j') | KeyCode::Down => app.feed_down(),
        KeyCode::Char('a') => {
            app.screen = Screen::AddFeed {
                input: String::new(),
            }
        }
        KeyCode::Char('d') | KeyCode::Enter => {
            if !app.feeds.is_empty() {
                app.screen = Screen::RemoveFeed;
            }
        }
        _ => {}
    }
    Update::none()
}

fn handle_configure_input(app: &mut App, row: usize, code: KeyCode) -> Update {
    match code {
        KeyCode::Esc | KeyCode::Char('q') => app.screen = Screen::Menu,
        KeyCode::Char('k') | KeyCode::Up => {
            app.screen = Screen::Configure {
                row: row.saturating_sub(1),
            }
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.screen = Screen::Configure {
                row: (row + 1).min(CONFIGURE_ROWS - 1),
            }
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            match row {
                0 => app.config.cycle_refresh_interval(),
                1 => {
                    app.config.color_theme = next_theme_name(&app.config.color_theme).to_string();
                    app.apply_theme();
                }
                _ => app.config.enable_notifications = !app.config.enable_notifications,
            }
            tracing::info!(
                refresh_secs = app.config.refresh_interval_secs,
                theme = %app.config.color_theme,
                notifications = app.config.enable_notifications,
                "Configuration changed"
            );
            return Update::one(Command::SaveConfig(app.config.clone()));
        }
        _ => {}
    }
    Update::none()
}

fn handle_add_feed_input(app: &mut App, key: KeyEvent) -> Update {
    let Screen::AddFeed { input } = &mut app.screen else {
        return Update::none();
    };

    match key.code {
        KeyCode::Esc => app.screen = Screen::ManageFeeds,
        KeyCode::Backspace => {
            input.pop();
        }
        KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            input.push(c);
        }
        KeyCode::Enter => {
            let Some(source) = parse_feed_input(input) else {
                return Update::none();
            };
            tracing::info!(name = %source.name, url = %source.url, "Adding feed");
            app.feeds.push(source);
            app.screen = Screen::ManageFeeds;

            let mut commands = Vec::with_capacity(2);
            if app.persist_feeds {
                commands.push(Command::SaveFeeds(app.feeds.clone()));
            }
            commands.push(app.fetch_command(FetchOrigin::Manual));
            return Update::with(commands);
        }
        _ => {}
    }
    Update::none()
}

fn handle_remove_feed_input(app: &mut App, code: KeyCode) -> Update {
    match code {
        KeyCode::Esc => {
            app.screen = Screen::ManageFeeds;
            app.clamp_selections();
        }
        KeyCode::Char('k') | KeyCode::Up => app.feed_up(),
        KeyCode::Char('j') | KeyCode::Down => app.feed_down(),
        KeyCode::Enter => {
            if app.selected_feed >= app.feeds.len() {
                return Update::none();
            }
            let removed = app.feeds.remove(app.selected_feed);
            tracing::info!(name = %removed.name, url = %removed.url, "Removed feed");
            app.clamp_selections();
            app.screen = Screen::ManageFeeds;

            let mut commands = Vec::with_capacity(2);
            if app.persist_feeds {
                commands.push(Command::SaveFeeds(app.feeds.clone()));
            }
            commands.push(app.fetch_command(FetchOrigin::Manual));
            return Update::with(commands);
        }
        _ => {}
    }
    Update::none()
}

/// Parse `name|url` (or a bare url, used as both).
///
/// Returns `None` for blank input. When one side of the pipe is empty the
/// other side stands in for it.
pub(super) fn parse_feed_input(text: &str) -> Option<FeedSource> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let (name, url) = match text.split_once('|') {
        Some((name, url)) => (name.trim(), url.trim()),
        None => (text, text),
    };

    match (name.is_empty(), url.is_empty()) {
        (true, true) => None,
        (true, false) => Some(FeedSource::new(url, url)),
        (false, true) => Some(FeedSource::new(name, name)),
        (false, false) => Some(FeedSource::new(name, url)),
    }
}
