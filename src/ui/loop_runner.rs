//! Main event loop for the TUI.
//!
//! Multiplexes terminal input, background completions and shutdown signals
//! into one ordered stream of `AppEvent`s, folds each through `update`, and
//! hands the resulting commands to the dispatcher.

use crate::app::{Action, App, AppEvent};
use anyhow::Result;
use crossterm::{
    event::{Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io::{self, Stdout};
use tokio::sync::mpsc;

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

use super::dispatch::Dispatcher;
use super::events::update;
use super::render::render;

/// Runs the TUI until the user quits or a termination signal arrives.
///
/// Installs a panic hook that restores terminal state before unwinding, so a
/// panic never leaves the terminal in raw mode.
///
/// # Arguments
///
/// * `app` - Session state, already loaded
/// * `dispatcher` - Executor for commands; must post to `event_rx`'s sender
/// * `event_rx` - Receiver for background task completion events
pub async fn run(
    app: &mut App,
    dispatcher: Dispatcher,
    mut event_rx: mpsc::Receiver<AppEvent>,
) -> Result<()> {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let mut terminal = setup_terminal()?;
    let mut event_stream = crossterm::event::EventStream::new();

    let size = terminal.size()?;
    app.width = size.width;
    app.height = size.height;

    // Signal handlers for graceful shutdown (Unix only)
    #[cfg(unix)]
    let mut sigterm = signal(SignalKind::terminate())?;
    #[cfg(unix)]
    let mut sigint = signal(SignalKind::interrupt())?;

    for command in app.init() {
        dispatcher.dispatch(command);
    }

    loop {
        if pump(&mut terminal, app, &dispatcher, &mut event_rx)? == Action::Quit {
            break;
        }

        #[cfg(unix)]
        let sigterm_fut = sigterm.recv();
        #[cfg(not(unix))]
        let sigterm_fut = std::future::pending::<Option<()>>();

        #[cfg(unix)]
        let sigint_fut = sigint.recv();
        #[cfg(not(unix))]
        let sigint_fut = std::future::pending::<Option<()>>();

        let event = tokio::select! {
            biased;

            _ = sigterm_fut => {
                tracing::info!("Received SIGTERM, shutting down gracefully");
                break;
            }

            _ = sigint_fut => {
                tracing::info!("Received SIGINT, shutting down gracefully");
                break;
            }

            maybe_event = event_stream.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                Some(Ok(Event::Resize(width, height))) => AppEvent::Resized { width, height },
                Some(Ok(_)) => continue,
                Some(Err(e)) => {
                    tracing::warn!(error = %e, "Terminal input error");
                    continue;
                }
                None => {
                    tracing::info!("Terminal input closed, shutting down");
                    break;
                }
            },

            Some(event) = event_rx.recv() => event,
        };

        if step(app, &dispatcher, event) == Action::Quit {
            break;
        }
    }

    restore_terminal(terminal)?;
    Ok(())
}

/// Apply every completion already queued, then draw if anything changed.
///
/// Draining first means a completion that landed during the previous draw
/// is on screen before the loop blocks waiting for input.
fn pump<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    dispatcher: &Dispatcher,
    event_rx: &mut mpsc::Receiver<AppEvent>,
) -> Result<Action> {
    while let Ok(event) = event_rx.try_recv() {
        if step(app, dispatcher, event) == Action::Quit {
            return Ok(Action::Quit);
        }
    }
    if app.needs_redraw {
        terminal.draw(|f| render(f, app))?;
        app.needs_redraw = false;
    }
    Ok(Action::Continue)
}

/// Reduce one event and start whatever work it asked for.
fn step(app: &mut App, dispatcher: &Dispatcher, event: AppEvent) -> Action {
    let outcome = update(app, event);
    for command in outcome.commands {
        dispatcher.dispatch(command);
    }
    outcome.action
}

/// Set up the terminal for TUI rendering.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state.
fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::*;
    use crate::app::SaveTarget;
    use crate::browser::SystemBrowser;
    use crate::feed::HttpFetcher;
    use crate::notify::NoopNotifier;
    use crate::storage::JsonStore;
    use ratatui::backend::TestBackend;
    use std::sync::Arc;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[tokio::test]
    async fn test_queued_completion_is_drawn_before_waiting() {
        let dir = tempfile::tempdir().unwrap();
        let (tx, mut rx) = mpsc::channel(8);
        let dispatcher = Dispatcher::new(
            Arc::new(HttpFetcher::new().unwrap()),
            Arc::new(JsonStore::new(
                dir.path().join("config.json"),
                dir.path().join("feeds.json"),
                dir.path().join("seen.json"),
            )),
            Arc::new(NoopNotifier),
            Arc::new(SystemBrowser),
            tx.clone(),
        );
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut app = test_app();

        pump(&mut terminal, &mut app, &dispatcher, &mut rx).unwrap();
        assert!(!app.needs_redraw);

        tx.send(AppEvent::SaveCompleted {
            target: SaveTarget::Config,
            result: Err("disk full".into()),
        })
        .await
        .unwrap();

        let action = pump(&mut terminal, &mut app, &dispatcher, &mut rx).unwrap();
        assert_eq!(action, Action::Continue);
        assert!(!app.needs_redraw);
        assert!(screen_text(&terminal).contains("Error: disk full"));
    }
}
