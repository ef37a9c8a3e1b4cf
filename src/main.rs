use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

use feedwatch::app::{App, AppEvent};
use feedwatch::browser::SystemBrowser;
use feedwatch::cli::{run_once, Args, Mode};
use feedwatch::config::Config;
use feedwatch::feed::HttpFetcher;
use feedwatch::notify::DesktopNotifier;
use feedwatch::storage::{JsonStore, Persister};
use feedwatch::ui::{self, Dispatcher};

#[tokio::main]
async fn main() -> Result<()> {
    // The TUI owns stdout, so logs go to stderr and stay silent unless RUST_LOG is set
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match Args::parse().mode() {
        Mode::Usage => {
            Args::command().print_help()?;
            std::process::exit(1);
        }
        Mode::OneShot(url) => {
            let fetcher = HttpFetcher::new().context("Failed to create HTTP client")?;
            let mut stdout = std::io::stdout().lock();
            if let Err(e) = run_once(&fetcher, &url, &mut stdout).await {
                eprintln!("Error: {:#}", e);
                std::process::exit(1);
            }
            Ok(())
        }
        Mode::Interactive { pinned } => run_interactive(pinned).await,
    }
}

async fn run_interactive(pinned: Option<String>) -> Result<()> {
    let config_dir = Config::config_dir().context("Failed to locate config directory")?;
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir).with_context(|| {
            format!("Failed to create config directory {}", config_dir.display())
        })?;
    }
    let config_path: PathBuf = config_dir.join("config.json");

    // A broken config file degrades to defaults; the error is shown in the UI
    let mut startup_error = None;
    let config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(path = %config_path.display(), error = %e, "Using default config");
            startup_error = Some(e.to_string());
            Config {
                config_file: config_path.clone(),
                ..Config::default()
            }
        }
    };
    tracing::info!(path = %config.config_file.display(), "Config loaded");

    let store = Arc::new(JsonStore::from_config(&config));

    let seen = match store.load_seen() {
        Ok(seen) => seen.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(error = %e, "Starting with an empty seen set");
            startup_error.get_or_insert_with(|| e.to_string());
            Default::default()
        }
    };

    let mut app = match pinned {
        Some(url) => App::pinned(config, url, seen),
        None => {
            let feeds = match store.load_or_seed_feeds() {
                Ok(feeds) => feeds,
                Err(e) => {
                    tracing::warn!(error = %e, "Starting with no feeds");
                    startup_error.get_or_insert_with(|| e.to_string());
                    Vec::new()
                }
            };
            App::new(config, feeds, seen)
        }
    };
    app.last_error = startup_error;

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);
    let dispatcher = Dispatcher::new(
        Arc::new(HttpFetcher::new().context("Failed to create HTTP client")?),
        store,
        Arc::new(DesktopNotifier),
        Arc::new(SystemBrowser),
        event_tx,
    );

    ui::run(&mut app, dispatcher, event_rx).await?;
    Ok(())
}
