use chrono::{DateTime, Utc};
use crossterm::event::KeyEvent;
use std::time::Duration;

use crate::config::Config;
use crate::feed::{Article, FeedSource};
use crate::novelty::SeenSet;
use crate::theme::{ColorPalette, ThemeVariant};

/// Labels of the main menu, in display order.
pub const MENU_ITEMS: [&str; 3] = ["Feeds", "Manage Feeds", "Configure"];

/// Rows on the Configure screen: refresh interval, theme, notifications.
pub const CONFIGURE_ROWS: usize = 3;

/// Height assumed before the first resize event arrives.
pub const FALLBACK_HEIGHT: u16 = 24;

/// Rows taken by chrome (title, banner/status, hints) around the article list.
const CHROME_ROWS: u16 = 3;

/// Display name of the single source in a pinned `--tui URL` session.
pub const PINNED_SOURCE_NAME: &str = "Command Line Feed";

// ============================================================================
// Screens
// ============================================================================

/// The active screen. Exactly one is active at a time; screens that need
/// private state carry it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Menu,
    FeedList,
    ArticleDetail,
    ManageFeeds,
    Configure { row: usize },
    AddFeed { input: String },
    RemoveFeed,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Menu => "feedwatch",
            Screen::FeedList => "Feeds",
            Screen::ArticleDetail => "Article",
            Screen::ManageFeeds => "Manage Feeds",
            Screen::Configure { .. } => "Configure",
            Screen::AddFeed { .. } => "Add Feed",
            Screen::RemoveFeed => "Remove Feed",
        }
    }
}

// ============================================================================
// Events and Commands
// ============================================================================

/// Who asked for a fetch. Only automatic fetches continue the tick chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOrigin {
    Auto,
    Manual,
}

/// Which persisted document a save targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveTarget {
    Config,
    Feeds,
    Seen,
}

/// Everything that can change session state, in arrival order.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Terminal size changed.
    Resized { width: u16, height: u16 },
    /// A key was pressed.
    Key(KeyEvent),
    /// A fetch batch finished.
    ///
    /// Fields:
    /// - `articles`: merged batch, newest first (empty when every source failed)
    /// - `error`: set only when the batch itself could not run
    /// - `origin`: the origin the fetch was issued with
    /// - `at`: completion time, stamped as the last refresh
    FetchCompleted {
        articles: Vec<Article>,
        error: Option<String>,
        origin: FetchOrigin,
        at: DateTime<Utc>,
    },
    /// A scheduled tick elapsed.
    TickFired { at: DateTime<Utc> },
    /// A persistence write finished.
    SaveCompleted {
        target: SaveTarget,
        result: Result<(), String>,
    },
    /// The browser opener returned.
    UrlOpened { url: String, error: Option<String> },
}

/// Work requested by the reducer; executed off the reducer by the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Fetch {
        sources: Vec<FeedSource>,
        origin: FetchOrigin,
    },
    /// Post `TickFired` after the given delay.
    Tick(Duration),
    OpenUrl(String),
    SaveConfig(Config),
    SaveFeeds(Vec<FeedSource>),
    SaveSeen(SeenSet),
    Notify { title: String, message: String },
}

/// Whether the event loop keeps running after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

/// Result of reducing one event.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub action: Action,
    pub commands: Vec<Command>,
}

impl Update {
    pub fn none() -> Self {
        Self {
            action: Action::Continue,
            commands: Vec::new(),
        }
    }

    pub fn quit() -> Self {
        Self {
            action: Action::Quit,
            commands: Vec::new(),
        }
    }

    pub fn with(commands: Vec<Command>) -> Self {
        Self {
            action: Action::Continue,
            commands,
        }
    }

    pub fn one(command: Command) -> Self {
        Self::with(vec![command])
    }
}

/// Notification banner shown above the active screen until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub message: String,
    pub count: usize,
}

// ============================================================================
// Application State
// ============================================================================

/// Session state. Mutated only by `ui::update`.
pub struct App {
    pub config: Config,
    pub theme: ThemeVariant,
    pub palette: ColorPalette,

    // Data
    pub feeds: Vec<FeedSource>,
    pub seen: SeenSet,
    /// Newest first.
    pub articles: Vec<Article>,

    // UI state
    pub screen: Screen,
    pub menu_selected: usize,
    pub selected_article: usize,
    pub selected_feed: usize,
    /// First visible row of the article list.
    pub scroll_offset: usize,
    pub width: u16,
    pub height: u16,

    // Status
    pub loading: bool,
    pub last_error: Option<String>,
    pub last_refresh: Option<DateTime<Utc>>,
    pub banner: Option<Banner>,

    /// False in pinned sessions: feed edits stay in memory.
    pub persist_feeds: bool,

    /// Dirty flag to skip unnecessary frame renders.
    pub needs_redraw: bool,
}

impl App {
    pub fn new(config: Config, feeds: Vec<FeedSource>, seen: SeenSet) -> Self {
        let theme = ThemeVariant::from_config_name(&config.color_theme);
        Self {
            palette: theme.palette(),
            theme,
            config,
            feeds,
            seen,
            articles: Vec::new(),
            screen: Screen::Menu,
            menu_selected: 0,
            selected_article: 0,
            selected_feed: 0,
            scroll_offset: 0,
            width: 0,
            height: 0,
            loading: false,
            last_error: None,
            last_refresh: None,
            banner: None,
            persist_feeds: true,
            needs_redraw: true,
        }
    }

    /// Session restricted to one ad-hoc source, opened on the article list.
    pub fn pinned(config: Config, url: impl Into<String>, seen: SeenSet) -> Self {
        let mut app = Self::new(
            config,
            vec![FeedSource::new(PINNED_SOURCE_NAME, url)],
            seen,
        );
        app.persist_feeds = false;
        app.screen = Screen::FeedList;
        app
    }

    /// Commands to run when the event loop starts.
    ///
    /// With sources configured this is an automatic fetch, whose completion
    /// starts the tick chain; otherwise the chain starts directly.
    pub fn init(&mut self) -> Vec<Command> {
        if self.feeds.is_empty() {
            return vec![Command::Tick(self.config.refresh_interval())];
        }
        self.loading = true;
        vec![Command::Fetch {
            sources: self.feeds.clone(),
            origin: FetchOrigin::Auto,
        }]
    }

    /// Issue a fetch of every configured source.
    pub fn fetch_command(&mut self, origin: FetchOrigin) -> Command {
        self.loading = true;
        Command::Fetch {
            sources: self.feeds.clone(),
            origin,
        }
    }

    /// Re-derive the palette after the configured theme changed.
    pub fn apply_theme(&mut self) {
        self.theme = ThemeVariant::from_config_name(&self.config.color_theme);
        self.palette = self.theme.palette();
    }

    /// Rows available to the article list.
    pub fn page_size(&self) -> usize {
        let height = if self.height == 0 {
            FALLBACK_HEIGHT
        } else {
            self.height
        };
        usize::from(height.saturating_sub(CHROME_ROWS).max(1))
    }

    pub fn selected_article(&self) -> Option<&Article> {
        self.articles.get(self.selected_article)
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    pub fn menu_up(&mut self) {
        self.menu_selected = self.menu_selected.saturating_sub(1);
    }

    pub fn menu_down(&mut self) {
        self.menu_selected = self
            .menu_selected
            .saturating_add(1)
            .min(MENU_ITEMS.len() - 1);
    }

    pub fn article_up(&mut self) {
        self.selected_article = self.selected_article.saturating_sub(1);
        self.follow_selection();
    }

    pub fn article_down(&mut self) {
        if !self.articles.is_empty() {
            let max_index = self.articles.len() - 1;
            self.selected_article = self.selected_article.saturating_add(1).min(max_index);
        }
        self.follow_selection();
    }

    pub fn feed_up(&mut self) {
        self.selected_feed = self.selected_feed.saturating_sub(1);
    }

    pub fn feed_down(&mut self) {
        if !self.feeds.is_empty() {
            let max_index = self.feeds.len() - 1;
            self.selected_feed = self.selected_feed.saturating_add(1).min(max_index);
        }
    }

    /// Keep the selected article inside the visible window.
    pub fn follow_selection(&mut self) {
        let page = self.page_size();
        if self.selected_article < self.scroll_offset {
            self.scroll_offset = self.selected_article;
        } else if self.selected_article >= self.scroll_offset + page {
            self.scroll_offset = self.selected_article + 1 - page;
        }
    }

    /// Replace the article list, resetting cursor and scroll.
    pub fn replace_articles(&mut self, articles: Vec<Article>) {
        self.articles = articles;
        self.selected_article = 0;
        self.scroll_offset = 0;
    }

    /// Ensure every cursor is within its list.
    ///
    /// Call after any operation that may shrink a list, such as a fetch
    /// completing or a source being removed.
    pub fn clamp_selections(&mut self) {
        self.selected_feed = if self.feeds.is_empty() {
            0
        } else {
            self.selected_feed.min(self.feeds.len() - 1)
        };
        self.selected_article = if self.articles.is_empty() {
            0
        } else {
            self.selected_article.min(self.articles.len() - 1)
        };
        self.menu_selected = self.menu_selected.min(MENU_ITEMS.len() - 1);
        self.follow_selection();

        debug_assert!(
            self.feeds.is_empty() || self.selected_feed < self.feeds.len(),
            "selected_feed {} out of bounds for feeds len {}",
            self.selected_feed,
            self.feeds.len()
        );
        debug_assert!(
            self.articles.is_empty() || self.selected_article < self.articles.len(),
            "selected_article {} out of bounds for articles len {}",
            self.selected_article,
            self.articles.len()
        );
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use chrono::TimeZone;

    pub fn article(link: &str) -> Article {
        Article {
            title: format!("Title {}", link),
            link: link.to_string(),
            description: format!("<p>About {}</p>", link),
            published_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
            source_name: "Test".to_string(),
        }
    }

    pub fn articles(n: usize) -> Vec<Article> {
        (0..n).map(|i| article(&format!("https://example.com/{}", i))).collect()
    }

    pub fn sources(n: usize) -> Vec<FeedSource> {
        (0..n)
            .map(|i| FeedSource::new(format!("Feed {}", i), format!("https://f{}.example/rss", i)))
            .collect()
    }

    pub fn test_app() -> App {
        let mut app = App::new(Config::default(), sources(2), SeenSet::new());
        app.width = 80;
        app.height = 24;
        app
    }
}
