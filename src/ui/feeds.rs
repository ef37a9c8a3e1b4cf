use crate::app::App;
use crate::util::{strip_control_chars, truncate_to_width};
use ratatui::text::{Line, Span};

/// Source list for the Manage Feeds screen.
pub fn manage_lines(app: &App, width: u16) -> Vec<Line<'static>> {
    if app.feeds.is_empty() {
        return vec![
            Line::default(),
            Line::from(Span::styled("No feeds configured.", app.palette.item_normal)),
        ];
    }
    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled("Current Feeds:", app.palette.detail_heading)),
    ];
    let rows = app.page_size().saturating_sub(lines.len());
    lines.extend(source_rows(app, width, rows));
    lines
}

/// Source picker for the Remove Feed screen.
pub fn remove_lines(app: &App, width: u16) -> Vec<Line<'static>> {
    if app.feeds.is_empty() {
        return vec![
            Line::default(),
            Line::from(Span::styled("No feeds to remove.", app.palette.item_normal)),
        ];
    }
    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled("Select feed to remove:", app.palette.item_normal)),
        Line::default(),
    ];
    let rows = app.page_size().saturating_sub(lines.len());
    lines.extend(source_rows(app, width, rows));
    lines
}

/// Prompt for a new source, `name|url` or a bare URL.
pub fn add_lines(app: &App, input: &str) -> Vec<Line<'static>> {
    let palette = &app.palette;
    vec![
        Line::default(),
        Line::from(Span::styled(
            "Enter feed name|URL (or just URL):",
            palette.item_normal,
        )),
        Line::from(Span::styled(format!("{}█", input), palette.input)),
        Line::default(),
        Line::from(Span::styled("Examples:", palette.item_normal)),
        Line::from(Span::styled(
            "  BBC News|https://feeds.bbci.co.uk/news/rss.xml",
            palette.item_normal,
        )),
        Line::from(Span::styled(
            "  https://feeds.bbci.co.uk/news/rss.xml",
            palette.item_normal,
        )),
    ]
}

/// First row to show so the cursor stays inside a window of `rows`.
fn window_start(selected: usize, rows: usize) -> usize {
    (selected + 1).saturating_sub(rows.max(1))
}

/// `N. name (url)` per source, the cursor row highlighted, at most `rows`
/// of them.
fn source_rows(app: &App, width: u16, rows: usize) -> impl Iterator<Item = Line<'static>> + '_ {
    let rows = rows.max(1);
    let start = window_start(app.selected_feed, rows);
    app.feeds.iter().enumerate().skip(start).take(rows).map(move |(i, feed)| {
        let style = if i == app.selected_feed {
            app.palette.item_selected
        } else {
            app.palette.item_normal
        };
        let row = format!(
            "{}. {} ({})",
            i + 1,
            strip_control_chars(&feed.name),
            strip_control_chars(&feed.url)
        );
        Line::from(Span::styled(
            truncate_to_width(&row, usize::from(width)).into_owned(),
            style,
        ))
    })
}
