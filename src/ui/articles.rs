use crate::app::App;
use crate::feed::Article;
use crate::util::{display_width, strip_control_chars, truncate_to_width};
use chrono::Local;
use ratatui::{
    style::Style,
    text::{Line, Span},
};

/// Width assumed before the first resize event arrives.
const FALLBACK_WIDTH: u16 = 80;

/// Source column width: a sixth of the terminal, between 8 and 15 columns.
fn source_width(width: u16) -> usize {
    (usize::from(width) / 6).clamp(8, 15)
}

/// The visible window of the article list, `rows` tall.
///
/// Rows are `HH:MM SOURCE TITLE`, with the source padded to a fixed column
/// and the title cut to the remaining width.
pub fn lines(app: &App, width: u16, rows: usize) -> Vec<Line<'static>> {
    if app.feeds.is_empty() {
        return vec![Line::from(Span::styled(
            "No feeds configured! Go to 'Manage Feeds' to add RSS feeds first.",
            app.palette.status_error,
        ))];
    }
    if app.articles.is_empty() {
        let text = if app.loading {
            "Loading feeds..."
        } else {
            "No articles found. Press 'r' to refresh."
        };
        return vec![Line::from(Span::styled(text, app.palette.item_normal))];
    }

    let width = if width == 0 { FALLBACK_WIDTH } else { width };
    app.articles
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(rows)
        .map(|(i, article)| {
            let style = if i == app.selected_article {
                app.palette.item_selected
            } else {
                app.palette.item_normal
            };
            article_line(app, article, width, style)
        })
        .collect()
}

fn article_line(app: &App, article: &Article, width: u16, title_style: Style) -> Line<'static> {
    let time = article
        .published_at
        .with_timezone(&Local)
        .format("%H:%M")
        .to_string();

    let source_cols = source_width(width);
    let source = strip_control_chars(&article.source_name);
    let source = truncate_to_width(&source, source_cols);
    let padding = source_cols.saturating_sub(display_width(&source));
    let source = format!("{}{} ", source, " ".repeat(padding));

    let used = display_width(&time) + 1 + display_width(&source);
    let title_cols = usize::from(width).saturating_sub(used + 2).max(20);
    let title = strip_control_chars(&article.title).replace('\n', " ");
    let title = truncate_to_width(&title, title_cols).into_owned();

    Line::from(vec![
        Span::styled(format!("{} ", time), app.palette.article_time),
        Span::styled(source, app.palette.article_source),
        Span::styled(title, title_style),
    ])
}
