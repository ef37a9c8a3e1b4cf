//! Render functions for the TUI.
//!
//! Every screen shares one frame layout: a header row (screen title, or the
//! notification banner while one is raised), the screen body, a status row
//! and a key-hint row. The body is exactly `App::page_size()` rows tall.

use crate::app::{App, Screen};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::{articles, configure, feeds, menu, reader, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 20;
pub(super) const MIN_HEIGHT: u16 = 5;

/// Main render dispatch function.
pub(super) fn render(f: &mut Frame, app: &App) {
    let area = f.area();

    // Guard against zero-width/height to prevent panics
    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        f.render_widget(
            Paragraph::new("Too small").alignment(Alignment::Center),
            area,
        );
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    f.render_widget(Paragraph::new(header_line(app)), chunks[0]);
    render_body(f, app, chunks[1]);
    status::render(f, app, chunks[2], chunks[3]);
}

/// The banner replaces the title row until dismissed.
fn header_line(app: &App) -> Line<'static> {
    if let Some(banner) = &app.banner {
        return Line::from(vec![
            Span::styled(banner.message.clone(), app.palette.banner),
            Span::styled("  (space/enter/n to dismiss)", app.palette.status_hint),
        ]);
    }

    let title = match app.screen {
        Screen::FeedList => match app.last_refresh {
            Some(at) => format!(
                "📰 Latest Articles | Updated: {}",
                at.with_timezone(&chrono::Local).format("%H:%M:%S")
            ),
            None => "📰 Latest Articles".to_string(),
        },
        ref screen => screen.title().to_string(),
    };
    Line::from(Span::styled(title, app.palette.title))
}

fn render_body(f: &mut Frame, app: &App, area: Rect) {
    let lines = match &app.screen {
        Screen::Menu => menu::lines(app),
        Screen::FeedList => articles::lines(app, area.width, usize::from(area.height)),
        Screen::ArticleDetail => {
            let paragraph = Paragraph::new(reader::lines(app, area.width))
                .style(app.palette.detail_body)
                .wrap(Wrap { trim: false });
            f.render_widget(paragraph, area);
            return;
        }
        Screen::ManageFeeds => feeds::manage_lines(app, area.width),
        Screen::RemoveFeed => feeds::remove_lines(app, area.width),
        Screen::AddFeed { input } => feeds::add_lines(app, input),
        Screen::Configure { row } => configure::lines(app, *row),
    };
    f.render_widget(Paragraph::new(lines), area);
}

/// Concatenated span text of a line, for assertions.
#[cfg(test)]
pub(super) fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::*;
    use crate::app::Banner;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content
            .chunks(usize::from(width))
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_banner_replaces_title() {
        let mut app = test_app();
        app.banner = Some(Banner {
            message: "3 new".into(),
            count: 3,
        });
        assert_eq!(line_text(&header_line(&app)), "3 new  (space/enter/n to dismiss)");

        app.banner = None;
        assert_eq!(line_text(&header_line(&app)), "feedwatch");
    }

    #[test]
    fn test_every_screen_draws() {
        let mut app = test_app();
        app.replace_articles(articles(30));
        for screen in [
            Screen::Menu,
            Screen::FeedList,
            Screen::ArticleDetail,
            Screen::ManageFeeds,
            Screen::Configure { row: 1 },
            Screen::AddFeed {
                input: "News|https://n".into(),
            },
            Screen::RemoveFeed,
        ] {
            app.screen = screen;
            let out = draw(&app, 80, 24);
            assert!(!out.trim().is_empty());
        }
    }

    #[test]
    fn test_tiny_terminal_shows_placeholder() {
        let app = test_app();
        assert!(draw(&app, 10, 3).contains("Too small"));
    }

    #[test]
    fn test_article_window_fills_body() {
        let mut app = test_app();
        app.screen = Screen::FeedList;
        app.height = 10;
        app.replace_articles(articles(30));
        app.selected_article = 12;
        app.follow_selection();

        let out = draw(&app, 80, 10);
        assert!(out.contains("example.com/12"));
        assert!(!out.contains("example.com/13"));
        assert!(out.contains("example.com/6"));
        assert!(!out.contains("example.com/5 "));
    }
}
