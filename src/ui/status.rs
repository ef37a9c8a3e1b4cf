use crate::app::{App, Screen};
use crate::util::{strip_control_chars, truncate_to_width};
use ratatui::{layout::Rect, text::Span, widgets::Paragraph, Frame};

/// Render the status row (error or loading) and the key-hint row.
pub fn render(f: &mut Frame, app: &App, status_area: Rect, hint_area: Rect) {
    // Guard against zero-width/height areas
    if status_area.width < 1 || hint_area.width < 1 {
        return;
    }

    if let Some(span) = status_span(app, usize::from(status_area.width)) {
        f.render_widget(Paragraph::new(span), status_area);
    }

    let hint = truncate_to_width(hints(&app.screen), usize::from(hint_area.width));
    f.render_widget(
        Paragraph::new(Span::styled(hint, app.palette.status_hint)),
        hint_area,
    );
}

/// Errors take precedence over the loading indicator.
fn status_span(app: &App, width: usize) -> Option<Span<'static>> {
    if let Some(err) = &app.last_error {
        let text = format!("Error: {}", strip_control_chars(err).replace('\n', " "));
        return Some(Span::styled(
            truncate_to_width(&text, width).into_owned(),
            app.palette.status_error,
        ));
    }
    if app.loading {
        return Some(Span::styled("Loading feeds...", app.palette.status_loading));
    }
    None
}

fn hints(screen: &Screen) -> &'static str {
    match screen {
        Screen::Menu => "↑/↓ navigate  Enter select  q quit",
        Screen::FeedList => "↑/↓ navigate  Enter read  r refresh  Esc menu",
        Screen::ArticleDetail => "o open in browser  Esc back",
        Screen::ManageFeeds => "↑/↓ navigate  a add  Enter/d remove  Esc menu",
        Screen::Configure { .. } => "↑/↓ navigate  Enter/Space change  Esc menu",
        Screen::AddFeed { .. } => "Enter save  Esc cancel",
        Screen::RemoveFeed => "↑/↓ select  Enter remove  Esc cancel",
    }
}
