//! Article detail view.

use crate::app::App;
use crate::util::{html_to_text, strip_control_chars, truncate_to_width};
use chrono::Local;
use ratatui::text::{Line, Span};

/// Below this width the metadata goes on two lines.
const NARROW_WIDTH: u16 = 60;

/// Heading, metadata, link and plain-text body of the selected article.
///
/// Long lines are left for the paragraph to wrap, except the link, which is
/// cut so it stays on one row.
pub fn lines(app: &App, width: u16) -> Vec<Line<'static>> {
    let palette = &app.palette;
    let Some(article) = app.selected_article() else {
        return vec![Line::from(Span::styled(
            "No article selected",
            palette.status_error,
        ))];
    };

    let mut lines = vec![
        Line::from(Span::styled(
            format!("📖 {}", clean(&article.title)),
            palette.detail_heading,
        )),
        Line::default(),
    ];

    let time = article
        .published_at
        .with_timezone(&Local)
        .format("%H:%M on %Y-%m-%d")
        .to_string();
    let source = clean(&article.source_name);
    if width < NARROW_WIDTH {
        lines.push(Line::from(Span::styled(format!("🕒 {}", time), palette.detail_meta)));
        lines.push(Line::from(Span::styled(format!("📰 {}", source), palette.detail_meta)));
    } else {
        lines.push(Line::from(Span::styled(
            format!("🕒 {} | 📰 {}", time, source),
            palette.detail_meta,
        )));
    }

    let link = clean(&article.link);
    let link_cols = usize::from(width).saturating_sub(4);
    lines.push(Line::from(Span::styled(
        format!("🔗 {}", truncate_to_width(&link, link_cols)),
        palette.detail_link,
    )));
    lines.push(Line::default());

    let body = html_to_text(&article.description, usize::from(width));
    let body = strip_control_chars(&body);
    if body.trim().is_empty() {
        lines.push(Line::from(Span::styled(
            "No content available for this article.",
            palette.detail_body,
        )));
    } else {
        lines.extend(
            body.lines()
                .map(|l| Line::from(Span::styled(l.to_string(), palette.detail_body))),
        );
    }
    lines
}

fn clean(s: &str) -> String {
    strip_control_chars(s).replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::*;
    use crate::ui::render::line_text;

    fn texts(app: &App, width: u16) -> Vec<String> {
        lines(app, width).iter().map(line_text).collect()
    }

    #[test]
    fn test_no_selection() {
        let app = test_app();
        assert_eq!(texts(&app, 80), vec!["No article selected"]);
    }

    #[test]
    fn test_body_is_plain_text() {
        let mut app = test_app();
        let mut a = article("https://x/1");
        a.description = "<p>First &amp; foremost</p><p>\x1b[2JSecond</p>".into();
        app.replace_articles(vec![a]);

        let text = texts(&app, 80);
        assert_eq!(text[0], "📖 Title https://x/1");
        assert!(text[2].contains(" | 📰 Test"));
        assert_eq!(text[3], "🔗 https://x/1");
        let body: Vec<&str> = text[5..]
            .iter()
            .map(String::as_str)
            .filter(|l| !l.trim().is_empty())
            .collect();
        assert_eq!(body, ["First & foremost", "Second"]);
    }

    #[test]
    fn test_narrow_splits_metadata() {
        let mut app = test_app();
        app.replace_articles(articles(1));
        let text = texts(&app, 40);
        assert!(text[2].starts_with("🕒 "));
        assert_eq!(text[3], "📰 Test");
    }

    #[test]
    fn test_empty_description() {
        let mut app = test_app();
        let mut a = article("https://x/1");
        a.description = "<br/>".into();
        app.replace_articles(vec![a]);
        assert_eq!(
            texts(&app, 80).last().map(String::as_str),
            Some("No content available for this article.")
        );
    }
}
